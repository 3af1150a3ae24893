use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use crate::utils::{ConvertError, Result};

/// 翻译 JSON 中的字段名配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    /// 原文字段（默认 `ja`）
    pub source: String,
    /// 译文字段（默认 `kr`）
    pub target: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            source: "ja".to_string(),
            target: "kr".to_string(),
        }
    }
}

/// 翻译文件中的一条记录
///
/// 两个字段都可能缺失，过滤在 [`load_pairs`] 中完成。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub original: Option<String>,
    pub translated: Option<String>,
}

impl TranslationRecord {
    pub fn new(original: Option<&str>, translated: Option<&str>) -> Self {
        Self {
            original: original.map(str::to_string),
            translated: translated.map(str::to_string),
        }
    }
}

/// 原文字节与译文的配对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    /// 原文的 UTF-8 字节，保证非空
    pub original: Vec<u8>,
    /// 译文，可以为空（表示跳过）
    pub translated: String,
}

impl TranslationPair {
    /// 原文为空时返回 None
    pub fn new(original: &str, translated: impl Into<String>) -> Option<Self> {
        if original.is_empty() {
            return None;
        }
        Some(Self {
            original: original.as_bytes().to_vec(),
            translated: translated.into(),
        })
    }
}

/// 解析翻译 JSON 文档
///
/// 顶层必须是对象数组；字段值必须是字符串或 null。
/// `path` 仅用于错误信息。
pub fn parse_records(json: &str, fields: &FieldNames, path: &Path) -> Result<Vec<TranslationRecord>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| ConvertError::malformed(path, format!("invalid JSON: {}", e)))?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(ConvertError::malformed(
                path,
                format!("expected an array of records, found {}", value_kind(&other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<TranslationRecord> {
            let object = item.as_object().ok_or_else(|| {
                ConvertError::malformed(
                    path,
                    format!("record #{} is {}, expected an object", index, value_kind(item)),
                )
            })?;

            Ok(TranslationRecord {
                original: string_field(object, &fields.source, index, path)?,
                translated: string_field(object, &fields.target, index, path)?,
            })
        })
        .collect()
}

/// 从记录构建配对列表
///
/// 原文缺失或为空的记录被整体丢弃；译文缺失视为空字符串。
/// 保持输入顺序。
pub fn load_pairs(records: Vec<TranslationRecord>) -> Vec<TranslationPair> {
    records
        .into_iter()
        .filter_map(|record| {
            let original = record.original.filter(|text| !text.is_empty())?;
            Some(TranslationPair {
                original: original.into_bytes(),
                translated: record.translated.unwrap_or_default(),
            })
        })
        .collect()
}

fn string_field(object: &Map<String, Value>, key: &str, index: usize, path: &Path) -> Result<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(ConvertError::malformed(
            path,
            format!("record #{} field '{}' is {}, expected a string", index, key, value_kind(other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
