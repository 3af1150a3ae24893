//! 一次完整的转换流程
//!
//! 读取 .dat → 读取并解析翻译 JSON → 构建配对 → 替换 → 一次性写出。
//! 所有可能致命的步骤都在写入之前完成，失败时不会产生输出文件。

use std::path::PathBuf;
use crate::io::{
    DatReader, DatWriter, DefaultDatReader, DefaultDatWriter, DefaultTranslationReader,
    RawDatData, TranslationReader,
};
use crate::patcher::{self, PatchReport};
use crate::translation::{self, FieldNames};
use crate::utils::Result;

/// 单次转换任务的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    pub dat_path: PathBuf,
    pub json_path: PathBuf,
    pub output_path: PathBuf,
}

/// 转换器，IO 通过泛型注入
pub struct Convertor<R, T, W> {
    dat_reader: R,
    translation_reader: T,
    writer: W,
    fields: FieldNames,
}

impl Convertor<DefaultDatReader, DefaultTranslationReader, DefaultDatWriter> {
    /// 使用文件系统 IO
    pub fn with_fields(fields: FieldNames) -> Self {
        Self::new(DefaultDatReader, DefaultTranslationReader, DefaultDatWriter, fields)
    }
}

impl<R: DatReader, T: TranslationReader, W: DatWriter> Convertor<R, T, W> {
    pub fn new(dat_reader: R, translation_reader: T, writer: W, fields: FieldNames) -> Self {
        Self {
            dat_reader,
            translation_reader,
            writer,
            fields,
        }
    }

    /// 执行转换，成功时返回替换结果（含诊断列表）
    pub fn run(&self, job: &ConvertJob) -> Result<PatchReport> {
        let dat = self.dat_reader.read(&job.dat_path)?;
        let input_len = dat.bytes.len();

        let json = self.translation_reader.read(&job.json_path)?;
        let records = translation::parse_records(&json, &self.fields, &job.json_path)?;
        let record_count = records.len();
        let pairs = translation::load_pairs(records);
        tracing::info!(
            records = record_count,
            pairs = pairs.len(),
            "loaded translation pairs from {}",
            job.json_path.display()
        );

        let mut report = patcher::patch(dat.bytes, pairs);
        debug_assert_eq!(report.result.len(), input_len);

        let output = RawDatData {
            bytes: std::mem::take(&mut report.result),
        };
        self.writer.write(&output, &job.output_path)?;
        report.result = output.bytes;

        tracing::info!(
            applied = report.applied,
            occurrences = report.replaced_occurrences,
            "patched {} -> {}",
            job.dat_path.display(),
            job.output_path.display()
        );
        if report.has_failures() {
            tracing::warn!(
                not_found = report.not_found.len(),
                too_long = report.too_long.len(),
                empty_skipped = report.empty_skipped.len(),
                "some translations were not applied"
            );
        }

        Ok(report)
    }
}

/// 使用文件系统 IO 执行一次转换
pub fn convert(job: &ConvertJob, fields: &FieldNames) -> Result<PatchReport> {
    Convertor::with_fields(fields.clone()).run(job)
}
