//! IO 抽象层 - trait 定义
//!
//! 面向接口编程：转换流程只依赖这些 trait，测试时可换成内存实现。

use std::path::Path;
use crate::utils::Result;

/// DAT 文件原始数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDatData {
    /// 文件的原始字节数据
    pub bytes: Vec<u8>,
}

/// DAT 文件读取 trait
///
/// # 职责
/// - 一次性读取整个二进制文件
/// - 不负责解析，文件内容视为不透明字节
pub trait DatReader {
    /// 读取 DAT 文件的原始数据
    ///
    /// 文件不存在时返回 `ResourceNotFound`
    fn read(&self, path: &Path) -> Result<RawDatData>;
}

/// DAT 文件写入 trait
///
/// # 职责
/// - 将替换后的完整缓冲区一次性写出
/// - 写入失败时不得留下写了一半的目标文件
pub trait DatWriter {
    fn write(&self, data: &RawDatData, path: &Path) -> Result<()>;
}

/// 翻译源读取 trait
///
/// 返回 UTF-8 文本，结构解析由 [`crate::translation::parse_records`] 负责
pub trait TranslationReader {
    fn read(&self, path: &Path) -> Result<String>;
}
