use thiserror::Error;
use std::path::PathBuf;

/// 自定义错误类型
///
/// 只有致命错误才会进入这里；未找到/过长/空译文属于软失败，
/// 记录在 [`crate::PatchReport`] 中，不会中断处理。
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{detail}: {}", path.display())]
    ResourceNotFound { path: PathBuf, detail: String },

    #[error("Malformed translation source {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("{0}")]
    Unexpected(String),
}

impl ConvertError {
    /// 资源不存在
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::not_found_with(path, "File not found")
    }

    pub fn not_found_with(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        ConvertError::ResourceNotFound {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// 翻译源格式错误
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConvertError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// 将 IO 错误归类：NotFound 映射为 ResourceNotFound，其余为意外错误
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            ConvertError::Io(err)
        }
    }

    /// 是否属于"意外错误"类别（IO、持久化及其他）
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            ConvertError::Io(_) | ConvertError::Persist(_) | ConvertError::Unexpected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// 以 UTF-8 解码字节用于显示，丢弃非法序列
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
