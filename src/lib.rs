pub mod convertor;
pub mod io;
pub mod patcher;
pub mod report;
pub mod translation;
pub mod utils;
pub mod workspace;

// 重新导出主要结构
pub use convertor::{convert, ConvertJob, Convertor};
pub use patcher::{patch, PatchReport};
pub use report::{DiagnosticsJson, FailureSummary};
pub use translation::{load_pairs, parse_records, FieldNames, TranslationPair, TranslationRecord};
pub use utils::{decode_lossy, ConvertError};
pub use workspace::{FileSelector, PromptSelector, WorkspaceLayout};

// 常量定义
pub const DAT_EXTENSION: &str = "dat";
pub const JSON_EXTENSION: &str = "json";
