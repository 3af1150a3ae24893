/// IO 抽象层模块
///
/// 该模块提供文件读写的抽象接口，替换引擎本身不做任何 IO。
/// 支持依赖注入和测试 mock（如内存 IO）。
///
/// # 架构设计
///
/// - **traits**: 定义 Reader/Writer trait 接口
/// - **fs_io**: 基于文件系统的默认实现（输出采用原子写入）
///
/// # 使用示例
///
/// ```rust,ignore
/// use astral_convertor::io::{DefaultDatReader, DatReader};
///
/// let reader = DefaultDatReader;
/// let data = reader.read(Path::new("01_dat/script.dat"))?;
/// ```
pub mod traits;
pub mod fs_io;

// === 导出 trait 定义 ===
pub use traits::{DatReader, DatWriter, RawDatData, TranslationReader};

// === 导出默认实现 ===
pub use fs_io::{DefaultDatReader, DefaultDatWriter, DefaultTranslationReader};
