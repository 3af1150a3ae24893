//! 文件系统 IO 实现
//!
//! 读取直接使用 std::fs；写入先写同目录临时文件，再 rename 到目标路径。

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use super::traits::{DatReader, DatWriter, RawDatData, TranslationReader};
use crate::utils::{ConvertError, Result};

/// 默认的 DAT 文件读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultDatReader;

impl DatReader for DefaultDatReader {
    fn read(&self, path: &Path) -> Result<RawDatData> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::from_io(path, e))?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "read dat file");
        Ok(RawDatData { bytes })
    }
}

/// 默认的翻译文件读取器
///
/// 文件不是合法 UTF-8 时视为格式错误
#[derive(Debug, Clone, Default)]
pub struct DefaultTranslationReader;

impl TranslationReader for DefaultTranslationReader {
    fn read(&self, path: &Path) -> Result<String> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(ConvertError::malformed(path, "file is not valid UTF-8"))
            }
            Err(e) => Err(ConvertError::from_io(path, e)),
        }
    }
}

/// 默认的 DAT 文件写入器（原子写入）
#[derive(Debug, Clone, Default)]
pub struct DefaultDatWriter;

impl DatWriter for DefaultDatWriter {
    fn write(&self, data: &RawDatData, path: &Path) -> Result<()> {
        // 确保父目录存在
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(&data.bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(path)?;

        tracing::debug!(path = %path.display(), size = data.bytes.len(), "wrote dat file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_dat_reader() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test_reader.dat");

        let test_data = b"DAT\x00\xff\x01";
        std::fs::write(&test_file, test_data).unwrap();

        let reader = DefaultDatReader;
        let result = reader.read(&test_file).unwrap();

        assert_eq!(result.bytes, test_data);
    }

    #[test]
    fn test_reader_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.dat");

        let err = DefaultDatReader.read(&missing).unwrap_err();
        assert!(matches!(err, ConvertError::ResourceNotFound { ref path, .. } if path == &missing));

        let err = DefaultTranslationReader.read(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConvertError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_translation_reader_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("broken.json");
        std::fs::write(&test_file, b"[{\"ja\": \"\xff\"}]").unwrap();

        let err = DefaultTranslationReader.read(&test_file).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput { .. }));
    }

    #[test]
    fn test_default_dat_writer() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test_writer.dat");

        let test_data = RawDatData {
            bytes: b"X\x00\x00 patched".to_vec(),
        };

        let writer = DefaultDatWriter;
        writer.write(&test_data, &test_file).unwrap();

        let written_data = std::fs::read(&test_file).unwrap();
        assert_eq!(written_data, test_data.bytes);

        // 临时文件已被 rename，目录中只剩目标文件
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_writer_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("out.dat");
        std::fs::write(&test_file, b"old contents").unwrap();

        DefaultDatWriter
            .write(&RawDatData { bytes: vec![1, 2, 3] }, &test_file)
            .unwrap();

        assert_eq!(std::fs::read(&test_file).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("03_convert").join("subdir").join("test.dat");

        let test_data = RawDatData {
            bytes: vec![1, 2, 3, 4],
        };

        DefaultDatWriter.write(&test_data, &test_file).unwrap();

        assert!(test_file.exists());
    }
}
