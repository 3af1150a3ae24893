//! 工作目录约定与文件选择
//!
//! 默认布局：
//! - `01_dat/`：原始 .dat 文件
//! - `02_json/`：翻译 .json 文件
//! - `03_convert/`：输出目录，文件名为 `<原文件名>_ko.dat`

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::utils::{ConvertError, Result};
use crate::DAT_EXTENSION;

/// 目录布局配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceLayout {
    pub dat_dir: PathBuf,
    pub json_dir: PathBuf,
    pub output_dir: PathBuf,
    /// 输出文件名后缀（位于扩展名之前）
    pub suffix: String,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            dat_dir: PathBuf::from("01_dat"),
            json_dir: PathBuf::from("02_json"),
            output_dir: PathBuf::from("03_convert"),
            suffix: "_ko".to_string(),
        }
    }
}

impl WorkspaceLayout {
    /// 由输入 .dat 路径构造输出路径
    pub fn output_path_for(&self, dat_path: &Path) -> PathBuf {
        output_path(dat_path, &self.output_dir, &self.suffix)
    }
}

/// `<output_dir>/<stem><suffix>.dat`
pub fn output_path(dat_path: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = dat_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}{}.{}", stem, suffix, DAT_EXTENSION))
}

/// 列出目录中指定扩展名的文件（不区分大小写），按文件名排序
///
/// 目录不存在或没有匹配文件时返回 `ResourceNotFound`
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConvertError::not_found_with(dir, "Folder not found"));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ConvertError::not_found_with(
            dir,
            format!("No .{} files in folder", extension),
        ));
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed candidate files");
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// 若目录不存在则创建，返回是否新建
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    Ok(true)
}

/// 从候选文件中选出一个
pub trait FileSelector {
    /// `extension` 仅用于提示信息
    fn select(&mut self, extension: &str, candidates: &[PathBuf]) -> Result<PathBuf>;
}

/// 交互式编号选择器
///
/// 列出候选文件（从 1 开始编号），反复提示直到输入合法编号。
/// 输入流结束时返回错误。
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptSelector<std::io::StdinLock<'static>, std::io::Stdout> {
    /// 使用标准输入输出
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> FileSelector for PromptSelector<R, W> {
    fn select(&mut self, extension: &str, candidates: &[PathBuf]) -> Result<PathBuf> {
        if candidates.is_empty() {
            return Err(ConvertError::Unexpected(format!("没有可选择的 .{} 文件", extension)));
        }

        writeln!(self.output)?;
        writeln!(self.output, "--- [.{} 文件选择] ---", extension)?;
        for (i, path) in candidates.iter().enumerate() {
            let name = path.file_name().unwrap_or(path.as_os_str());
            writeln!(self.output, "[{}] {}", i + 1, name.to_string_lossy())?;
        }

        let count = candidates.len();
        loop {
            write!(self.output, "请输入要使用的文件编号 (1-{}): ", count)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConvertError::Unexpected("输入已结束，未选择文件".to_string()));
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=count).contains(&choice) => {
                    let selected = candidates[choice - 1].clone();
                    writeln!(self.output, "[INFO] 已选择 '{}'", selected.display())?;
                    return Ok(selected);
                }
                Ok(_) => {
                    writeln!(self.output, "[WRONG] 编号无效，请输入 1 到 {} 之间的数字。", count)?;
                }
                Err(_) => {
                    writeln!(self.output, "[WRONG] 请只输入数字。")?;
                }
            }
        }
    }
}
