use serde::{Deserialize, Serialize};
use crate::patcher::PatchReport;
use crate::utils::decode_lossy;

/// 失败内容汇总（用于终端输出）
///
/// 只输出非空的分类；原文按 UTF-8 解码显示，非法字节被丢弃。
pub struct FailureSummary<'a> {
    report: &'a PatchReport,
}

impl<'a> FailureSummary<'a> {
    pub fn new(report: &'a PatchReport) -> Self {
        Self { report }
    }
}

impl std::fmt::Display for FailureSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- 失败内容汇总 ---")?;
        write_section(f, "在 .dat 文件中未找到的原文", &self.report.not_found)?;
        write_section(f, "译文比原文长而跳过的条目", &self.report.too_long)?;
        write_section(f, "译文为空而跳过的条目", &self.report.empty_skipped)?;
        Ok(())
    }
}

fn write_section(f: &mut std::fmt::Formatter<'_>, title: &str, entries: &[Vec<u8>]) -> std::fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "[{} - {} 个]", title, entries.len())?;
    for entry in entries {
        writeln!(f, "- {}", decode_lossy(entry))?;
    }
    Ok(())
}

/// 诊断结果的 JSON 形式（`--report-json`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsJson {
    pub applied: usize,
    pub replaced_occurrences: usize,
    pub not_found: Vec<String>,
    pub too_long: Vec<String>,
    pub empty_skipped: Vec<String>,
}

impl From<&PatchReport> for DiagnosticsJson {
    fn from(report: &PatchReport) -> Self {
        let decode_all = |entries: &[Vec<u8>]| -> Vec<String> {
            entries.iter().map(|e| decode_lossy(e)).collect()
        };
        Self {
            applied: report.applied,
            replaced_occurrences: report.replaced_occurrences,
            not_found: decode_all(&report.not_found),
            too_long: decode_all(&report.too_long),
            empty_skipped: decode_all(&report.empty_skipped),
        }
    }
}
