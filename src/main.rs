use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use astral_convertor::workspace::{self, FileSelector, PromptSelector, WorkspaceLayout};
use astral_convertor::{
    convert, ConvertError, ConvertJob, DiagnosticsJson, FailureSummary, FieldNames, PatchReport,
    DAT_EXTENSION, JSON_EXTENSION,
};

#[derive(Parser)]
#[command(name = "astral_convertor")]
#[command(about = "将 JSON 翻译表中的译文写入 .dat 二进制文件（长度不变）")]
#[command(version)]
struct Cli {
    /// 原始 .dat 文件路径（省略时从 --dat-dir 中选择）
    #[arg(long)]
    dat: Option<PathBuf>,

    /// 翻译 JSON 文件路径（省略时从 --json-dir 中选择）
    #[arg(long)]
    json: Option<PathBuf>,

    /// 存放 .dat 文件的目录
    #[arg(long, default_value = "01_dat")]
    dat_dir: PathBuf,

    /// 存放翻译 JSON 的目录
    #[arg(long, default_value = "02_json")]
    json_dir: PathBuf,

    /// 输出目录
    #[arg(long, default_value = "03_convert")]
    output_dir: PathBuf,

    /// 输出文件路径（覆盖 --output-dir 与 --suffix）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 输出文件名后缀
    #[arg(long, default_value = "_ko")]
    suffix: String,

    /// JSON 中原文字段名
    #[arg(long, default_value = "ja")]
    source_key: String,

    /// JSON 中译文字段名
    #[arg(long, default_value = "kr")]
    target_key: String,

    /// 将诊断结果另存为 JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// 静默模式(仅输出错误)
    #[arg(short, long)]
    quiet: bool,

    /// 输出调试日志
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// 初始化日志（输出到 stderr）
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let fields = field_names(cli)?;
    let layout = WorkspaceLayout {
        dat_dir: cli.dat_dir.clone(),
        json_dir: cli.json_dir.clone(),
        output_dir: cli.output_dir.clone(),
        suffix: cli.suffix.clone(),
    };

    let mut selector = PromptSelector::stdio();
    let dat_path = resolve_input(cli.dat.as_deref(), &layout.dat_dir, DAT_EXTENSION, &mut selector)?;
    let json_path = resolve_input(cli.json.as_deref(), &layout.json_dir, JSON_EXTENSION, &mut selector)?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| layout.output_path_for(&dat_path));
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if workspace::ensure_dir(parent)? && !cli.quiet {
            println!("\n[INFO] 已创建 '{}' 文件夹", parent.display());
        }
    }

    let job = ConvertJob {
        dat_path,
        json_path,
        output_path,
    };
    let report = convert(&job, &fields)?;

    if !cli.quiet {
        println!("\n[INFO] 文件修改完成！结果已保存到 '{}'", job.output_path.display());
        println!(
            "[INFO] 成功替换 {} 个条目（共 {} 处）",
            report.applied, report.replaced_occurrences
        );
        println!("\n{}", FailureSummary::new(&report));
    }

    if let Some(report_path) = &cli.report_json {
        save_report(&report, report_path)?;
        if !cli.quiet {
            println!("诊断结果已写入: {}", report_path.display());
        }
    }

    Ok(())
}

/// 校验字段名配置
fn field_names(cli: &Cli) -> Result<FieldNames> {
    if cli.source_key.is_empty() || cli.target_key.is_empty() {
        bail!("字段名不能为空");
    }
    if cli.source_key == cli.target_key {
        bail!("原文字段与译文字段不能相同: {}", cli.source_key);
    }

    Ok(FieldNames {
        source: cli.source_key.clone(),
        target: cli.target_key.clone(),
    })
}

/// 使用显式路径，或从目录中交互选择
fn resolve_input(
    explicit: Option<&Path>,
    dir: &Path,
    extension: &str,
    selector: &mut impl FileSelector,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let candidates = workspace::list_files(dir, extension)?;
    Ok(selector.select(extension, &candidates)?)
}

/// 将诊断结果写为 JSON
fn save_report(report: &PatchReport, path: &Path) -> Result<()> {
    let json_output = serde_json::to_string_pretty(&DiagnosticsJson::from(report))
        .context("序列化诊断结果失败")?;

    std::fs::write(path, json_output)
        .with_context(|| format!("写入诊断结果失败: {}", path.display()))
}

/// 按错误类别输出
fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<ConvertError>() {
        Some(ConvertError::ResourceNotFound { path, detail }) => {
            eprintln!("[ERROR] 找不到文件或文件夹。({}: {})", detail, path.display());
        }
        Some(ConvertError::MalformedInput { path, reason }) => {
            eprintln!("[ERROR] '{}' 不是有效的 JSON 格式。({})", path.display(), reason);
        }
        _ => {
            eprintln!("[ERROR] 发生未知错误: {:#}", err);
        }
    }
}
