use anyhow::{Context, Result};
use charscan_core::{
    analyze_with_options, collect_files, load_config, write_json_entry, write_text, AnalyzeError, AnalyzeOptions,
    FailureKind, FileConfig, OutputFormat, DEFAULT_EXTENSIONS,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(
    name = "charscan",
    version,
    about = "Find characters a legacy text normalization routine would alter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 分析文件（目录按扩展名白名单递归展开）
    Scan {
        /// 待分析的文件或目录
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 文件编码，默认 utf-8；"auto" 表示按候选列表自动探测
        #[arg(short, long)]
        encoding: Option<String>,

        /// 输出格式：text 或 json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 输出文件，缺省写到标准输出
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 最大分析文件大小（单位字节，例如 16777216 代表 16MB）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 配置文件路径（TOML），命令行参数优先
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { paths, encoding, format, output, max_file_size, config } => {
            let file_cfg = match &config {
                Some(p) => load_config(p).context("load config failed")?,
                None => FileConfig::default(),
            };
            let scan_cfg = file_cfg.scan;

            // 命令行 > 配置文件 > 内置默认值
            let encoding = encoding.or(scan_cfg.encoding).unwrap_or_else(|| "utf-8".to_string());
            let format = match format {
                Some(f) => f,
                None => match scan_cfg.format.as_deref() {
                    Some(s) => s.parse::<OutputFormat>().map_err(anyhow::Error::msg).context("invalid format in config")?,
                    None => OutputFormat::default(),
                },
            };
            let extensions: Vec<String> = scan_cfg
                .extensions
                .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect());
            let opts = AnalyzeOptions {
                encoding_hint: parse_encoding(&encoding),
                max_file_size: max_file_size.or(scan_cfg.max_file_size),
            };

            let files = collect_files(&paths, &extensions);
            info!(files = files.len(), encoding = %encoding, "starting scan");

            let mut out: Box<dyn Write> = match &output {
                Some(p) => Box::new(BufWriter::new(File::create(p).context("create output file")?)),
                None => Box::new(BufWriter::new(std::io::stdout().lock())),
            };

            let mut analyzed = 0usize;
            let mut failed = 0usize;
            let mut first = true;
            if format == OutputFormat::Json { write!(out, "[")?; }

            // 逐个文件顺序分析，单个失败不影响其余文件
            for path in &files {
                match analyze_with_options(path, &opts) {
                    Ok(analysis) => {
                        analyzed += 1;
                        match format {
                            OutputFormat::Text => write_text(&mut *out, path, &analysis)?,
                            OutputFormat::Json => {
                                if !first { write!(out, ",")?; } else { first = false; }
                                write_json_entry(&mut *out, path, &analysis)?;
                            }
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        error!(path = %path.display(), error = %e, "analysis failed");
                        print_guidance(path, &e);
                    }
                }
            }

            if format == OutputFormat::Json { writeln!(out, "]")?; }
            out.flush().context("flush output")?;

            info!(analyzed, failed, "scan finished");
            if failed > 0 {
                anyhow::bail!("{failed} of {} file(s) could not be analyzed", files.len());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到标准错误，避免与报告输出混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析编码参数："auto" 表示不指定，交由候选列表探测
fn parse_encoding(s: &str) -> Option<String> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    Some(s.to_string())
}

/// 失败时在标准错误输出处理建议
fn print_guidance(path: &std::path::Path, err: &AnalyzeError) {
    match err.kind() {
        FailureKind::Io => eprintln!("Error: {err}"),
        FailureKind::Decode => {
            eprintln!("\n--- DECODING FAILED ---");
            eprintln!("Error: the file '{}' could not be decoded. {err}", path.display());
            eprintln!("The file is likely saved with a different encoding.");
            eprintln!("Try another common encoding, such as 'windows-1252' or 'latin-1', or 'auto' to detect one.");
            eprintln!("Example: charscan scan --encoding windows-1252 {}", path.display());
        }
        FailureKind::Unexpected => eprintln!("Error: {err}"),
    }
}
