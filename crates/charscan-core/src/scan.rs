//! 分析主流程：读取 → 解码 → 分类，以及待分析文件的收集
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::classify::classify;
use crate::encodings::{DecodeError, TextEncoding, CANDIDATE_ENCODINGS};
use crate::error::AnalyzeError;
use crate::options::AnalyzeOptions;
use crate::types::Report;

/// 目录遍历时默认接受的扩展名（与上传白名单一致）
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "csv"];

/// 一次成功分析的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub report: Report,
    /// 实际成功解码所用的编码标签
    pub encoding: String,
}

/// 分析单个文件
/// - `encoding_hint` 为 Some 时只尝试该编码，失败即返回，不回退
/// - 为 None 时按 `CANDIDATE_ENCODINGS` 顺序尝试，首个成功解码者胜出
pub fn analyze(path: &Path, encoding_hint: Option<&str>) -> Result<Analysis, AnalyzeError> {
    let opts = AnalyzeOptions { encoding_hint: encoding_hint.map(str::to_string), ..AnalyzeOptions::default() };
    analyze_with_options(path, &opts)
}

/// 带选项的分析入口
pub fn analyze_with_options(path: &Path, opts: &AnalyzeOptions) -> Result<Analysis, AnalyzeError> {
    if let Some(limit) = opts.max_file_size {
        let md = std::fs::metadata(path).map_err(|source| AnalyzeError::Io { path: path.to_path_buf(), source })?;
        if md.len() > limit {
            return Err(AnalyzeError::TooLarge { path: path.to_path_buf(), size: md.len(), limit });
        }
    }

    // 首个候选单独取出，保证至少尝试一次
    let (first, rest): ((String, TextEncoding), Vec<(String, TextEncoding)>) = match opts.encoding_hint.as_deref() {
        Some(hint) => {
            let enc = TextEncoding::from_label(hint).ok_or_else(|| AnalyzeError::UnsupportedEncoding(hint.to_string()))?;
            ((hint.to_string(), enc), Vec::new())
        }
        None => {
            let [(label, enc), rest @ ..] = CANDIDATE_ENCODINGS;
            ((label.to_string(), enc), rest.iter().map(|(l, e)| (l.to_string(), *e)).collect())
        }
    };

    let mut attempted: Vec<String> = Vec::with_capacity(rest.len() + 1);
    let mut last_error = match attempt(path, first, &mut attempted)? {
        Ok(analysis) => return Ok(analysis),
        Err(e) => e,
    };
    for candidate in rest {
        match attempt(path, candidate, &mut attempted)? {
            Ok(analysis) => return Ok(analysis),
            Err(e) => last_error = e,
        }
    }

    Err(AnalyzeError::Decode { attempted, source: last_error })
}

/// 用单个编码尝试一次：外层为 I/O 失败，内层为解码失败
fn attempt(
    path: &Path,
    (label, enc): (String, TextEncoding),
    attempted: &mut Vec<String>,
) -> Result<Result<Analysis, DecodeError>, AnalyzeError> {
    debug!(path = %path.display(), encoding = %label, "trying encoding");
    attempted.push(label.clone());

    // 每次尝试都重新读取文件；句柄在 read_source 返回时释放
    let bytes = read_source(path)?;
    match enc.decode(&bytes, &label) {
        Ok(text) => {
            let report = classify(text.chars());
            info!(
                path = %path.display(),
                encoding = %label,
                matches = report.total_matches(),
                "analysis finished"
            );
            Ok(Ok(Analysis { report, encoding: label }))
        }
        Err(e) => {
            warn!(path = %path.display(), encoding = %label, error = %e, "decode failed");
            Ok(Err(e))
        }
    }
}

/// 整读文件字节
fn read_source(path: &Path) -> Result<Vec<u8>, AnalyzeError> {
    let io_err = |source: std::io::Error| AnalyzeError::Io { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(io_err)?;
    Ok(buf)
}

/// 扩展名是否在白名单内（大小写不敏感；无扩展名视为不允许）
pub fn is_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// 收集待分析文件
/// - 显式给出的文件总是保留（与扩展名无关）
/// - 目录递归遍历，仅保留白名单扩展名的文件，按路径排序保证输出稳定
/// - 不存在的路径原样保留，由 `analyze` 报告 I/O 失败
pub fn collect_files(paths: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            // sort_by_file_name 保证同级目录内的顺序稳定
            for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
                let entry = match entry { Ok(e) => e, Err(e) => { warn!(error = %e, "skipping unreadable entry"); continue } };
                if entry.file_type().is_file() && is_allowed_extension(entry.path(), extensions) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    files
}
