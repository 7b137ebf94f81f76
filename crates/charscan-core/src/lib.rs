//! 字符扫描核心库
//!
//! 设计要点：
//! - 单次遍历：解码后的字符流逐个分类，记录 (行, 列) 位置，列按字符而非字节计数。
//! - 分类优先级固定：特定符号 → HTML 敏感字符 → 非 ASCII，三者互斥。
//! - 未给出编码时按固定候选列表依次尝试，首个“无致命错误解码”的编码胜出，不做语义校验。
//! - 失败时返回带标签的错误（I/O / 解码 / 其他），绝不返回部分报告。

mod classify;
mod config;
mod encodings;
mod error;
mod options;
mod render;
mod scan;
mod symbols;
mod types;

pub use classify::classify;
pub use config::{load_config, FileConfig, ScanSection};
pub use encodings::{DecodeError, TextEncoding, CANDIDATE_ENCODINGS};
pub use error::{AnalyzeError, FailureKind};
pub use options::{AnalyzeOptions, OutputFormat};
pub use render::{
    format_location, format_locations, render_report, write_json_entry, write_text, RenderedCategory,
    RenderedRow, MAX_SHOWN_LOCATIONS,
};
pub use scan::{analyze, analyze_with_options, collect_files, is_allowed_extension, Analysis, DEFAULT_EXTENSIONS};
pub use symbols::{classify_char, HTML_SENSITIVE_CHARS, SPECIFIC_SYMBOLS};
pub use types::{Category, Location, MatchEntry, Report};
