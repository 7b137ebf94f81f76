//! 分析选项与输出格式
use std::str::FromStr;

/// 单次分析的选项
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// 指定编码；None 表示按候选列表自动探测
    pub encoding_hint: Option<String>,
    /// 最大文件大小（字节）；超过则直接失败，不尝试解码
    pub max_file_size: Option<u64>,
}

impl AnalyzeOptions {
    pub fn with_encoding(hint: impl Into<String>) -> Self {
        Self { encoding_hint: Some(hint.into()), ..Self::default() }
    }
}

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {s}. Use 'text' or 'json'.")),
        }
    }
}
