//! 分析错误类型
use std::path::PathBuf;
use thiserror::Error;

use crate::encodings::DecodeError;

/// 对外暴露的三类失败结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Io,
    Decode,
    Unexpected,
}

/// 单次分析的失败；任何失败都不附带部分报告
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file '{}' is {size} bytes, exceeding the limit of {limit} bytes", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// `attempted` 为实际尝试过的编码（给定编码时只有一个）
    #[error("failed to decode the file with {}: {source}", describe_attempts(.attempted))]
    Decode {
        attempted: Vec<String>,
        #[source]
        source: DecodeError,
    },

    #[error("an unexpected error occurred: unsupported encoding '{0}'")]
    UnsupportedEncoding(String),
}

impl AnalyzeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalyzeError::Io { .. } | AnalyzeError::TooLarge { .. } => FailureKind::Io,
            AnalyzeError::Decode { .. } => FailureKind::Decode,
            AnalyzeError::UnsupportedEncoding(_) => FailureKind::Unexpected,
        }
    }
}

fn describe_attempts(attempted: &[String]) -> String {
    match attempted {
        [one] => format!("'{one}'"),
        many => format!("any of the common encodings: {}", many.join(", ")),
    }
}
