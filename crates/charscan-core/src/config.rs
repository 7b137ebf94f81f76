//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// `[scan]` 段：命令行未给出时使用的默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSection {
    /// 编码标签；"auto" 表示自动探测
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    /// "text" 或 "json"
    #[serde(default)]
    pub format: Option<String>,
    /// 目录遍历时接受的扩展名
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

/// 顶层配置文件结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub scan: ScanSection,
}

/// 从 TOML 文件加载配置
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let parsed: FileConfig = toml::from_str(&txt).with_context(|| format!("parse config {}", path.display()))?;
    Ok(parsed)
}
