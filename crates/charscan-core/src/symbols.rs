//! 固定字符集合与单字符分类
use crate::types::Category;

/// 特定符号：项目符号、短破折号、长破折号、™、©、®
pub const SPECIFIC_SYMBOLS: [char; 6] = ['\u{2022}', '\u{2013}', '\u{2014}', '\u{2122}', '\u{00A9}', '\u{00AE}'];

/// HTML 文本/属性上下文中需要转义的字符
pub const HTML_SENSITIVE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// 对单个字符分类；普通 ASCII 返回 None
///
/// 顺序即契约：© 与 ® 的码点 ≥ 128，必须先命中特定符号集合。
pub fn classify_char(ch: char) -> Option<Category> {
    if SPECIFIC_SYMBOLS.contains(&ch) {
        Some(Category::SpecificSymbol)
    } else if HTML_SENSITIVE_CHARS.contains(&ch) {
        Some(Category::HtmlSensitive)
    } else if (ch as u32) >= 128 {
        Some(Category::NonAscii)
    } else {
        None
    }
}
