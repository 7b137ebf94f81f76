//! 字符流分类（单次遍历）
use crate::symbols::classify_char;
use crate::types::{Location, Report};

/// 对已解码的字符流逐个分类，生成报告
///
/// - 行结束符按通用换行处理：`\n`、`\r\n`、单独的 `\r` 均结束一行，`\r\n` 计为一个字符
/// - 行结束符属于该行的字符流（占一列），随后行号加一、列号归 1
pub fn classify<I>(chars: I) -> Report
where
    I: IntoIterator<Item = char>,
{
    let mut report = Report::default();
    let mut line: usize = 1;
    let mut column: usize = 0;
    let mut iter = chars.into_iter().peekable();

    while let Some(ch) = iter.next() {
        column += 1;
        if let Some(category) = classify_char(ch) {
            report.record(category, ch, Location::new(line, column));
        }
        let ends_line = match ch {
            '\n' => true,
            '\r' => {
                if iter.peek() == Some(&'\n') { iter.next(); }
                true
            }
            _ => false,
        };
        if ends_line {
            line += 1;
            column = 0;
        }
    }

    report
}
