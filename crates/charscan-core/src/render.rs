//! 报告渲染（文本 / JSON），CLI 与其他前端共用
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::scan::Analysis;
use crate::types::{Location, Report};

/// 每个字符最多展示的位置数
pub const MAX_SHOWN_LOCATIONS: usize = 5;

/// 渲染后的单行：字符、次数、截断后的位置串
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub character: char,
    pub count: usize,
    pub locations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCategory {
    pub category: &'static str,
    pub rows: Vec<RenderedRow>,
}

/// `L001:C004` 形式
pub fn format_location(loc: &Location) -> String {
    format!("L{:03}:C{:03}", loc.line, loc.column)
}

/// 逗号连接前 5 个位置，超出部分追加 ` ...and N more`
pub fn format_locations(locations: &[Location]) -> String {
    let shown: Vec<String> = locations.iter().take(MAX_SHOWN_LOCATIONS).map(format_location).collect();
    let mut s = shown.join(", ");
    if locations.len() > MAX_SHOWN_LOCATIONS {
        s.push_str(&format!(" ...and {} more", locations.len() - MAX_SHOWN_LOCATIONS));
    }
    s
}

/// 按报告顺序展开为表格行
pub fn render_report(report: &Report) -> Vec<RenderedCategory> {
    report
        .categories()
        .map(|(category, chars)| RenderedCategory {
            category: category.label(),
            rows: chars
                .values()
                .map(|e| RenderedRow { character: e.character, count: e.count(), locations: format_locations(&e.locations) })
                .collect(),
        })
        .collect()
}

/// 以可读文本形式写出单个文件的分析结果
pub fn write_text(out: &mut dyn Write, path: &Path, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "\n🔍 Analysis results for: {}", path.display())?;
    writeln!(out, "Encoding: {}\n", analysis.encoding)?;

    if !analysis.report.has_results() {
        writeln!(out, "✅ No special characters found that would be altered by the legacy normalization routine.")?;
        return Ok(());
    }

    for cat in render_report(&analysis.report) {
        writeln!(out, "--- {} ---", cat.category)?;
        for row in &cat.rows {
            writeln!(out, "  Character: '{}' found {} time(s)", row.character, row.count)?;
            writeln!(out, "  Locations: [{}]", row.locations)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// 写出单个 JSON 对象（数组的括号与分隔符由调用方负责）
pub fn write_json_entry(out: &mut dyn Write, path: &Path, analysis: &Analysis) -> io::Result<()> {
    let item = serde_json::json!({
        "path": path.display().to_string(),
        "encoding": analysis.encoding,
        "has_results": analysis.report.has_results(),
        "results": render_report(&analysis.report),
    });
    serde_json::to_writer(&mut *out, &item)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn analysis(text: &str) -> Analysis {
        Analysis { report: classify(text.chars()), encoding: "utf-8".to_string() }
    }

    #[test]
    fn location_is_zero_padded() {
        assert_eq!(format_location(&Location::new(1, 4)), "L001:C004");
        assert_eq!(format_location(&Location::new(1234, 56)), "L1234:C056");
    }

    #[test]
    fn five_or_fewer_locations_are_not_truncated() {
        let locs: Vec<Location> = (1..=5).map(|c| Location::new(1, c)).collect();
        assert_eq!(format_locations(&locs), "L001:C001, L001:C002, L001:C003, L001:C004, L001:C005");
    }

    #[test]
    fn more_than_five_locations_are_truncated() {
        let locs: Vec<Location> = (1..=12).map(|l| Location::new(l, 2)).collect();
        let s = format_locations(&locs);
        assert_eq!(s.matches("L0").count(), 5);
        assert!(s.starts_with("L001:C002, L002:C002"));
        assert!(s.ends_with("L005:C002 ...and 7 more"));
    }

    #[test]
    fn rendered_rows_follow_report_order() {
        let rendered = render_report(&classify("é & é ™".chars()));
        let cats: Vec<&str> = rendered.iter().map(|c| c.category).collect();
        assert_eq!(cats, vec!["Accented/Non-ASCII", "HTML Sensitive Characters", "Specific Symbols"]);
        assert_eq!(
            rendered[0].rows,
            vec![RenderedRow { character: 'é', count: 2, locations: "L001:C001, L001:C005".to_string() }]
        );
    }

    #[test]
    fn text_output_for_empty_report() {
        let mut buf = Vec::new();
        write_text(&mut buf, Path::new("plain.txt"), &analysis("nothing here\n")).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("Analysis results for: plain.txt"));
        assert!(s.contains("Encoding: utf-8"));
        assert!(s.contains("No special characters found"));
    }

    #[test]
    fn text_output_lists_characters() {
        let mut buf = Vec::new();
        write_text(&mut buf, Path::new("t.txt"), &analysis("a < b\n")).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("--- HTML Sensitive Characters ---"));
        assert!(s.contains("  Character: '<' found 1 time(s)"));
        assert!(s.contains("  Locations: [L001:C003]"));
    }

    #[test]
    fn json_entry_shape() {
        let mut buf = Vec::new();
        write_json_entry(&mut buf, Path::new("t.txt"), &analysis("—")).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["encoding"], "utf-8");
        assert_eq!(v["has_results"], true);
        assert_eq!(v["results"][0]["category"], "Specific Symbols");
        assert_eq!(v["results"][0]["rows"][0]["character"], "—");
        assert_eq!(v["results"][0]["rows"][0]["count"], 1);
        assert_eq!(v["results"][0]["rows"][0]["locations"], "L001:C001");
    }
}
