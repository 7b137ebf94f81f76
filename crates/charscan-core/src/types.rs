//! 公共类型（对外暴露）
use indexmap::IndexMap;

/// 命中类别（互斥，按声明顺序判定优先级）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SpecificSymbol,
    HtmlSensitive,
    NonAscii,
}

impl Category {
    /// 展示用名称（文本与 JSON 输出共用）
    pub fn label(self) -> &'static str {
        match self {
            Category::SpecificSymbol => "Specific Symbols",
            Category::HtmlSensitive => "HTML Sensitive Characters",
            Category::NonAscii => "Accented/Non-ASCII",
        }
    }
}

/// 位置：行号与列号均从 1 开始，列按字符计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// 单个字符的全部命中位置（按扫描顺序追加）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub character: char,
    pub locations: Vec<Location>,
}

impl MatchEntry {
    pub fn count(&self) -> usize {
        self.locations.len()
    }
}

/// 分析报告：类别 → 字符 → 命中项
///
/// 两层均保持首次出现顺序；构建完成后只读。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    categories: IndexMap<Category, IndexMap<char, MatchEntry>>,
}

impl Report {
    /// 记录一次命中；类别与字符条目在首次出现时显式创建
    pub(crate) fn record(&mut self, category: Category, ch: char, loc: Location) {
        let chars = self.categories.entry(category).or_insert_with(IndexMap::new);
        let entry = chars
            .entry(ch)
            .or_insert_with(|| MatchEntry { character: ch, locations: Vec::new() });
        entry.locations.push(loc);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.is_empty()
    }

    /// 按首次出现顺序遍历类别
    pub fn categories(&self) -> impl Iterator<Item = (Category, &IndexMap<char, MatchEntry>)> + '_ {
        self.categories.iter().map(|(c, m)| (*c, m))
    }

    pub fn category(&self, category: Category) -> Option<&IndexMap<char, MatchEntry>> {
        self.categories.get(&category)
    }

    pub fn entry(&self, category: Category, ch: char) -> Option<&MatchEntry> {
        self.categories.get(&category).and_then(|m| m.get(&ch))
    }

    /// 全部命中次数之和
    pub fn total_matches(&self) -> usize {
        self.categories
            .values()
            .flat_map(|m| m.values())
            .map(MatchEntry::count)
            .sum()
    }
}
