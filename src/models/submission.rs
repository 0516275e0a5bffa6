use std::fmt;

use serde::{Deserialize, Serialize};

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 在文本中查找难度关键字（不区分大小写，按 easy → medium → hard 顺序）
    pub fn find_in(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("easy") {
            return Some(Difficulty::Easy);
        }
        if lower.contains("medium") {
            return Some(Difficulty::Medium);
        }
        if lower.contains("hard") {
            return Some(Difficulty::Hard);
        }
        None
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一次通过的提交
///
/// 由页面监控器从 DOM 中提取，只存在于内存中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSubmission {
    pub problem_title: String,
    pub difficulty: Difficulty,
    pub slug: String,
    pub language: String,
    pub code: String,
    pub url: String,
    /// 毫秒时间戳
    pub timestamp: i64,
}

impl SolutionSubmission {
    /// 去重键：同一题目、同一语言视为同一次提交
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.slug, self.language)
    }

    /// 标题、语言、代码都不为空才值得同步
    pub fn is_actionable(&self) -> bool {
        !self.problem_title.trim().is_empty()
            && !self.language.trim().is_empty()
            && !self.code.trim().is_empty()
    }
}
