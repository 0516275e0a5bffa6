//! 提交信息提取 - 业务能力层
//!
//! 对 [`PageSnapshot`] 的纯函数。每个字段都是一串按优先级排列的探测，
//! 第一个成功的探测胜出，全部失败时使用启发式判断，最后才是默认值。

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Difficulty, PageSnapshot, SolutionSubmission};

/// 提交状态
pub const STATUS_SELECTORS: &[&str] = &[
    r#"[data-e2e-locator="submission-result"]"#,
    ".success",
    r#"[data-status="accepted"]"#,
    ".submission-result",
    ".e2e-locator-submission-result",
];

/// 题目标题
pub const TITLE_SELECTORS: &[&str] = &[
    r#"[data-e2e-locator="question-title"]"#,
    ".question-title",
    "h1",
    ".css-v3d350",
    r#"[data-cy="question-title"]"#,
];

/// 难度
pub const DIFFICULTY_SELECTORS: &[&str] = &[
    r#"[data-e2e-locator="question-difficulty"]"#,
    ".difficulty",
    ".css-t42afm",
    "[data-difficulty]",
];

/// 语言
pub const LANGUAGE_SELECTORS: &[&str] = &[
    r#"[data-e2e-locator="editor-language"]"#,
    ".editor-language",
    ".language-selector",
    ".cm-editor",
];

/// 语言候选，按顺序匹配
pub const KNOWN_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "java",
    "cpp",
    "c++",
    "c",
    "c#",
    "go",
    "rust",
    "typescript",
    "sql",
];

/// 编辑器里显示的 SQL 方言名，统一按 sql 处理
const SQL_DIALECTS: &[&str] = &["mysql", "postgresql", "mssql", "oraclesql", "oracle"];

pub const DEFAULT_SLUG: &str = "unknown-problem";
pub const DEFAULT_LANGUAGE: &str = "python";
/// 少于这个长度的代码片段视为无效
const MIN_CODE_LEN: usize = 10;

/// 探测脚本需要查询的全部选择器
pub fn all_selectors() -> Vec<&'static str> {
    [STATUS_SELECTORS, TITLE_SELECTORS, DIFFICULTY_SELECTORS, LANGUAGE_SELECTORS]
        .concat()
}

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// 页面上没有通过的提交
    NotAccepted,
    /// 已通过，但缺少必需字段
    Incomplete { missing: Vec<&'static str> },
    /// 可以同步
    Ready(SolutionSubmission),
}

/// 从快照中提取一次提交
pub fn extract(snapshot: &PageSnapshot, timestamp_ms: i64) -> Extraction {
    if !is_accepted(snapshot) {
        return Extraction::NotAccepted;
    }

    let title = extract_title(snapshot);
    let code = extract_code(snapshot);
    let language = extract_language(snapshot, code.as_deref());

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("problemTitle");
    }
    if code.is_none() {
        missing.push("code");
    }
    let (Some(problem_title), Some(code)) = (title, code) else {
        return Extraction::Incomplete { missing };
    };

    Extraction::Ready(SolutionSubmission {
        problem_title,
        difficulty: extract_difficulty(snapshot),
        slug: extract_slug(snapshot),
        language,
        code,
        url: snapshot.url.clone(),
        timestamp: timestamp_ms,
    })
}

// ========== 状态 ==========

/// 依次检查状态选择器；命中但未通过的元素不终止，继续看下一个
pub fn is_accepted(snapshot: &PageSnapshot) -> bool {
    STATUS_SELECTORS
        .iter()
        .filter_map(|selector| snapshot.element(selector))
        .any(|element| {
            let text = element.text.to_lowercase();
            let class_name = element.class_name.to_lowercase();
            text.contains("accepted")
                || class_name.contains("success")
                || class_name.contains("accepted")
        })
}

// ========== 标题 ==========

pub fn title_from_selectors(snapshot: &PageSnapshot) -> Option<String> {
    TITLE_SELECTORS.iter().find_map(|selector| {
        snapshot
            .element(selector)
            .map(|e| e.text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

pub fn title_from_document(snapshot: &PageSnapshot) -> Option<String> {
    let title = snapshot.document_title.trim();
    if !title.contains("LeetCode") {
        return None;
    }
    Some(title.replace(" - LeetCode", "").trim().to_string()).filter(|t| !t.is_empty())
}

pub fn extract_title(snapshot: &PageSnapshot) -> Option<String> {
    title_from_selectors(snapshot).or_else(|| title_from_document(snapshot))
}

// ========== 难度 ==========

pub fn difficulty_from_selectors(snapshot: &PageSnapshot) -> Option<Difficulty> {
    DIFFICULTY_SELECTORS
        .iter()
        .filter_map(|selector| snapshot.element(selector))
        .find_map(|element| Difficulty::find_in(&element.text))
}

pub fn difficulty_from_body(snapshot: &PageSnapshot) -> Option<Difficulty> {
    let body = snapshot.body_text.to_lowercase();
    [
        ("difficulty: easy", Difficulty::Easy),
        ("difficulty: medium", Difficulty::Medium),
        ("difficulty: hard", Difficulty::Hard),
    ]
    .into_iter()
    .find(|(needle, _)| body.contains(needle))
    .map(|(_, difficulty)| difficulty)
}

pub fn extract_difficulty(snapshot: &PageSnapshot) -> Difficulty {
    difficulty_from_selectors(snapshot)
        .or_else(|| difficulty_from_body(snapshot))
        .unwrap_or_default()
}

// ========== slug ==========

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/problems/([^/]+)").expect("valid slug regex"))
}

pub fn extract_slug(snapshot: &PageSnapshot) -> String {
    slug_regex()
        .captures(&snapshot.pathname)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_SLUG.to_string())
}

// ========== 语言 ==========

/// 在一段文本里找已知语言
///
/// 先切词再比较，`TypeScript` 不会因为包含字母 c 被识别成 `c`；
/// `python3` 这类带版本号的写法按前缀归一。
pub fn find_language(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.iter().any(|token| SQL_DIALECTS.contains(token)) {
        return Some("sql");
    }

    KNOWN_LANGUAGES
        .iter()
        .copied()
        .find(|lang| tokens.iter().any(|token| matches_language(token, lang)))
        .map(|lang| if lang == "c++" { "cpp" } else { lang })
}

fn matches_language(token: &str, lang: &str) -> bool {
    token == lang
        || token
            .strip_prefix(lang)
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

pub fn language_from_selectors(snapshot: &PageSnapshot) -> Option<&'static str> {
    LANGUAGE_SELECTORS
        .iter()
        .filter_map(|selector| snapshot.element(selector))
        .find_map(|element| find_language(&element.text))
}

/// 根据代码特征猜语言
pub fn language_from_code(code: &str) -> Option<&'static str> {
    if code.contains("def ") && code.contains(':') {
        return Some("python");
    }
    if code.contains("function ") || code.contains("const ") {
        return Some("javascript");
    }
    if code.contains("public class") {
        return Some("java");
    }
    if code.contains("#include") {
        return Some("cpp");
    }
    None
}

pub fn extract_language(snapshot: &PageSnapshot, code: Option<&str>) -> String {
    language_from_selectors(snapshot)
        .or_else(|| code.and_then(language_from_code))
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

// ========== 代码 ==========

fn long_enough(code: &str) -> bool {
    code.len() > MIN_CODE_LEN
}

pub fn code_from_editor(snapshot: &PageSnapshot) -> Option<String> {
    snapshot
        .editor_lines
        .iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n").trim().to_string())
        .find(|code| long_enough(code))
}

pub fn code_from_textareas(snapshot: &PageSnapshot) -> Option<String> {
    snapshot
        .textareas
        .iter()
        .find(|value| long_enough(value))
        .map(|value| value.trim().to_string())
}

pub fn code_from_pre(snapshot: &PageSnapshot) -> Option<String> {
    snapshot
        .pre_blocks
        .iter()
        .map(|text| text.trim())
        .find(|text| long_enough(text))
        .map(str::to_string)
}

pub fn code_from_monaco_model(snapshot: &PageSnapshot) -> Option<String> {
    snapshot
        .monaco_model
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

pub fn extract_code(snapshot: &PageSnapshot) -> Option<String> {
    code_from_editor(snapshot)
        .or_else(|| code_from_textareas(snapshot))
        .or_else(|| code_from_pre(snapshot))
        .or_else(|| code_from_monaco_model(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PY_CODE: &[&str] = &[
        "class Solution:",
        "    def twoSum(self, nums, target):",
        "        return []",
    ];

    fn accepted_page() -> PageSnapshot {
        PageSnapshot {
            url: "https://leetcode.com/problems/two-sum/submissions/1919974430/".to_string(),
            pathname: "/problems/two-sum/submissions/1919974430/".to_string(),
            document_title: "Two Sum - LeetCode".to_string(),
            editor_lines: vec![PY_CODE.iter().map(|s| s.to_string()).collect()],
            ..Default::default()
        }
        .with_element(r#"[data-e2e-locator="submission-result"]"#, "Accepted", "text-green-s")
        .with_element(r#"[data-e2e-locator="question-title"]"#, "  1. Two Sum ", "")
        .with_element(".difficulty", "Easy", "")
        .with_element(".editor-language", "Python3", "")
    }

    #[test]
    fn test_extract_full_page() {
        let Extraction::Ready(sub) = extract(&accepted_page(), 42) else {
            panic!("应该提取成功");
        };
        assert_eq!(sub.problem_title, "1. Two Sum");
        assert_eq!(sub.difficulty, Difficulty::Easy);
        assert_eq!(sub.slug, "two-sum");
        assert_eq!(sub.language, "python");
        assert_eq!(sub.code, PY_CODE.join("\n"));
        assert_eq!(sub.timestamp, 42);
    }

    #[test]
    fn test_not_accepted() {
        let page = PageSnapshot::default().with_element(
            r#"[data-e2e-locator="submission-result"]"#,
            "Wrong Answer",
            "text-red-s",
        );
        assert_eq!(extract(&page, 0), Extraction::NotAccepted);
    }

    #[test]
    fn test_rejected_candidate_falls_through() {
        let page = PageSnapshot::default()
            .with_element(r#"[data-e2e-locator="submission-result"]"#, "Runtime Error", "")
            .with_element(".submission-result", "", "result ACCEPTED");
        assert!(is_accepted(&page));
    }

    #[test]
    fn test_success_class_counts_as_accepted() {
        let page = PageSnapshot::default().with_element(".success", "", "success");
        assert!(is_accepted(&page));
    }

    #[test]
    fn test_incomplete_when_code_missing() {
        let mut page = accepted_page();
        page.editor_lines.clear();
        assert_eq!(
            extract(&page, 0),
            Extraction::Incomplete {
                missing: vec!["code"]
            }
        );
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let page = PageSnapshot {
            document_title: "Rotate Image - LeetCode".to_string(),
            ..Default::default()
        }
        .with_element("h1", "   ", "");
        assert_eq!(extract_title(&page).as_deref(), Some("Rotate Image"));

        let other = PageSnapshot {
            document_title: "Some Blog".to_string(),
            ..Default::default()
        };
        assert_eq!(extract_title(&other), None);
    }

    #[test]
    fn test_difficulty_fallbacks() {
        let body = PageSnapshot {
            body_text: "Topics ... Difficulty: Hard ...".to_string(),
            ..Default::default()
        };
        assert_eq!(extract_difficulty(&body), Difficulty::Hard);
        assert_eq!(extract_difficulty(&PageSnapshot::default()), Difficulty::Medium);
    }

    #[test]
    fn test_slug_default() {
        let page = PageSnapshot {
            pathname: "/problemset/all/".to_string(),
            ..Default::default()
        };
        assert_eq!(extract_slug(&page), DEFAULT_SLUG);
    }

    #[test]
    fn test_find_language() {
        assert_eq!(find_language("Python3"), Some("python"));
        assert_eq!(find_language("C++"), Some("cpp"));
        assert_eq!(find_language("TypeScript"), Some("typescript"));
        assert_eq!(find_language("JavaScript"), Some("javascript"));
        assert_eq!(find_language("C#"), Some("c#"));
        assert_eq!(find_language("Auto"), None);
    }

    #[test]
    fn test_sql_dialects_map_to_sql() {
        assert_eq!(find_language("MySQL"), Some("sql"));
        assert_eq!(find_language("PostgreSQL"), Some("sql"));
        assert_eq!(find_language("MS SQL Server"), Some("sql"));
        assert_eq!(find_language("MSSQL"), Some("sql"));
        assert_eq!(find_language("Oracle"), Some("sql"));

        let page = PageSnapshot::default().with_element(".editor-language", "MySQL", "");
        assert_eq!(extract_language(&page, Some("SELECT name FROM Employee")), "sql");
    }

    #[test]
    fn test_language_from_code_heuristics() {
        assert_eq!(language_from_code("#include <vector>\nint main() {}"), Some("cpp"));
        assert_eq!(language_from_code("public class Solution {}"), Some("java"));
        assert_eq!(language_from_code("const f = () => 1;"), Some("javascript"));
        assert_eq!(language_from_code("SELECT name FROM t"), None);
    }

    #[test]
    fn test_language_default() {
        let page = PageSnapshot::default();
        assert_eq!(extract_language(&page, Some("SELECT 1")), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_code_fallback_order() {
        let page = PageSnapshot {
            editor_lines: vec![vec!["x".to_string()]],
            textareas: vec!["short".to_string(), "  SELECT name FROM Employee;  ".to_string()],
            pre_blocks: vec!["ignored because textarea wins".to_string()],
            ..Default::default()
        };
        assert_eq!(extract_code(&page).as_deref(), Some("SELECT name FROM Employee;"));

        let monaco_only = PageSnapshot {
            monaco_model: Some("  x = 1\n".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_code(&monaco_only).as_deref(), Some("x = 1"));
    }

    #[test]
    fn test_all_selectors_cover_every_chain() {
        let selectors = all_selectors();
        assert_eq!(
            selectors.len(),
            STATUS_SELECTORS.len()
                + TITLE_SELECTORS.len()
                + DIFFICULTY_SELECTORS.len()
                + LANGUAGE_SELECTORS.len()
        );
        assert!(selectors.contains(&"h1"));
    }
}
