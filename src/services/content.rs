//! 文件内容生成
//!
//! - 新文件：元信息注释头 + 代码
//! - 已有文件：按 [`ContentMode`] 覆盖或追加，分隔标记取提交时间戳，
//!   同一次提交重复同步得到的内容完全一致

use chrono::{Local, TimeZone};

use crate::models::{ContentMode, RemoteFileHandle, SolutionSubmission};

/// 注释风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `# ...`
    Hash,
    /// `-- ...`
    DoubleDash,
    /// `/* ... */` 与 `// ...`
    CStyle,
}

impl CommentStyle {
    pub fn for_language(language: &str) -> Self {
        match language.trim().to_lowercase().as_str() {
            "python" | "python3" => CommentStyle::Hash,
            "sql" => CommentStyle::DoubleDash,
            _ => CommentStyle::CStyle,
        }
    }

    fn line_prefix(self) -> &'static str {
        match self {
            CommentStyle::Hash => "#",
            CommentStyle::DoubleDash => "--",
            CommentStyle::CStyle => "//",
        }
    }

    fn block(self, lines: &[String]) -> String {
        match self {
            CommentStyle::CStyle => {
                let mut out = String::from("/*\n");
                for line in lines {
                    out.push_str(" * ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str(" */\n");
                out
            }
            _ => lines
                .iter()
                .map(|line| format!("{} {}\n", self.line_prefix(), line))
                .collect(),
        }
    }
}

/// 毫秒时间戳格式化为本地时间，如 `15/02/2026, 15:17:55`
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// 新文件的注释头
pub fn header(submission: &SolutionSubmission) -> String {
    let lines = [
        format!("LeetCode Solution: {}", submission.problem_title),
        format!("Difficulty: {}", submission.difficulty),
        format!("Language: {}", submission.language),
        format!("URL: {}", submission.url),
        format!("Date: {}", format_timestamp(submission.timestamp)),
        "Solution: Initial".to_string(),
    ];
    CommentStyle::for_language(&submission.language).block(&lines)
}

/// 本次提交的分隔标记
pub fn solution_marker(submission: &SolutionSubmission) -> String {
    format!(
        "{} Solution {}",
        CommentStyle::for_language(&submission.language).line_prefix(),
        submission.timestamp
    )
}

/// 新文件的完整内容：注释头 + 代码
pub fn initial_content(submission: &SolutionSubmission) -> String {
    format!("{}\n{}", header(submission), submission.code)
}

/// 生成要写入远端的完整内容
pub fn prepare_file_content(
    submission: &SolutionSubmission,
    existing: &RemoteFileHandle,
    mode: ContentMode,
) -> String {
    let initial = initial_content(submission);
    if !existing.exists() {
        return initial;
    }
    // 文件正是这次提交创建的
    if existing.content.as_deref() == Some(initial.as_str()) {
        return initial;
    }

    let marker = solution_marker(submission);
    match mode {
        ContentMode::Overwrite => format!("{}\n\n{}\n", submission.code, marker),
        ContentMode::Append => {
            let previous = existing.content.as_deref().unwrap_or_default();
            if previous.contains(&marker) {
                return previous.to_string();
            }
            format!("{}\n\n{}\n{}\n", previous.trim_end(), marker, submission.code)
        }
    }
}

/// 提交信息
pub fn commit_message(submission: &SolutionSubmission, existing: &RemoteFileHandle) -> String {
    if existing.exists() {
        format!("Update solution for {}", submission.problem_title)
    } else {
        format!("Add solution for {}", submission.problem_title)
    }
}
