//! 仓库路径规则
//!
//! 目录、文件名、扩展名都只由 (目录方式, 难度, slug, 语言) 决定，没有任何外部状态。

use crate::models::{Difficulty, FolderLayout};

/// 平铺方式下使用的固定目录
pub const FLAT_FOLDER: &str = "solutions";
/// 未知语言的扩展名
pub const DEFAULT_EXTENSION: &str = "txt";

/// 语言 → 扩展名
const EXTENSIONS: &[(&str, &str)] = &[
    ("python", "py"),
    ("python3", "py"),
    ("javascript", "js"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("c++", "cpp"),
    ("c", "c"),
    ("c#", "cs"),
    ("go", "go"),
    ("rust", "rs"),
    ("typescript", "ts"),
    ("sql", "sql"),
];

/// 计算目录
pub fn folder_path(layout: FolderLayout, difficulty: Difficulty, slug: &str) -> String {
    match layout {
        FolderLayout::ByDifficulty => difficulty.name().to_lowercase(),
        FolderLayout::Alphabetical => slug
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| FLAT_FOLDER.to_string()),
        FolderLayout::Flat => FLAT_FOLDER.to_string(),
    }
}

/// 语言对应的扩展名，未知语言返回 [`DEFAULT_EXTENSION`]
pub fn extension_for(language: &str) -> &'static str {
    let language = language.trim().to_lowercase();
    EXTENSIONS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}

/// 文件名：`slug.ext`
pub fn file_name(slug: &str, language: &str) -> String {
    format!("{}.{}", slug, extension_for(language))
}

/// 仓库内完整路径：`folder/slug.ext`
pub fn target_path(
    layout: FolderLayout,
    difficulty: Difficulty,
    slug: &str,
    language: &str,
) -> String {
    format!(
        "{}/{}",
        folder_path(layout, difficulty, slug),
        file_name(slug, language)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_difficulty_example() {
        assert_eq!(
            target_path(FolderLayout::ByDifficulty, Difficulty::Easy, "two-sum", "python"),
            "easy/two-sum.py"
        );
    }

    #[test]
    fn test_alphabetical_uses_first_letter() {
        assert_eq!(
            folder_path(FolderLayout::Alphabetical, Difficulty::Hard, "rotate-image"),
            "R"
        );
        assert_eq!(folder_path(FolderLayout::Alphabetical, Difficulty::Hard, ""), "solutions");
    }

    #[test]
    fn test_flat_ignores_difficulty() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(folder_path(FolderLayout::Flat, difficulty, "two-sum"), "solutions");
        }
    }

    #[test]
    fn test_path_is_deterministic() {
        let a = target_path(FolderLayout::Alphabetical, Difficulty::Medium, "lru-cache", "java");
        let b = target_path(FolderLayout::Alphabetical, Difficulty::Medium, "lru-cache", "java");
        assert_eq!(a, b);
        assert_eq!(a, "L/lru-cache.java");
    }

    #[test]
    fn test_extension_lookup_is_total() {
        assert_eq!(extension_for("Python3"), "py");
        assert_eq!(extension_for("c++"), "cpp");
        assert_eq!(extension_for("C#"), "cs");
        assert_eq!(extension_for("rust"), "rs");
        assert_eq!(extension_for("kotlin"), DEFAULT_EXTENSION);
        assert_eq!(extension_for(""), DEFAULT_EXTENSION);
    }
}
