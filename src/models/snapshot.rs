use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `document.querySelector(selector)` 命中的第一个元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementProbe {
    pub text: String,
    pub class_name: String,
}

/// 页面快照
///
/// 由探测脚本一次性采集，之后所有提取逻辑都是对它的纯函数，
/// 不再接触真实页面。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSnapshot {
    pub url: String,
    pub pathname: String,
    pub document_title: String,
    pub body_text: String,
    /// 选择器 → 命中元素；未命中的选择器不出现
    pub elements: HashMap<String, ElementProbe>,
    /// 每个编辑器的 `.view-line` 文本
    pub editor_lines: Vec<Vec<String>>,
    pub textareas: Vec<String>,
    pub pre_blocks: Vec<String>,
    /// `monaco.editor.getModels()[0].getValue()`
    pub monaco_model: Option<String>,
}

impl PageSnapshot {
    pub fn element(&self, selector: &str) -> Option<&ElementProbe> {
        self.elements.get(selector)
    }

    /// 测试和夹具里用来拼装快照
    pub fn with_element(
        mut self,
        selector: &str,
        text: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        self.elements.insert(
            selector.to_string(),
            ElementProbe {
                text: text.into(),
                class_name: class_name.into(),
            },
        );
        self
    }
}

/// 注入脚本记录下来的页面信号，每次读取后清零
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSignals {
    /// 按钮、通知栏和 MutationObserver 已注入（整页刷新后会丢失）
    pub installed: bool,
    /// 用户点击了 ⚡ 按钮
    pub manual_requested: bool,
    /// MutationObserver 看到了可能与提交结果相关的变化
    pub dom_changed: bool,
}
