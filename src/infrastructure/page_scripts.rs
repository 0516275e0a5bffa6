//! 注入页面的脚本
//!
//! 所有插值都经过 `serde_json::to_string`，不会破坏脚本结构。

use serde_json::json;

/// 页面内共享状态挂在这个全局变量上
const STATE_VAR: &str = "window.__leetcodeSync";

const OVERLAY_CSS: &str = r#"
#leetcode-sync-button{position:fixed;right:24px;bottom:24px;z-index:99999;width:44px;height:44px;border-radius:50%;background:#24292f;color:#fff;font-size:22px;line-height:44px;text-align:center;cursor:pointer;box-shadow:0 2px 8px rgba(0,0,0,.3);transition:background .3s}
#leetcode-sync-button.sync-success{background:#2da44e}
#leetcode-sync-notifications{position:fixed;right:24px;bottom:80px;z-index:99999;display:flex;flex-direction:column;gap:8px}
.leetcode-notification{padding:10px 14px;border-radius:6px;color:#fff;font-size:13px;opacity:0;transform:translateY(8px);transition:opacity .3s,transform .3s;max-width:320px}
.leetcode-notification.show{opacity:1;transform:none}
.leetcode-notification-success{background:#2da44e}
.leetcode-notification-info{background:#0969da}
.leetcode-notification-warning{background:#bf8700}
.leetcode-notification-error{background:#cf222e}
"#;

/// 采集页面快照
///
/// `selectors` 中每个选择器只取第一个命中的元素
pub fn snapshot_script(selectors: &[&str]) -> String {
    let selectors_json = json!(selectors).to_string();
    format!(
        r#"
        (() => {{
            const selectors = {selectors_json};
            const elements = {{}};
            for (const sel of selectors) {{
                try {{
                    const el = document.querySelector(sel);
                    if (el) {{
                        const cls = typeof el.className === "string" ? el.className : (el.getAttribute("class") || "");
                        elements[sel] = {{ text: el.textContent || "", className: cls }};
                    }}
                }} catch (err) {{}}
            }}
            const editorLines = Array.from(document.querySelectorAll(".monaco-editor")).map(ed => {{
                const view = ed.querySelector(".view-lines");
                return view ? Array.from(view.querySelectorAll(".view-line")).map(l => l.textContent || "") : [];
            }});
            let monacoModel = null;
            try {{
                const model = window.monaco && window.monaco.editor.getModels()[0];
                if (model) monacoModel = model.getValue();
            }} catch (err) {{}}
            return {{
                url: location.href,
                pathname: location.pathname,
                documentTitle: document.title || "",
                bodyText: document.body ? (document.body.innerText || "").slice(0, 50000) : "",
                elements,
                editorLines,
                textareas: Array.from(document.querySelectorAll("textarea")).map(t => t.value || ""),
                preBlocks: Array.from(document.querySelectorAll("pre")).map(p => p.textContent || ""),
                monacoModel
            }};
        }})()
        "#
    )
}

/// 注入 ⚡ 按钮、通知栏和 MutationObserver；已注入时什么都不做
pub fn install_overlay_script() -> String {
    let css_json = json!(OVERLAY_CSS).to_string();
    format!(
        r#"
        (() => {{
            if ({STATE_VAR} && document.getElementById("leetcode-sync-button")) return false;
            const state = {STATE_VAR} = {{ manual: false, dirty: false }};

            const style = document.createElement("style");
            style.id = "leetcode-sync-style";
            style.textContent = {css_json};
            document.head.appendChild(style);

            const button = document.createElement("div");
            button.id = "leetcode-sync-button";
            button.textContent = "⚡";
            button.title = "Sync to GitHub";
            button.addEventListener("click", () => {{ state.manual = true; }});
            document.body.appendChild(button);

            const tray = document.createElement("div");
            tray.id = "leetcode-sync-notifications";
            document.body.appendChild(tray);

            const observer = new MutationObserver(mutations => {{
                for (const m of mutations) {{
                    if (m.type !== "childList") continue;
                    for (const node of m.addedNodes) {{
                        if (node.nodeType !== Node.ELEMENT_NODE) continue;
                        if (node.matches('[data-e2e-locator="submission-result"]') ||
                            node.querySelector('[data-e2e-locator="submission-result"]') ||
                            (node.classList && node.classList.contains("success")) ||
                            (node.textContent || "").includes("Accepted")) {{
                            state.dirty = true;
                            return;
                        }}
                    }}
                }}
            }});
            const root = document.querySelector('[data-theme="dark"]') || document.querySelector(".main-content") || document.body;
            observer.observe(root, {{ childList: true, subtree: true, attributes: true, attributeFilter: ["class", "data-e2e-locator"] }});
            return true;
        }})()
        "#
    )
}

/// 读取并清零页面信号
pub fn take_signals_script() -> String {
    format!(
        r#"
        (() => {{
            const state = {STATE_VAR};
            if (!state || !document.getElementById("leetcode-sync-button")) return {{ installed: false }};
            const signals = {{ installed: true, manualRequested: state.manual, domChanged: state.dirty }};
            state.manual = false;
            state.dirty = false;
            return signals;
        }})()
        "#
    )
}

/// 在通知栏显示一条 4 秒后淡出的通知
pub fn notification_script(message: &str, level: &str) -> String {
    let message_json = json!(message).to_string();
    let level_json = json!(level).to_string();
    format!(
        r#"
        (() => {{
            const tray = document.getElementById("leetcode-sync-notifications");
            if (!tray) return false;
            const n = document.createElement("div");
            n.className = "leetcode-notification leetcode-notification-" + {level_json};
            n.textContent = {message_json};
            tray.appendChild(n);
            setTimeout(() => n.classList.add("show"), 10);
            setTimeout(() => {{
                n.classList.remove("show");
                setTimeout(() => n.remove(), 300);
            }}, 4000);
            return true;
        }})()
        "#
    )
}

/// 同步成功后按钮闪一下绿色
pub fn flash_success_script() -> String {
    r#"
    (() => {
        const button = document.getElementById("leetcode-sync-button");
        if (!button) return false;
        button.classList.add("sync-success");
        setTimeout(() => button.classList.remove("sync-success"), 2000);
        return true;
    })()
    "#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_script_embeds_selectors_as_json() {
        let script = snapshot_script(&[r#"[data-e2e-locator="submission-result"]"#, "h1"]);
        assert!(script.contains(r#"["[data-e2e-locator=\"submission-result\"]","h1"]"#));
        assert!(script.contains("documentTitle"));
    }

    #[test]
    fn test_notification_script_escapes_message() {
        let script = notification_script("Sync failed: \"quoted\" </script>", "error");
        assert!(script.contains(r#""Sync failed: \"quoted\" </script>""#));
        assert!(script.contains(r#"+ "error""#));
    }

    #[test]
    fn test_state_variable_shared() {
        assert!(install_overlay_script().contains(STATE_VAR));
        assert!(take_signals_script().contains(STATE_VAR));
    }
}
