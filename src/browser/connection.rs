use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::AppResult;

/// 标签页 URL 包含这个域名时视为 LeetCode 页面
pub const LEETCODE_HOST: &str = "leetcode.com";

/// 连接到已开启远程调试的浏览器，找到 LeetCode 标签页
///
/// 没有打开的 LeetCode 标签页时新建一个并导航到 `target_url`
pub async fn connect_to_leetcode(port: u16, target_url: &str) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        e
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器同步已有标签页
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    for p in pages.iter() {
        if let Ok(Some(url)) = p.url().await {
            debug!("检查页面: {}", url);
            if is_leetcode_url(&url) {
                info!("✓ 找到 LeetCode 页面: {}", url);
                return Ok((browser, p.clone()));
            }
        }
    }

    debug!("未找到 LeetCode 页面，创建新页面并导航到: {}", target_url);
    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        e
    })?;
    page.goto(target_url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", target_url, e);
        e
    })?;
    info!("已导航到: {}", target_url);

    Ok((browser, page))
}

pub fn is_leetcode_url(url: &str) -> bool {
    url.contains(LEETCODE_HOST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leetcode_url() {
        assert!(is_leetcode_url("https://leetcode.com/problems/two-sum/"));
        assert!(!is_leetcode_url("https://github.com/octocat/leetcode"));
        assert!(!is_leetcode_url("about:blank"));
    }
}
