use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use eyre::{eyre, Result, WrapErr};
use futures_util::StreamExt;

/// Element whose presence signals the page has finished rendering its
/// dynamic content.
const RENDER_MARKER: &str = ".breadCrumb";
const RENDER_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders `url` in a headless Chrome instance and returns the full
/// document markup once the render marker appears.
///
/// The browser is torn down before this returns, whether or not the
/// page loaded. No retry: launch failures, navigation failures and a
/// marker that never appears within the timeout all propagate.
pub async fn fetch_rendered_page(url: &str) -> Result<String> {
    let config = BrowserConfig::builder()
        .no_sandbox()
        .arg("--disable-dev-shm-usage")
        .build()
        .map_err(|e| eyre!(e))?;
    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .wrap_err("failed to launch headless browser")?;
    let events = tokio::spawn(async move { while handler.next().await.is_some() {} });

    let outcome = render_page(&browser, url).await;

    browser.close().await.ok();
    browser.wait().await.ok();
    events.abort();

    outcome
}

async fn render_page(browser: &Browser, url: &str) -> Result<String> {
    let page = browser.new_page(url).await?;
    wait_for_element(&page, RENDER_MARKER).await?;
    Ok(page.content().await?)
}

/// Polls for `selector` until it resolves or `RENDER_TIMEOUT` elapses.
async fn wait_for_element(page: &Page, selector: &str) -> Result<()> {
    tokio::time::timeout(RENDER_TIMEOUT, async {
        while page.find_element(selector).await.is_err() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
    .map_err(|_| eyre!("element {selector:?} did not appear within {RENDER_TIMEOUT:?}"))
}
