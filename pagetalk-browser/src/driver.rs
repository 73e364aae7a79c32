//! Fantoccini-backed page loader.

use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use webdriver::capabilities::Capabilities;

use crate::{BrowserError, LoadedPage, PageLoader, PAGE_READY_TIMEOUT};

/// Loads pages through a running WebDriver service, one short-lived
/// browser session per call.
pub struct WebDriverLoader {
    webdriver_url: String,
    headless: bool,
}

impl WebDriverLoader {
    pub fn new(webdriver_url: impl Into<String>, headless: bool) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            headless,
        }
    }

    async fn connect(&self) -> Result<Client, BrowserError> {
        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];
        if self.headless {
            args.push("--headless".to_string());
            args.push("--disable-gpu".to_string());
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        ClientBuilder::native()
            .capabilities(caps)
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| BrowserError::Driver(e.to_string()))
    }

    /// Navigate and capture the page source once the body is present.
    async fn capture(client: &Client, url: &str) -> Result<String, BrowserError> {
        client.goto(url).await.map_err(cmd_to_browser)?;

        client
            .wait()
            .at_most(PAGE_READY_TIMEOUT)
            .for_element(Locator::Css("body"))
            .await
            .map_err(cmd_to_browser)?;

        client.source().await.map_err(cmd_to_browser)
    }
}

#[async_trait::async_trait]
impl PageLoader for WebDriverLoader {
    async fn load(&self, url: &str) -> Result<LoadedPage, BrowserError> {
        let client = self.connect().await?;
        tracing::debug!(url, headless = self.headless, "browser.session.opened");

        let result = Self::capture(&client, url).await;

        // The session must be released on every exit path; a leaked
        // browser process outlives the request.
        if let Err(err) = client.close().await {
            tracing::warn!(error = %err, "browser.session.close_failed");
        }

        match &result {
            Ok(html) => tracing::debug!(url, html_len = html.len(), "browser.page.captured"),
            Err(err) => tracing::warn!(url, error = %err, "browser.page.failed"),
        }
        result.map(|html| LoadedPage { html })
    }
}

fn cmd_to_browser(e: CmdError) -> BrowserError {
    match e {
        CmdError::WaitTimeout => BrowserError::Timeout,
        other => BrowserError::Driver(other.to_string()),
    }
}
