//! Page-loading capability for the scrape pipeline.
//!
//! The core depends on page loading through the narrow [`PageLoader`]
//! trait so tests can substitute synthetic DOMs without driving a real
//! browser. [`driver::WebDriverLoader`] is the production implementation
//! over a chromedriver-compatible WebDriver service.

pub mod driver;

use async_trait::async_trait;

pub use driver::WebDriverLoader;

/// Default WebDriver service endpoint (chromedriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// How long we wait for the page's `body` element before giving up.
pub const PAGE_READY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(thiserror::Error, Debug)]
pub enum BrowserError {
    /// The page never reached the minimal readiness signal in time. Not
    /// retried; callers surface it as a user-facing failure.
    #[error("Timeout while loading the page")]
    Timeout,

    #[error("WebDriver error: {0}")]
    Driver(String),
}

/// A successfully loaded page. Only the serialized DOM crosses this
/// boundary; the browser session itself never escapes the loader.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub html: String,
}

/// Capability to turn a URL into a loaded DOM.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<LoadedPage, BrowserError>;
}
