//! End-to-end handler flows over a bound listener, with a synthetic page
//! loader and a stub inference backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pagetalk_api::{router, AppState};
use pagetalk_browser::{BrowserError, LoadedPage, PageLoader};
use pagetalk_llm::prompt::ConstrainedPrompt;
use pagetalk_llm::traits::{LlmClient, LlmError};
use pagetalk_session::SessionStore;
use serde_json::{json, Value};

const ARTICLE_HTML: &str = r#"
<html>
  <head>
    <title>Rust in Production</title>
    <meta name="description" content="Case studies of Rust deployments">
  </head>
  <body>
    <article>
      <h1>Rust in Production</h1>
      <p>Company A ships Rust services.</p>
      <p>Company B does too.</p>
    </article>
  </body>
</html>"#;

/// Page loader double keyed by URL.
enum PageBehavior {
    Html(&'static str),
    Timeout,
    DriverFailure(&'static str),
}

struct StubLoader {
    pages: Vec<(&'static str, PageBehavior)>,
}

#[async_trait]
impl PageLoader for StubLoader {
    async fn load(&self, url: &str) -> Result<LoadedPage, BrowserError> {
        for (known, behavior) in &self.pages {
            if *known == url {
                return match behavior {
                    PageBehavior::Html(html) => Ok(LoadedPage {
                        html: html.to_string(),
                    }),
                    PageBehavior::Timeout => Err(BrowserError::Timeout),
                    PageBehavior::DriverFailure(message) => {
                        Err(BrowserError::Driver(message.to_string()))
                    }
                };
            }
        }
        Err(BrowserError::Driver(format!("unknown url: {url}")))
    }
}

/// Inference double that counts calls and can be forced to fail.
struct StubLlm {
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl StubLlm {
    fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn complete(&self, prompt: &ConstrainedPrompt) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(LlmError::Backend(message.clone()));
        }
        if prompt.user.starts_with("Please summarize") {
            Ok("Stub summary.".to_string())
        } else {
            Ok("Stub answer.".to_string())
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn article_loader() -> StubLoader {
    StubLoader {
        pages: vec![
            ("https://a.example/post", PageBehavior::Html(ARTICLE_HTML)),
            (
                "https://b.example/other",
                PageBehavior::Html(
                    "<html><head><title>Other</title></head>\
                     <body><main><p>Entirely different page.</p></main></body></html>",
                ),
            ),
            ("https://slow.example", PageBehavior::Timeout),
            (
                "https://crashy.example",
                PageBehavior::DriverFailure("chrome crashed"),
            ),
            (
                "https://blank.example",
                PageBehavior::Html("<html><body><div><span>nothing</span></div></body></html>"),
            ),
        ],
    }
}

async fn spawn_app(llm: Arc<StubLlm>) -> String {
    let state = Arc::new(AppState::new(
        SessionStore::default(),
        llm,
        Arc::new(article_loader()),
        12_000,
        "integration-test-secret",
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("serve");
    });
    format!("http://{addr}")
}

fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("set-cookie")?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

#[tokio::test]
async fn scrape_returns_summary_and_issues_a_session_cookie() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://a.example/post"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let cookie = session_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with("pagetalk_session="));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Website scraped successfully!");
    assert_eq!(body["summary"], "Stub summary.");
    assert_eq!(body["source_url"], "https://a.example/post");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn scrape_without_url_is_rejected_before_any_work() {
    let llm = Arc::new(StubLlm::ok());
    let base = spawn_app(llm.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/scrape"))
        .json(&json!({"url": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No URL provided");
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn page_timeout_is_a_content_error() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://slow.example"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Could not extract content from the provided URL");
}

#[tokio::test]
async fn driver_failure_is_a_content_error_without_the_driver_detail() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://crashy.example"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Could not extract content from the provided URL");
}

#[tokio::test]
async fn unextractable_page_is_a_content_error() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://blank.example"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Could not extract content from the provided URL");
}

#[tokio::test]
async fn chat_before_any_scrape_never_reaches_the_backend() {
    let llm = Arc::new(StubLlm::ok());
    let base = spawn_app(llm.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&json!({"query": "what is this about?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please scrape a website first");
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_without_a_question_is_rejected() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&json!({"query": "   "}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No question provided");
}

#[tokio::test]
async fn scrape_then_chat_answers_from_the_bound_session() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;
    let client = reqwest::Client::new();

    let scrape = client
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://a.example/post"}))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&scrape).expect("session cookie");

    let chat = client
        .post(format!("{base}/chat"))
        .header("cookie", &cookie)
        .json(&json!({"query": "who ships Rust?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(chat.status(), 200);
    let body: Value = chat.json().await.unwrap();
    assert_eq!(body["answer"], "Stub answer.");
    assert_eq!(body["source_url"], "https://a.example/post");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn a_second_scrape_replaces_the_session_context() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;
    let client = reqwest::Client::new();

    let first = client
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://a.example/post"}))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&first).expect("session cookie");

    client
        .post(format!("{base}/scrape"))
        .header("cookie", &cookie)
        .json(&json!({"url": "https://b.example/other"}))
        .send()
        .await
        .unwrap();

    let chat = client
        .post(format!("{base}/chat"))
        .header("cookie", &cookie)
        .json(&json!({"query": "which page is bound?"}))
        .send()
        .await
        .unwrap();

    let body: Value = chat.json().await.unwrap();
    assert_eq!(body["source_url"], "https://b.example/other");
}

#[tokio::test]
async fn forged_session_cookies_read_as_no_session() {
    let base = spawn_app(Arc::new(StubLlm::ok())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .header("cookie", "pagetalk_session=forged.deadbeef")
        .json(&json!({"query": "anything?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please scrape a website first");
}

#[tokio::test]
async fn backend_failure_surfaces_the_upstream_message() {
    let base = spawn_app(Arc::new(StubLlm::failing("model overloaded"))).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/scrape"))
        .json(&json!({"url": "https://a.example/post"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Inference backend error: model overloaded");
}
