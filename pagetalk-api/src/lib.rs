//! HTTP surface for the scrape-and-ask service.
//!
//! Two JSON operations plus a health probe:
//! - `POST /scrape` `{url}` — load, extract, bound, summarize, and bind the
//!   page to the caller's session
//! - `POST /chat` `{query}` — answer a question grounded in the session's
//!   most recent page
//!
//! Session binding rides an opaque, MAC-authenticated cookie; handlers only
//! ever see the resolved session id.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod session_cookie;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
