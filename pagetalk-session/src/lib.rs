//! Session-scoped context store.
//!
//! Binds an opaque session identifier to the single most recent scraped
//! document, with a TTL. A new scrape for the same session replaces the
//! prior entry wholesale; a `get` miss (never scraped, or expired) is a
//! normal outcome that callers turn into a "scrape a page first" reply.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use pagetalk_extract::ScrapedDocument;

/// Default entry lifetime, matching the reference deployment.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug)]
struct SessionContext {
    document: ScrapedDocument,
    expires_at: Instant,
}

/// In-memory session context store. Entries are independent per key;
/// replace-on-write is atomic at entry granularity (last writer wins).
#[derive(Debug)]
pub struct SessionStore {
    entries: DashMap<String, SessionContext>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Bind `document` to `session_id`, replacing any existing context and
    /// resetting the TTL.
    pub fn put(&self, session_id: &str, document: ScrapedDocument) {
        self.put_at(session_id, document, Instant::now());
    }

    /// Fetch the current context for `session_id`, if any. Expired entries
    /// are removed lazily here and reported as absent.
    pub fn get(&self, session_id: &str) -> Option<ScrapedDocument> {
        self.get_at(session_id, Instant::now())
    }

    /// Drop the context for `session_id`, if present.
    pub fn invalidate(&self, session_id: &str) {
        if self.entries.remove(session_id).is_some() {
            tracing::debug!(session_id, "session.invalidated");
        }
    }

    fn put_at(&self, session_id: &str, document: ScrapedDocument, now: Instant) {
        tracing::debug!(
            session_id,
            source_url = %document.source_url,
            content_len = document.content.len(),
            "session.put"
        );
        self.entries.insert(
            session_id.to_string(),
            SessionContext {
                document,
                expires_at: now + self.ttl,
            },
        );
    }

    fn get_at(&self, session_id: &str, now: Instant) -> Option<ScrapedDocument> {
        let expired = match self.entries.get(session_id) {
            None => return None,
            Some(entry) if now < entry.expires_at => {
                return Some(entry.document.clone());
            }
            Some(_) => true,
        };

        if expired {
            // The read guard is released above; safe to take the write lock.
            self.entries.remove(session_id);
            tracing::debug!(session_id, "session.expired");
        }
        None
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
