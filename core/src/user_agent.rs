//! User-Agent selection.
//!
//! The rotating pool is cosmetic traffic shaping: one entry is picked when a
//! client is built and sent with every request that client makes. Nothing
//! relies on it for correctness.

use rand::seq::SliceRandom;

/// Browser identification strings used by `UserAgent::default()`.
pub const DEFAULT_POOL: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
];

/// How the client identifies itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgent {
    /// Send no `User-Agent` header of our own; the transport's default applies.
    Disabled,
    /// Always send this value.
    Fixed(String),
    /// Pick one entry at random per client. An empty pool behaves like `Disabled`.
    Rotating(Vec<String>),
}

impl Default for UserAgent {
    fn default() -> Self {
        UserAgent::Rotating(DEFAULT_POOL.iter().map(|s| (*s).to_string()).collect())
    }
}

impl UserAgent {
    /// Resolve the policy to the header value a new client should send.
    pub fn resolve(&self) -> Option<String> {
        match self {
            UserAgent::Disabled => None,
            UserAgent::Fixed(value) => Some(value.clone()),
            UserAgent::Rotating(pool) => pool.choose(&mut rand::thread_rng()).cloned(),
        }
    }
}
