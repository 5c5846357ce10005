//! Route classification for auth initialization.
//!
//! Public routes never trigger an auth read on mount; everything else does.
//! Exact entries cover individual pages, prefix entries cover route groups.

/// Allow-list of routes exempt from auth initialization.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's stock allow-list: the landing page and the two auth
    /// pages.
    pub fn defaults() -> Self {
        Self::new()
            .with_route("/")
            .with_route("/auth/login")
            .with_route("/auth/verify-otp")
    }

    pub fn with_route(mut self, path: impl Into<String>) -> Self {
        self.exact.push(path.into());
        self
    }

    /// Exempt every path under `prefix`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.exact.iter().any(|route| route == path)
            || self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}
