//! # siteeksen_core
//!
//! Core logic for the SiteEksen admin panel: credential handling, session
//! issuing and signing, and the typed client for the resource API.

pub mod auth;
pub mod client;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
