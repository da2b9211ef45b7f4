//! Upstream BCB data: the Meta Selic series (SGS) and market expectations (Olinda).
//!
//! Both endpoints publish Brazilian-locale text, which goes through
//! `normalize` before anything else sees it.

pub mod expectations;
pub mod normalize;
pub mod sgs;

pub use expectations::{ExpectationsClient, MarketExpectation};
pub use normalize::{SgsRow, normalize_rows, parse_br_date, parse_br_decimal};
pub use sgs::SgsClient;

/// Read a URL override from the environment, falling back to `default`.
pub(crate) fn url_from_env(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => {
            log::debug!("using {var} override: {v}");
            v.trim().to_string()
        }
        _ => default.to_string(),
    }
}
