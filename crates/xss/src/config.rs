//! Resolver configuration.
//!
//! A [`ResolverConfig`] carries everything the standard pipeline and the
//! extension store need to know about the host:
//!
//! - `platform`: selects platform-specific expansions (elevation)
//! - `ignore_prefixes`: entry and property name prefixes that never reach
//!   the renderer
//! - `focus_limit`: how many distinct focus overrides are kept per identity

use crate::types::Platform;

/// Prefixes stripped by default: attribute and id selectors, global and
/// keyframe blocks, and nested `&` selectors.
pub const DEFAULT_IGNORE_PREFIXES: [&str; 5] = ["[", "#", "@global", "@keyframes", "&"];

/// Default cap on focus overrides per identity.
pub const DEFAULT_FOCUS_LIMIT: usize = 16;

/// # Example
///
/// ```
/// use xss::{Platform, ResolverConfig};
///
/// let config = ResolverConfig::default()
///     .with_platform(Platform::Android)
///     .with_focus_limit(4);
/// assert_eq!(config.platform, Platform::Android);
/// assert_eq!(config.ignore_prefixes.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub platform: Platform,
    pub ignore_prefixes: Vec<String>,
    pub focus_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            ignore_prefixes: DEFAULT_IGNORE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            focus_limit: DEFAULT_FOCUS_LIMIT,
        }
    }
}

impl ResolverConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_ignore_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// A limit of zero is treated as one.
    pub fn with_focus_limit(mut self, focus_limit: usize) -> Self {
        self.focus_limit = focus_limit.max(1);
        self
    }
}
