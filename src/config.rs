//! # Facade configuration.
//!
//! [`Config`] holds the settings shared by every logging call made through a
//! [`Cedar`](crate::Cedar) instance.
//!
//! ## Sentinel values
//! - an empty `default_tag` falls back to [`DEFAULT_TAG`]
//! - a call-site tag of `""` is treated as "no tag" and resolves to the default

/// Tag used when neither the call site nor the config provides one.
pub const DEFAULT_TAG: &str = "AppLogger";

/// Configuration for a [`Cedar`](crate::Cedar) facade.
///
/// ## Field semantics
/// - `default_tag`: tag attached to events logged without an explicit tag
/// - `report_failures`: emit a `tracing` warning whenever a sink fails during
///   dispatch or tear-down (the failure is isolated either way)
#[derive(Clone, Debug)]
pub struct Config {
    /// Tag attached to untagged events.
    pub default_tag: String,

    /// Report isolated sink failures through `tracing`.
    pub report_failures: bool,
}

impl Config {
    /// Resolves the tag for one event.
    ///
    /// - `Some(non-empty)` → that tag
    /// - `None` / `Some("")` → the configured default (or [`DEFAULT_TAG`])
    #[inline]
    pub fn resolve_tag<'a>(&'a self, tag: Option<&'a str>) -> &'a str {
        match tag {
            Some(t) if !t.is_empty() => t,
            _ if self.default_tag.is_empty() => DEFAULT_TAG,
            _ => &self.default_tag,
        }
    }

    /// Returns a copy with a different default tag.
    #[must_use]
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `default_tag = "AppLogger"`
    /// - `report_failures = true`
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            report_failures: true,
        }
    }
}
