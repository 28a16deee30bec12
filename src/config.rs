//! Label options and environment configuration.

use std::env;
use std::time::Duration;

use crate::core::anchor::Anchor;
use crate::core::clipboard::SmartCopy;

pub const DEFAULT_ELLIPSIS: &str = "...";
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Options of a truncating label.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncateProps {
    pub text: String,
    pub ellipsis: String,
    pub start: Option<Anchor>,
    pub end: Option<Anchor>,
    pub smart_copy: SmartCopy,
    pub resize_debounce: Duration,
}

impl TruncateProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            start: None,
            end: None,
            smart_copy: SmartCopy::default(),
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
        }
    }

    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn start(mut self, anchor: impl Into<Anchor>) -> Self {
        self.start = Some(anchor.into());
        self
    }

    pub fn end(mut self, anchor: impl Into<Anchor>) -> Self {
        self.end = Some(anchor.into());
        self
    }

    pub fn smart_copy(mut self, policy: SmartCopy) -> Self {
        self.smart_copy = policy;
        self
    }

    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    /// Apply environment overrides on top of explicit options.
    pub fn with_env(mut self, config: &EnvConfig) -> Self {
        if let Some(ms) = config.resize_debounce_ms {
            self.resize_debounce = Duration::from_millis(ms);
        }
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub debug: bool,
    pub log_file: Option<String>,
    pub resize_debounce_ms: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("TRUNCATE_MIDDLE_DEBUG"),
            log_file: env_string_opt("TRUNCATE_MIDDLE_LOG"),
            resize_debounce_ms: env_string_opt("TRUNCATE_MIDDLE_RESIZE_DEBOUNCE_MS")
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
