use serde::Deserialize;
use serenity::model::id::UserId;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default time before a collector ends on its own
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default number of matching reactions before a collector ends on its own
pub const DEFAULT_MAX_COUNT: usize = 10;

/// Environment prefix read by [`CollectorOptions::from_env`]
pub const ENV_PREFIX: &str = "REACTKIT_";

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Invalid collector options: {0}")]
    TypeMismatch(String),
}

/// Predicate over the reacting user's ID
pub type UserFilter = Arc<dyn Fn(UserId) -> bool + Send + Sync>;

/// Validated collector configuration
///
/// A zero `timeout_ms` disables the timer and a zero `max_count` disables the
/// count limit. With both at zero the collector runs until stopped.
#[derive(Clone)]
pub struct CollectorOptions {
    timeout_ms: u64,
    max_count: usize,
    filter: Option<UserFilter>,
}

/// Untyped options as they arrive from JSON or the environment
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    #[serde(default, alias = "timeout")]
    timeout_ms: Option<u64>,
    #[serde(default, alias = "count")]
    max_count: Option<usize>,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_count: DEFAULT_MAX_COUNT,
            filter: None,
        }
    }
}

impl fmt::Debug for CollectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorOptions")
            .field("timeout_ms", &self.timeout_ms)
            .field("max_count", &self.max_count)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl CollectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that never end on their own
    pub fn continuous() -> Self {
        Self {
            timeout_ms: 0,
            max_count: 0,
            filter: None,
        }
    }

    /// Parse options from JSON such as `{"timeout": 5000, "count": 3}`
    ///
    /// Missing keys take their defaults. Values of the wrong type and unknown
    /// keys are rejected rather than silently replaced by defaults.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CollectorError> {
        let raw = RawOptions::deserialize(value)
            .map_err(|e| CollectorError::TypeMismatch(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Read `REACTKIT_TIMEOUT_MS` and `REACTKIT_MAX_COUNT`
    pub fn from_env() -> Result<Self, CollectorError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`from_env`](Self::from_env) over an explicit set of variables
    ///
    /// Variables without the `REACTKIT_` prefix are ignored.
    pub fn from_vars<I>(vars: I) -> Result<Self, CollectorError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, RawOptions>(vars)
            .map_err(|e| CollectorError::TypeMismatch(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawOptions) -> Self {
        Self {
            timeout_ms: raw.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            max_count: raw.max_count.unwrap_or(DEFAULT_MAX_COUNT),
            filter: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(UserId) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Timer duration, `None` when the timeout is disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Count limit, `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        (self.max_count > 0).then_some(self.max_count)
    }

    pub fn is_continuous(&self) -> bool {
        self.timeout_ms == 0 && self.max_count == 0
    }

    /// Check a reactor against the filter
    ///
    /// Without a filter every reaction matches. With one, reactions that carry
    /// no user ID never match.
    pub fn accepts(&self, user_id: Option<UserId>) -> bool {
        match (&self.filter, user_id) {
            (None, _) => true,
            (Some(filter), Some(user_id)) => filter(user_id),
            (Some(_), None) => false,
        }
    }
}
