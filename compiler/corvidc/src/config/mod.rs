//! Service configuration.

use std::str::FromStr;
use std::time::Duration;

use corvid_cache::MetadataCacheConfig;
use corvid_classify::ClassificationOptions;
use corvid_diagnostic::DiagnosticConfig;
use corvid_syntax::ChangeRangeOptions;

const CHANGE_RANGE_TIMEOUT_VAR: &str = "CORVID_CHANGE_RANGE_TIMEOUT_MS";
const METADATA_CACHE_CAPACITY_VAR: &str = "CORVID_METADATA_CACHE_CAPACITY";
const EMBEDDED_LANGUAGES_VAR: &str = "CORVID_EMBEDDED_LANGUAGES";

/// Settings for every service an [`AnalysisHost`](crate::AnalysisHost) runs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ServicesConfig {
    pub diagnostics: DiagnosticConfig,
    pub change_range: ChangeRangeOptions,
    pub classification: ClassificationOptions,
    pub metadata_cache: MetadataCacheConfig,
}

impl ServicesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `CORVID_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(millis) = parse_var::<u64>(&lookup, CHANGE_RANGE_TIMEOUT_VAR) {
            config.change_range = config
                .change_range
                .with_timeout(Duration::from_millis(millis));
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, METADATA_CACHE_CAPACITY_VAR) {
            config.metadata_cache = config.metadata_cache.with_initial_capacity(capacity);
        }
        if let Some(value) = lookup(EMBEDDED_LANGUAGES_VAR) {
            match parse_flag(&value) {
                Some(enabled) => {
                    config.classification =
                        config.classification.with_embedded_languages(enabled);
                }
                None => invalid(EMBEDDED_LANGUAGES_VAR, &value),
            }
        }
        config
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn with_change_range(mut self, change_range: ChangeRangeOptions) -> Self {
        self.change_range = change_range;
        self
    }

    #[must_use]
    pub fn with_classification(mut self, classification: ClassificationOptions) -> Self {
        self.classification = classification;
        self
    }

    #[must_use]
    pub fn with_metadata_cache(mut self, metadata_cache: MetadataCacheConfig) -> Self {
        self.metadata_cache = metadata_cache;
        self
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<T> {
    let value = lookup(var)?;
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        invalid(var, &value);
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cold]
fn invalid(var: &str, value: &str) {
    tracing::warn!(var, value, "ignoring invalid configuration value");
}

#[cfg(test)]
mod tests;
