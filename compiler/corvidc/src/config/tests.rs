use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;

fn from_vars(vars: &[(&str, &str)]) -> ServicesConfig {
    ServicesConfig::from_lookup(|var| {
        vars.iter()
            .find(|(name, _)| *name == var)
            .map(|(_, value)| (*value).to_owned())
    })
}

#[test]
fn no_variables_means_defaults() {
    let config = from_vars(&[]);
    assert_eq!(config, ServicesConfig::default());
    assert_eq!(config.change_range.timeout, Duration::from_millis(200));
    assert_eq!(config.metadata_cache.initial_capacity, 64);
    assert!(config.classification.semantic);
    assert!(config.classification.embedded_languages);
}

#[test]
fn variables_override_defaults() {
    let config = from_vars(&[
        ("CORVID_CHANGE_RANGE_TIMEOUT_MS", "15"),
        ("CORVID_METADATA_CACHE_CAPACITY", " 8 "),
        ("CORVID_EMBEDDED_LANGUAGES", "off"),
    ]);
    assert_eq!(config.change_range.timeout, Duration::from_millis(15));
    assert_eq!(config.metadata_cache.initial_capacity, 8);
    assert!(!config.classification.embedded_languages);
    assert!(config.classification.semantic);
}

#[test]
fn invalid_values_are_ignored() {
    let config = from_vars(&[
        ("CORVID_CHANGE_RANGE_TIMEOUT_MS", "soon"),
        ("CORVID_METADATA_CACHE_CAPACITY", "-1"),
        ("CORVID_EMBEDDED_LANGUAGES", "maybe"),
    ]);
    assert_eq!(config, ServicesConfig::default());
}

#[test]
fn zero_capacity_is_clamped() {
    let config = from_vars(&[("CORVID_METADATA_CACHE_CAPACITY", "0")]);
    assert_eq!(config.metadata_cache.initial_capacity, 1);
}

#[test]
fn builders_replace_sections() {
    let config = ServicesConfig::new()
        .with_diagnostics(DiagnosticConfig::unlimited())
        .with_classification(ClassificationOptions::syntactic())
        .with_change_range(ChangeRangeOptions::default().with_timeout(Duration::ZERO))
        .with_metadata_cache(MetadataCacheConfig::new().with_initial_capacity(3));
    assert_eq!(config.diagnostics, DiagnosticConfig::unlimited());
    assert_eq!(config.classification, ClassificationOptions::syntactic());
    assert_eq!(config.change_range.timeout, Duration::ZERO);
    assert_eq!(config.metadata_cache.initial_capacity, 3);
}
