// src/options.rs
use crate::types::{EngineConfig, EnumerationOptions};

/// Merge caller overrides onto the service defaults.
///
/// Numeric overrides apply only when strictly positive. `all` and
/// `only_recursive` are taken from the overrides whenever an options object was
/// sent, so an omitted flag and an explicit `false` are indistinguishable.
/// Structured output is always enabled.
pub fn translate(
    defaults: &EnumerationOptions,
    overrides: Option<&EnumerationOptions>,
) -> EngineConfig {
    let mut config = EngineConfig {
        threads: positive(defaults.threads),
        timeout: positive(defaults.timeout),
        max_enumeration_time: positive(defaults.max_enumeration_time),
        all: defaults.all,
        only_recursive: defaults.only_recursive,
        structured_output: true,
    };

    if let Some(overrides) = overrides {
        if overrides.threads > 0 {
            config.threads = positive(overrides.threads);
        }
        if overrides.timeout > 0 {
            config.timeout = positive(overrides.timeout);
        }
        if overrides.max_enumeration_time > 0 {
            config.max_enumeration_time = positive(overrides.max_enumeration_time);
        }
        config.all = overrides.all;
        config.only_recursive = overrides.only_recursive;
    }

    config
}

// Defaults are validated at load time; clamp anything else into u32.
fn positive(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = translate(&EnumerationOptions::default(), None);
        assert_eq!(config.threads, 10);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_enumeration_time, 10);
        assert!(!config.all);
        assert!(!config.only_recursive);
        assert!(config.structured_output());
    }

    #[test]
    fn test_positive_overrides_win() {
        let overrides = EnumerationOptions {
            threads: 25,
            timeout: 5,
            max_enumeration_time: 2,
            all: true,
            only_recursive: true,
        };
        let config = translate(&EnumerationOptions::default(), Some(&overrides));
        assert_eq!(config.threads, 25);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.max_enumeration_time, 2);
        assert!(config.all);
        assert!(config.only_recursive);
    }

    #[test]
    fn test_non_positive_overrides_fall_back() {
        let overrides = EnumerationOptions {
            threads: 0,
            timeout: -3,
            max_enumeration_time: 0,
            all: false,
            only_recursive: false,
        };
        let config = translate(&EnumerationOptions::default(), Some(&overrides));
        assert_eq!(config.threads, 10);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_enumeration_time, 10);
    }

    #[test]
    fn test_flags_always_taken_from_overrides() {
        let defaults = EnumerationOptions {
            all: true,
            only_recursive: true,
            ..EnumerationOptions::default()
        };
        let overrides: EnumerationOptions = serde_json::from_str(r#"{"threads": 4}"#).unwrap();

        let config = translate(&defaults, Some(&overrides));
        assert_eq!(config.threads, 4);
        assert!(!config.all);
        assert!(!config.only_recursive);

        let untouched = translate(&defaults, None);
        assert!(untouched.all);
        assert!(untouched.only_recursive);
    }

    #[test]
    fn test_translate_is_idempotent() {
        let defaults = EnumerationOptions::default();
        let overrides = EnumerationOptions {
            threads: 3,
            timeout: 0,
            max_enumeration_time: 7,
            all: true,
            only_recursive: false,
        };

        let once = translate(&defaults, Some(&overrides));
        let applied = EnumerationOptions {
            threads: once.threads as i64,
            timeout: once.timeout as i64,
            max_enumeration_time: once.max_enumeration_time as i64,
            all: once.all,
            only_recursive: once.only_recursive,
        };
        let twice = translate(&applied, Some(&overrides));

        assert_eq!(once, twice);
        assert_eq!(once, translate(&defaults, Some(&overrides)));
    }

    #[test]
    fn test_huge_values_saturate() {
        let overrides = EnumerationOptions {
            threads: i64::MAX,
            ..EnumerationOptions::default()
        };
        let config = translate(&EnumerationOptions::default(), Some(&overrides));
        assert_eq!(config.threads, u32::MAX);
    }
}
