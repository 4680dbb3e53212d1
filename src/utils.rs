// src/utils.rs
use std::time::Duration;

/// Syntactic domain check. Does not resolve or verify that the domain exists.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    if domain.contains("..") || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    parts
        .iter()
        .all(|part| !part.is_empty() && part.len() <= 63)
}

/// Human-readable elapsed time, e.g. `1.503217s` or `812.4µs`.
pub fn format_duration(duration: Duration) -> String {
    format!("{:?}", duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_domain() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub.example.com"));
        assert!(is_valid_domain("deep.nested.sub.example.co.uk"));
        assert!(is_valid_domain("xn--bcher-kva.example"));
        assert!(!is_valid_domain("example"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_rejects_malformed_dots() {
        assert!(!is_valid_domain("example..com"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain("."));
    }

    #[test]
    fn test_label_and_total_length_limits() {
        let label_63 = "a".repeat(63);
        let label_64 = "a".repeat(64);
        assert!(is_valid_domain(&format!("{}.com", label_63)));
        assert!(!is_valid_domain(&format!("{}.com", label_64)));

        let long = format!("{}.com", vec!["a".repeat(60); 5].join("."));
        assert!(long.len() > 253);
        assert!(!is_valid_domain(&long));
    }

    #[test]
    fn test_validation_is_syntactic_only() {
        // hyphens and underscores are left to the engine
        assert!(is_valid_domain("-example.com"));
        assert!(is_valid_domain("_dmarc.example.com"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(20)), "20ms");
        assert_eq!(format_duration(Duration::ZERO), "0ns");
    }
}
