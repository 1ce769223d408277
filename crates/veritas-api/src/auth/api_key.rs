//! Static API key verification for the mobile upload path.
//!
//! The allow-list is loaded once at startup and is not hot-reloadable.
//! No expiry, rotation, or per-key scoping is modeled.

use subtle::ConstantTimeEq;

/// Constant-time string comparison.
fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Validates candidate keys against the configured allow-list.
#[derive(Clone)]
pub struct ApiKeyValidator {
    keys: Vec<String>,
}

impl ApiKeyValidator {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Check a candidate against every configured key in constant time.
    pub fn verify(&self, candidate: &str) -> bool {
        // No early exit: compare against the whole list regardless of match.
        self.keys
            .iter()
            .fold(false, |matched, key| matched | secure_compare(key, candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_listed_key() {
        let validator = ApiKeyValidator::new(vec!["alpha".to_string(), "beta".to_string()]);
        assert!(validator.verify("alpha"));
        assert!(validator.verify("beta"));
    }

    #[test]
    fn test_verify_rejects_unknown_key() {
        let validator = ApiKeyValidator::new(vec!["alpha".to_string()]);
        assert!(!validator.verify("gamma"));
        assert!(!validator.verify(""));
    }

    #[test]
    fn test_verify_rejects_prefix_and_superstring() {
        let validator = ApiKeyValidator::new(vec!["alpha".to_string()]);
        assert!(!validator.verify("alph"));
        assert!(!validator.verify("alphaa"));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let validator = ApiKeyValidator::new(vec![]);
        assert!(!validator.verify("anything"));
    }
}
