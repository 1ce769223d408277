//! Shared key generation for the blob store.
//!
//! Key format: `{uuid-v4}{extension}`, where the extension is taken verbatim
//! from the caller-supplied filename (leading dot included, empty if absent).

use uuid::Uuid;

/// Generate a unique on-disk filename from a caller-supplied one.
///
/// Only the extension of the original name survives; the rest is replaced by
/// a random identifier, so generated keys never collide and never carry path
/// components from the caller.
pub fn generated_filename(original: &str) -> String {
    // Only the final path component can contribute an extension.
    let name = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let ext = match name.rfind('.') {
        // A dot at position 0 is a hidden-file name, not an extension.
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    };
    format!("{}{}", Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_extension_with_dot() {
        let key = generated_filename("a.pdf");
        assert!(key.ends_with(".pdf"));
        assert_ne!(key, "a.pdf");
    }

    #[test]
    fn test_no_extension() {
        let key = generated_filename("README");
        assert!(!key.contains('.'));
        assert_eq!(key.len(), 36); // bare uuid
    }

    #[test]
    fn test_last_extension_wins() {
        let key = generated_filename("archive.tar.gz");
        assert!(key.ends_with(".gz"));
        assert!(!key.contains("tar"));
    }

    #[test]
    fn test_hidden_file_has_no_extension() {
        let key = generated_filename(".env");
        assert_eq!(key.len(), 36);
    }

    #[test]
    fn test_traversal_components_do_not_survive() {
        let key = generated_filename("../../etc/passwd");
        assert!(!key.contains(".."));
        assert!(!key.contains('/'));
    }

    #[test]
    fn test_unique_per_call() {
        assert_ne!(generated_filename("a.png"), generated_filename("a.png"));
    }
}
