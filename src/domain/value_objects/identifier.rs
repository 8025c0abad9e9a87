//! Cookbook Identifier Value Object
//!
//! A content identifier for a cookbook directory. Two cookbooks with the same
//! set of files and file contents share an identifier.

use std::fmt;

use sha2::{Digest, Sha256};

/// Hex SHA-256 of arbitrary bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Content identifier of a cookbook
///
/// Computed as the SHA-256 over sorted `<relative path>:<file checksum>` lines.
/// Identifiers read from older lockfiles may use another digest; they are
/// compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookbookIdentifier(String);

impl CookbookIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Compute the identifier from `(relative path, hex checksum)` pairs.
    ///
    /// Order of the input does not matter.
    pub fn from_file_checksums<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut lines: Vec<String> = files
            .into_iter()
            .map(|(path, checksum)| format!("{}:{}\n", path, checksum))
            .collect();
        lines.sort();

        let mut hasher = Sha256::new();
        for line in &lines {
            hasher.update(line.as_bytes());
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Version-like rendering of the identifier (`major.minor.patch`).
    ///
    /// Built from the first 14, next 14 and next 12 hex digits. Returns `None`
    /// when the identifier is shorter than 40 characters or not hex.
    pub fn dotted_decimal(&self) -> Option<String> {
        let hex = self.0.get(..40)?;
        let parts = [&hex[..14], &hex[14..28], &hex[28..40]];
        let mut numbers = Vec::with_capacity(3);
        for part in parts {
            numbers.push(u64::from_str_radix(part, 16).ok()?.to_string());
        }
        Some(numbers.join("."))
    }
}

impl fmt::Display for CookbookIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CookbookIdentifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CookbookIdentifier {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for CookbookIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_is_64_chars() {
        let hash = sha256_hex(b"hello");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn identifier_ignores_input_order() {
        let a = CookbookIdentifier::from_file_checksums([
            ("recipes/default.rb", "aa"),
            ("metadata.json", "bb"),
        ]);
        let b = CookbookIdentifier::from_file_checksums([
            ("metadata.json", "bb"),
            ("recipes/default.rb", "aa"),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn identifier_changes_with_content() {
        let a = CookbookIdentifier::from_file_checksums([("recipes/default.rb", "aa")]);
        let b = CookbookIdentifier::from_file_checksums([("recipes/default.rb", "ab")]);
        assert_ne!(a, b);
    }

    #[test]
    fn identifier_changes_with_paths() {
        let a = CookbookIdentifier::from_file_checksums([("recipes/a.rb", "aa")]);
        let b = CookbookIdentifier::from_file_checksums([("recipes/b.rb", "aa")]);
        assert_ne!(a, b);
    }

    #[test]
    fn dotted_decimal_splits_leading_hex() {
        let id = CookbookIdentifier::new("00000000000001000000000000020000000000030000");
        assert_eq!(id.dotted_decimal().as_deref(), Some("1.2.3"));
    }

    #[test]
    fn dotted_decimal_rejects_short_or_non_hex() {
        assert_eq!(CookbookIdentifier::new("abc").dotted_decimal(), None);
        assert_eq!(
            CookbookIdentifier::new("zz000000000001000000000000020000000000030000").dotted_decimal(),
            None
        );
    }

    #[test]
    fn display_shows_raw_identifier() {
        let id = CookbookIdentifier::new("abc123");
        assert_eq!(format!("{}", id), "abc123");
    }
}
