//! Key normalisation.
//!
//! Configuration keys are matched in their relaxed form: `myProperty`,
//! `my_property`, `my-property` and `MY_PROPERTY` all sanitize to
//! `my-property`. The sanitized form is what every [`TrieIndex`] is keyed by.
//!
//! [`TrieIndex`]: super::TrieIndex

use smol_str::SmolStr;

use super::constants::KEY_SEPARATOR;

/// Normalise a single key segment (or a prefix of one).
///
/// Sanitizing is idempotent, so already sanitized input passes through.
pub fn sanitize(name: &str) -> SmolStr {
    let trimmed = name.trim();
    let mut out = String::with_capacity(trimmed.len() + 4);
    let mut prev: Option<char> = None;

    for c in trimmed.chars() {
        if c == '_' {
            out.push('-');
        } else if c.is_uppercase() {
            // camelCase boundary
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    SmolStr::from(out)
}

/// Split a dot-delimited key into its raw segments.
///
/// A trailing separator yields a trailing empty segment, which search treats
/// as "every child of the previous segment". An empty key yields one empty
/// segment.
pub fn split_key(key: &str) -> Vec<&str> {
    key.split(KEY_SEPARATOR).collect()
}
