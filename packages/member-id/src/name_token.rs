//! Name token derivation.

use sha2::{Digest, Sha256};

/// Derive the 4-character name token for a holder's name.
///
/// SHA-256 of the normalized full name, truncated to the first two bytes
/// and rendered as uppercase hex. Stable across platforms and releases:
/// the same identity always yields the same token. Collisions are
/// tolerated; the registry's duplicate check catches them at issue time.
///
/// The token deliberately carries no recoverable PII - a digest survives
/// display on a card without exposing the name behind it.
pub fn name_token(first_name: &str, last_name: &str) -> String {
    let normalized = normalize_name(&format!("{} {}", first_name, last_name));
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    format!("{:02X}{:02X}", digest[0], digest[1])
}

/// Normalize a name for hashing:
/// - Convert to lowercase
/// - Remove all non-alphanumeric characters (except spaces)
/// - Collapse multiple spaces into single spaces
/// - Trim leading/trailing whitespace
///
/// This keeps the token stable against formatting differences in how a
/// name was entered ("O'Brien" vs "OBrien", double spaces, casing).
fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
