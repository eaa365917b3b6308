use crate::domain::models::{HashKind, HashRecord};
use crate::services::hashing::{compute, is_hex_digest};
use tracing::debug;

/// Decide whether `input` names a readable file, is already a digest, or is
/// plain text.
///
/// A path that cannot be read is not an error: it falls through to the
/// hash/text check, so an unreadable file is hashed as its own name.
pub fn classify(input: &str) -> HashRecord {
    match std::fs::read(input) {
        Ok(raw) => {
            debug!("input is a file: {}", input);
            HashRecord {
                kind: HashKind::File,
                digest: compute(&raw),
            }
        }
        Err(_) => analyze_text(input),
    }
}

fn analyze_text(input: &str) -> HashRecord {
    if is_hex_digest(input) {
        debug!("input is a hash: {}", input);
        HashRecord {
            kind: HashKind::Hash,
            digest: input.to_string(),
        }
    } else {
        debug!("input is text: {}", input);
        HashRecord {
            kind: HashKind::Text,
            digest: compute(input.as_bytes()),
        }
    }
}
