use sha2::{Digest, Sha256};
use tracing::debug;

/// Lowercase hex SHA-256 of `raw`.
pub fn compute(raw: &[u8]) -> String {
    debug!("calculate hash from {} bytes", raw.len());
    let mut hasher = Sha256::new();
    hasher.update(raw);
    hex::encode(hasher.finalize())
}

pub fn is_hex_digest(candidate: &str) -> bool {
    candidate.len() == 64 && hex::decode(candidate).is_ok()
}
