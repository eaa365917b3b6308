use crate::domain::models::{Document, HashKind};
use serde_json::Value;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("cannot stat {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Intrinsic metadata for a classified input.
///
/// Every kind gets `input`, `type` and `last_published`. Text adds `length`
/// (characters), files add `permission` and `size` (bytes).
pub fn collect(kind: HashKind, input: &str, digest: &str) -> Result<Document, CollectError> {
    debug!("collect metadata for {} ({}, {})", input, kind, digest);
    let mut doc = Document::new();
    doc.insert("input".to_string(), Value::from(input));
    doc.insert("type".to_string(), Value::from(kind.label()));
    doc.insert("last_published".to_string(), Value::from(now_timestamp()));

    match kind {
        HashKind::Text => {
            doc.insert(
                "length".to_string(),
                Value::from(input.chars().count().to_string()),
            );
        }
        HashKind::File => {
            let meta = std::fs::metadata(input).map_err(|source| {
                error!("stat failed for {}: {}", input, source);
                CollectError::Stat {
                    path: input.to_string(),
                    source,
                }
            })?;
            doc.insert(
                "permission".to_string(),
                Value::from(permission_string(&meta)),
            );
            doc.insert("size".to_string(), Value::from(meta.len().to_string()));
        }
        HashKind::Hash | HashKind::Publisher => {}
    }
    Ok(doc)
}

fn now_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

#[cfg(unix)]
fn permission_string(meta: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    mode_string(meta.permissions().mode())
}

#[cfg(not(unix))]
fn permission_string(meta: &std::fs::Metadata) -> String {
    if meta.permissions().readonly() {
        mode_string(0o444)
    } else {
        mode_string(0o666)
    }
}

/// `ls`-style rendering of the permission bits, e.g. `-rw-r--r--`.
fn mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push('-');
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}
