use crate::domain::models::Document;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Split the `--meta` argument into individual file paths.
pub fn split_meta_arg(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Read one metadata file; unreadable or non-object files contribute nothing.
pub fn load_json_file(path: &Path) -> Document {
    let raw = match std::fs::read_to_string(path) {
        Ok(r) => r,
        Err(e) => {
            warn!("cannot read metadata file {}: {}", path.display(), e);
            return Document::new();
        }
    };
    match serde_json::from_str::<Document>(&raw) {
        Ok(doc) => {
            debug!("loaded metadata file {}", path.display());
            doc
        }
        Err(e) => {
            warn!("cannot parse json from {}: {}", path.display(), e);
            Document::new()
        }
    }
}

/// Merge metadata files left to right; later files win on key collision.
pub fn load_multiple_json_files(paths: &[PathBuf]) -> Document {
    let mut merged = Document::new();
    for p in paths {
        overlay(&mut merged, load_json_file(p));
    }
    merged
}

pub fn overlay(base: &mut Document, top: Document) {
    for (k, v) in top {
        base.insert(k, v);
    }
}

pub fn overlay_strings(base: &mut Document, top: &BTreeMap<String, String>) {
    for (k, v) in top {
        base.insert(k.clone(), Value::from(v.as_str()));
    }
}

fn textual_len(v: &Value) -> usize {
    match v {
        Value::String(s) => s.len(),
        other => other.to_string().len(),
    }
}

/// Drop every key whose value renders as an empty string.
pub fn strip_empty(doc: &mut Document) {
    doc.retain(|k, v| {
        let keep = textual_len(v) > 0;
        if !keep {
            debug!("drop empty metadata key {}", k);
        }
        keep
    });
}

/// Layer intrinsic fields, config defaults and file overrides, then strip
/// empty values. Each layer wins over the one before it.
pub fn assemble(
    intrinsic: Document,
    defaults: &BTreeMap<String, String>,
    overrides: &Document,
) -> Document {
    let mut doc = intrinsic;
    overlay_strings(&mut doc, defaults);
    overlay(&mut doc, overrides.clone());
    strip_empty(&mut doc);
    doc
}
