use crate::domain::models::{BatchSummary, Document, HashKind, RunOptions};
use crate::services::classify::classify;
use crate::services::client::MetadataStore;
use crate::services::collect::collect;
use crate::services::config::Config;
use crate::services::hashing::compute;
use crate::services::metadata::{assemble, load_multiple_json_files};
use crate::services::output::{write_document, write_result, write_status};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use tracing::{error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchMode {
    Get,
    Set,
}

/// Runs one invocation's inputs through classification and the store.
///
/// Inputs are handled strictly in order. A literal input string is processed
/// once per run; repeats are skipped even if another input hashes the same.
pub struct BatchProcessor<'a, S: MetadataStore> {
    store: &'a S,
    config: &'a Config,
    options: &'a RunOptions,
    overrides: Document,
    seen: HashSet<String>,
    summary: BatchSummary,
}

impl<'a, S: MetadataStore> BatchProcessor<'a, S> {
    pub fn new(store: &'a S, config: &'a Config, options: &'a RunOptions) -> Self {
        Self {
            store,
            config,
            options,
            overrides: load_multiple_json_files(&options.meta_files),
            seen: HashSet::new(),
            summary: BatchSummary {
                ok: true,
                ..BatchSummary::default()
            },
        }
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    pub fn run(
        &mut self,
        mode: BatchMode,
        inputs: &[String],
        out: &mut dyn Write,
    ) -> anyhow::Result<BatchSummary> {
        for input in inputs {
            if self.seen.contains(input) {
                info!("skip {}, already processed", input);
                self.summary.skipped += 1;
                continue;
            }
            info!("process input {}", input);
            let ok = match mode {
                BatchMode::Set => self.set_one(input, out)?,
                BatchMode::Get => self.get_one(input, out)?,
            };
            if !ok {
                self.summary.ok = false;
                self.summary.failed += 1;
            }
            self.summary.processed += 1;
            self.seen.insert(input.clone());
        }
        Ok(self.summary.clone())
    }

    fn set_one(&self, input: &str, out: &mut dyn Write) -> anyhow::Result<bool> {
        let record = classify(input);
        let intrinsic = match collect(record.kind, input, &record.digest) {
            Ok(doc) => doc,
            Err(e) => {
                error!("{}", e);
                write_status(out, format_args!("{} metadata not set :(", input))?;
                return Ok(false);
            }
        };
        let doc = assemble(intrinsic, &self.config.default_meta, &self.overrides);
        if self.store.set_document(record.kind, &record.digest, &doc) {
            write_result(
                out,
                self.options.details,
                &doc,
                format_args!("{} metadata set :)", input),
            )?;
            Ok(true)
        } else {
            write_status(out, format_args!("{} metadata not set :(", input))?;
            Ok(false)
        }
    }

    fn get_one(&self, input: &str, out: &mut dyn Write) -> anyhow::Result<bool> {
        let record = classify(input);
        let (ok, mut doc) = match self.options.publisher_scope.as_deref() {
            Some(publisher) => self
                .store
                .get_by_hash_for_publisher(&record.digest, publisher),
            None => self.store.get_by_hash(&record.digest),
        };
        if ok {
            write_result(
                out,
                self.options.details,
                &doc,
                format_args!("{} found :)", input),
            )?;
        } else {
            doc.insert("input".to_string(), Value::from(input));
            write_result(
                out,
                self.options.details,
                &doc,
                format_args!("{} not found :(", input),
            )?;
        }
        Ok(ok)
    }

    /// Remove every input from the store. Outcomes are reported per item but
    /// never affect the batch summary.
    pub fn run_removals(&self, inputs: &[String], out: &mut dyn Write) -> anyhow::Result<()> {
        for input in inputs {
            info!("process input {}", input);
            let record = classify(input);
            if self
                .store
                .remove_by_hash(input, &record.digest, self.options.assume_yes)
            {
                write_status(out, format_args!("{} removed :)", input))?;
            } else {
                write_status(out, format_args!("{} not removed :(", input))?;
            }
        }
        Ok(())
    }

    /// Document describing the publisher itself, keyed by the hash of its identity.
    pub fn self_document(&self) -> Document {
        let mut base = Document::new();
        base.insert("user".to_string(), Value::from(self.config.publisher.as_str()));
        base.insert(
            "hash".to_string(),
            Value::from(compute(self.config.publisher.as_bytes())),
        );
        base.insert("type".to_string(), Value::from(HashKind::Publisher.label()));
        assemble(base, &self.config.default_meta, &self.overrides)
    }

    pub fn run_self_set(&self, out: &mut dyn Write) -> anyhow::Result<bool> {
        let doc = self.self_document();
        if self.store.set_self(&doc) {
            write_result(
                out,
                self.options.details,
                &doc,
                format_args!("Self-metadata set :)"),
            )?;
            Ok(true)
        } else {
            write_status(out, format_args!("Error setting self-metadata :("))?;
            Ok(false)
        }
    }

    pub fn run_self_get(&self, out: &mut dyn Write) -> anyhow::Result<bool> {
        let (ok, doc) = self.store.get_self();
        write_document(out, &doc)?;
        Ok(ok)
    }
}
