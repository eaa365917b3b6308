//! HTTP client for the hashref metadata store.
//!
//! Every operation reports failure as data: a `false` flag plus a diagnostic
//! document. Nothing here panics or returns an error to the caller.

use crate::domain::models::{Document, HashKind};
use crate::services::config::Config;
use crate::services::prompt::Confirm;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info, warn};

/// The operations the batch processor needs from a metadata store.
pub trait MetadataStore {
    fn get_by_hash(&self, digest: &str) -> (bool, Document);
    fn get_by_hash_for_publisher(&self, digest: &str, publisher: &str) -> (bool, Document);
    /// Replace the whole document stored under `id`.
    fn set_document(&self, kind: HashKind, id: &str, document: &Document) -> bool;
    fn remove_by_hash(&self, input: &str, digest: &str, force: bool) -> bool;
    fn get_self(&self) -> (bool, Document);
    fn set_self(&self, document: &Document) -> bool;
}

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response status {status}")]
    Protocol { status: String, code: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("cannot encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Fields shown to the user in place of the document that was asked for.
    pub fn diagnostic(&self) -> Document {
        let mut doc = Document::new();
        match self {
            ClientError::Protocol { status, code } => {
                doc.insert("status".to_string(), Value::from(status.as_str()));
                doc.insert("code".to_string(), Value::from(*code));
            }
            other => {
                doc.insert("error".to_string(), Value::from(other.to_string()));
            }
        }
        doc
    }
}

pub struct MetadataClient {
    http: Client,
    server: String,
    publisher: String,
    confirm: Box<dyn Confirm>,
}

impl MetadataClient {
    pub fn new(config: &Config, confirm: Box<dyn Confirm>) -> anyhow::Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            server: config.server_url.trim_end_matches('/').to_string(),
            publisher: config.publisher.clone(),
            confirm,
        })
    }

    fn uri(&self, path: &str) -> String {
        format!("{}/api/{}", self.server, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, self.publisher.as_str())
    }

    fn fetch(&self, uri: &str) -> Result<Document, ClientError> {
        debug!("request-uri: GET {}", uri);
        let resp = self.authorized(self.http.get(uri)).send()?;
        let body = check_status(resp)?.text()?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    fn post(&self, uri: &str, document: &Document) -> Result<(), ClientError> {
        debug!("request-uri: POST {}", uri);
        let body = serde_json::to_vec(document).map_err(ClientError::Encode)?;
        let resp = self
            .authorized(self.http.post(uri))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        check_status(resp)?;
        Ok(())
    }

    fn delete(&self, uri: &str) -> Result<(), ClientError> {
        debug!("request-uri: DELETE {}", uri);
        let resp = self.authorized(self.http.delete(uri)).send()?;
        check_status(resp)?;
        Ok(())
    }
}

fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.as_u16() >= 400 {
        warn!("response status {}", status);
        return Err(ClientError::Protocol {
            status: status.to_string(),
            code: status.as_u16(),
        });
    }
    Ok(resp)
}

fn fetched(result: Result<Document, ClientError>) -> (bool, Document) {
    match result {
        Ok(doc) => (true, doc),
        Err(e) => {
            warn!("{}", e);
            (false, e.diagnostic())
        }
    }
}

fn done(result: Result<(), ClientError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

impl MetadataStore for MetadataClient {
    fn get_by_hash(&self, digest: &str) -> (bool, Document) {
        info!("request data for {}", digest);
        fetched(self.fetch(&self.uri(&format!("hash/{}", digest))))
    }

    fn get_by_hash_for_publisher(&self, digest: &str, publisher: &str) -> (bool, Document) {
        info!("request data for {} from publisher {}", digest, publisher);
        fetched(self.fetch(&self.uri(&format!("hash/{}/publisher/{}", digest, publisher))))
    }

    fn set_document(&self, kind: HashKind, id: &str, document: &Document) -> bool {
        let target = match kind {
            HashKind::Publisher => "publisher",
            HashKind::Hash | HashKind::Text | HashKind::File => "hash",
        };
        info!("set data for {} {}", target, id);
        done(self.post(&self.uri(&format!("{}/{}", target, id)), document))
    }

    fn remove_by_hash(&self, input: &str, digest: &str, force: bool) -> bool {
        if !force
            && !self
                .confirm
                .confirm(&format!("Should {} really be removed from hashref?", input))
        {
            info!("removal of {} declined", input);
            return false;
        }
        info!("delete metadata for {}", digest);
        done(self.delete(&self.uri(&format!("hash/{}", digest))))
    }

    fn get_self(&self) -> (bool, Document) {
        info!("request own data for {}", self.publisher);
        fetched(self.fetch(&self.uri("self")))
    }

    fn set_self(&self, document: &Document) -> bool {
        info!("set data for yourself {}", self.publisher);
        done(self.post(&self.uri("self"), document))
    }
}
