//! REST adapter for the hosted document database.
//!
//! The backend speaks a thin JSON whole-document protocol:
//!
//! ```text
//! GET    {base}/v1/deployments/{tenant}/collections/{name}/documents
//!        -> {"documents": [{"id": "...", "document": {...}}, ...]}
//! GET    {base}/.../documents/{id}      -> {"id": "...", "document": {...}} | 404
//! PUT    {base}/.../documents/{id}      body {"document": {...}}
//! DELETE {base}/.../documents/{id}
//! ```
//!
//! Every path is scoped by the deployment (tenant) id, and writes replace the
//! whole document. The change feed is a polling diff over `list`: the backend
//! exposes no push endpoint to plain HTTP clients, so watchers see changes at
//! poll-interval granularity.

use crate::config::FileStoreConfig;
use async_trait::async_trait;
use duma_application::ports::change_feed::{ChangeEvent, ChangeFeed, ChangeStream};
use duma_application::ports::document_store::{Collection, DocumentStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use tracing::{debug, warn};

/// One `(id, document)` pair on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct DocumentEnvelope {
    id: String,
    document: Value,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<DocumentEnvelope>,
}

#[derive(Debug, Serialize)]
struct PutBody<'a> {
    document: &'a Value,
}

/// HTTP client for the hosted document database.
#[derive(Clone)]
pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
    tenant: String,
    auth_token: Option<String>,
    poll_interval: Duration,
}

impl RestDocumentStore {
    pub fn new(base_url: impl Into<String>, tenant: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tenant: tenant.into(),
            auth_token: None,
            poll_interval: Duration::from_secs(3),
        })
    }

    pub fn from_config(config: &FileStoreConfig) -> Result<Self, StoreError> {
        let mut store = Self::new(&config.base_url, &config.tenant)?;
        store.auth_token = config.auth_token.clone();
        store.poll_interval = Duration::from_secs(config.poll_interval_secs.max(1));
        Ok(store)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!(
            "{}/v1/deployments/{}/collections/{}/documents",
            self.base_url,
            self.tenant,
            collection.name()
        )
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(response)
        } else {
            Err(StoreError::Rejected(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )))
        }
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn put(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        debug!("PUT {url}");
        let response = self
            .send(self.client.put(&url).json(&PutBody { document: &document }))
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::Rejected(format!(
                "collection {} not provisioned",
                collection.name()
            )));
        }
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError> {
        let url = self.document_url(collection, id);
        let response = self.send(self.client.get(&url)).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: DocumentEnvelope = response.json().await.map_err(|e| StoreError::Malformed {
            collection,
            id: id.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(envelope.document))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        debug!("DELETE {url}");
        // deleting an absent document reports 404; that is not an error here
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<(String, Value)>, StoreError> {
        let url = self.collection_url(collection);
        let response = self.send(self.client.get(&url)).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let list: DocumentList = response.json().await.map_err(|e| StoreError::Malformed {
            collection,
            id: String::new(),
            message: e.to_string(),
        })?;
        Ok(list
            .documents
            .into_iter()
            .map(|env| (env.id, env.document))
            .collect())
    }
}

/// Poll-and-diff state behind one change stream.
struct PollState {
    store: RestDocumentStore,
    collection: Collection,
    known: BTreeMap<String, Value>,
    buffer: VecDeque<ChangeEvent>,
}

impl PollState {
    fn diff(&mut self, docs: Vec<(String, Value)>) {
        let next: BTreeMap<String, Value> = docs.into_iter().collect();
        for (id, document) in &next {
            if self.known.get(id) != Some(document) {
                self.buffer.push_back(ChangeEvent::Put {
                    collection: self.collection,
                    id: id.clone(),
                    document: document.clone(),
                });
            }
        }
        for id in self.known.keys() {
            if !next.contains_key(id) {
                self.buffer.push_back(ChangeEvent::Delete {
                    collection: self.collection,
                    id: id.clone(),
                });
            }
        }
        self.known = next;
    }
}

#[async_trait]
impl ChangeFeed for RestDocumentStore {
    async fn watch(&self, collection: Collection) -> Result<ChangeStream, StoreError> {
        // seed with the current snapshot so the stream carries changes only;
        // initial state comes from hydration, not the feed
        let known: BTreeMap<String, Value> = self.list(collection).await?.into_iter().collect();
        let state = PollState {
            store: self.clone(),
            collection,
            known,
            buffer: VecDeque::new(),
        };

        let stream = futures::stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.buffer.pop_front() {
                    return Some((event, state));
                }
                tokio::time::sleep(state.store.poll_interval).await;
                match state.store.list(state.collection).await {
                    Ok(docs) => state.diff(docs),
                    Err(e) => warn!("Change feed poll failed: {e}"),
                }
            }
        });
        Ok(Box::pin(stream))
    }
}
