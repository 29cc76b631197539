//! In-memory executor for unit tests
//!
//! Serves canned v2 JSON payloads keyed by path and query, and records every
//! call so tests can assert how many pages were fetched.

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::pagination::Page;
use crate::v2::{ListRequest, ListResponse, SingleRequest};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned responses plus a call log
#[derive(Default)]
pub(crate) struct FakeExecutor {
    lists: HashMap<String, Vec<Value>>,
    singles: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
    latency: Option<Duration>,
}

impl FakeExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` (v2 list bodies) for `path` with exactly `query`
    pub(crate) fn with_list(mut self, path: &str, query: &[(&str, &str)], pages: Vec<Value>) -> Self {
        let query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.lists.insert(list_key(path, &query), pages);
        self
    }

    /// Serve `body` for `method path`
    pub(crate) fn with_single(mut self, method: &str, path: &str, body: Value) -> Self {
        self.singles.insert(format!("{method} {path}"), body);
        self
    }

    /// Delay every list call by `latency` after recording it
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every call issued so far
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of calls whose description starts with `prefix`
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn list<R>(&self, request: &R, page: u32) -> Result<Page<R::Entity>>
    where
        R: ListRequest,
    {
        request.validate()?;
        let key = list_key(&request.path(), &request.query_params());
        self.record(format!("GET {key} page={page}"));
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let body = self
            .lists
            .get(&key)
            .and_then(|pages| pages.get(page as usize - 1))
            .ok_or_else(|| Error::http_status(404, format!("no canned page {page} for {key}")))?;
        let response: ListResponse<R::Entity> =
            serde_json::from_value(body.clone()).map_err(|e| Error::decode(e.to_string()))?;
        Ok(response.into_page(page))
    }

    async fn send<R>(&self, request: &R) -> Result<R::Response>
    where
        R: SingleRequest,
    {
        request.validate()?;
        let key = format!("{:?} {}", request.method(), request.path());
        self.record(key.clone());

        let body = self
            .singles
            .get(&key)
            .ok_or_else(|| Error::http_status(404, format!("no canned response for {key}")))?;
        serde_json::from_value(body.clone()).map_err(|e| Error::decode(e.to_string()))
    }
}

fn list_key(path: &str, query: &[(String, String)]) -> String {
    let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", query.join("&"))
}

/// A v2 resource with the given guid and entity
pub(crate) fn resource(id: &str, entity: Value) -> Value {
    json!({
        "metadata": {
            "guid": id,
            "url": format!("/v2/things/{id}"),
            "created_at": "2015-07-27T22:43:08Z"
        },
        "entity": entity
    })
}

/// A named v2 resource
pub(crate) fn named(id: &str, name: &str) -> Value {
    resource(id, json!({ "name": name }))
}

/// One v2 list page
pub(crate) fn list_page(resources: Vec<Value>, total_pages: u32, total_results: u64) -> Value {
    json!({
        "total_results": total_results,
        "total_pages": total_pages,
        "prev_url": null,
        "next_url": null,
        "resources": resources
    })
}
