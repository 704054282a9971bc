//! In-memory backend for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::api::{Backend, ClientError, ClientResult, Endpoint};

/// Backend answering from per-endpoint scripts.
///
/// Responses queue up per endpoint; the last one queued keeps answering
/// once the others are used up. Every call is recorded.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: RefCell<HashMap<Endpoint, VecDeque<ClientResult<Value>>>>,
    calls: RefCell<Vec<(Endpoint, Option<Value>)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, endpoint: Endpoint, body: Value) {
        self.push(endpoint, Ok(body));
    }

    pub fn fail(&self, endpoint: Endpoint, error: ClientError) {
        self.push(endpoint, Err(error));
    }

    /// Drop everything queued for an endpoint
    pub fn clear(&self, endpoint: Endpoint) {
        self.scripts.borrow_mut().remove(&endpoint);
    }

    fn push(&self, endpoint: Endpoint, result: ClientResult<Value>) {
        self.scripts
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<(Endpoint, Option<Value>)> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Option<Value>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(called, _)| *called == endpoint)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl Backend for ScriptedBackend {
    async fn send(&self, endpoint: Endpoint, body: Option<Value>) -> ClientResult<Value> {
        self.calls.borrow_mut().push((endpoint, body));

        let mut scripts = self.scripts.borrow_mut();
        let queue = match scripts.get_mut(&endpoint) {
            Some(queue) if !queue.is_empty() => queue,
            _ => return Err(ClientError::Network(format!("no script for {}", endpoint))),
        };

        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err(ClientError::Network("empty".into())))
        } else {
            queue[0].clone()
        }
    }
}
