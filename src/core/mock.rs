//! Test doubles for the provider and session-store seams.
//!
//! Compiled for unit tests and, behind the `mock` feature, for the
//! native integration tests. Nothing here ships in a release build.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::WalletError;
use crate::core::provider::Eip1193;
use crate::core::session::SessionStore;

/// Scripted EIP-1193 provider.
///
/// Responses are queued per method and consumed in order. An unscripted
/// method fails loudly so a test cannot drift past a missing
/// expectation. Every request is recorded for assertions.
#[derive(Default)]
pub struct MockProvider {
    recognized: bool,
    responses: RefCell<HashMap<String, VecDeque<Result<Value, WalletError>>>>,
    calls: RefCell<Vec<(String, Option<Value>)>>,
}

impl MockProvider {
    /// A provider that self-reports as a known wallet.
    pub fn new() -> Self {
        Self { recognized: true, ..Self::default() }
    }

    /// Same provider without the known-wallet self-report.
    pub fn unrecognized(mut self) -> Self {
        self.recognized = false;
        self
    }

    /// Queue the next response for `method`.
    pub fn script(&self, method: &str, response: Result<Value, WalletError>) {
        self.responses
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Methods requested so far, in call order.
    pub fn called_methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(method, _)| method.clone()).collect()
    }

    /// Params of the first call to `method`, if it was called.
    pub fn params_of(&self, method: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .find(|(called, _)| called == method)
            .and_then(|(_, params)| params.clone())
    }
}

#[async_trait(?Send)]
impl Eip1193 for MockProvider {
    fn is_recognized(&self) -> bool {
        self.recognized
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        self.calls.borrow_mut().push((method.to_string(), params));
        self.responses
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(WalletError::Unknown(format!("unscripted method: {method}"))))
    }
}

/// In-memory [`SessionStore`].
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Copy of the current contents, for flag assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
