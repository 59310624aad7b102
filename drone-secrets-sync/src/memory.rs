//! In-memory [`SecretStore`] that records every call.
//!
//! Behaves like a strict remote store (creating an existing entry or
//! touching a missing one fails) and can be told to fail specific calls.

use std::cell::RefCell;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::store::{SecretStore, StoreError};

/// One call made against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create { name: String, value: String },
    Update { name: String, value: String },
    Delete { name: String },
}

impl StoreCall {
    pub fn create(name: &str, value: &str) -> Self {
        StoreCall::Create {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    pub fn update(name: &str, value: &str) -> Self {
        StoreCall::Update {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    pub fn delete(name: &str) -> Self {
        StoreCall::Delete {
            name: name.to_owned(),
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreCall::List)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("injected failure on {0:?}")]
    Injected(StoreCall),

    #[error("secret {0} already exists")]
    AlreadyExists(String),

    #[error("secret {0} not found")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    calls: RefCell<Vec<StoreCall>>,
    failures: RefCell<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `names`, each with a placeholder value.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(names.into_iter().map(|n| (n.into(), String::from("?"))));
        store
    }

    /// Make every future call equal to `call` fail.
    pub fn fail_on(&self, call: StoreCall) {
        self.failures.borrow_mut().push(call);
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Recorded calls other than listings.
    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: StoreCall) -> Result<(), MemoryStoreError> {
        self.calls.borrow_mut().push(call.clone());
        if self.failures.borrow().contains(&call) {
            return Err(MemoryStoreError::Injected(call));
        }
        Ok(())
    }
}

impl SecretStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        self.record(StoreCall::List)?;
        Ok(self.names())
    }

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.record(StoreCall::create(name, value))?;
        let mut entries = self.entries.borrow_mut();
        if entries.contains_key(name) {
            return Err(MemoryStoreError::AlreadyExists(name.to_owned()).into());
        }
        entries.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.record(StoreCall::update(name, value))?;
        match self.entries.borrow_mut().get_mut(name) {
            Some(existing) => {
                *existing = value.to_owned();
                Ok(())
            }
            None => Err(MemoryStoreError::NotFound(name.to_owned()).into()),
        }
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.record(StoreCall::delete(name))?;
        match self.entries.borrow_mut().remove(name) {
            Some(_) => Ok(()),
            None => Err(MemoryStoreError::NotFound(name.to_owned()).into()),
        }
    }
}
