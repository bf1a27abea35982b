//! Store doubles for exercising failure and cancellation paths.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::{
    ports::{DocumentStore, StoreConnector},
    Connection, DocumentFilter, DocumentStatus, DocumentType, DomainError,
};

/// How a [`ScriptedStore`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Every read and write stays pending forever.
    Hang,
    /// Scalar counts succeed, grouped counts fail.
    FailGroupedCounts,
}

pub struct ScriptedStore {
    behavior: Behavior,
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find(&self, _filter: &DocumentFilter, _limit: i64) -> Result<Vec<Value>, DomainError> {
        if self.behavior == Behavior::Hang {
            std::future::pending::<()>().await;
        }
        Ok(Vec::new())
    }

    async fn update_payload(
        &self,
        _id: &str,
        _payload: Value,
        _updated_at: &str,
    ) -> Result<bool, DomainError> {
        if self.behavior == Behavior::Hang {
            std::future::pending::<()>().await;
        }
        Ok(true)
    }

    async fn count(&self, _status: Option<DocumentStatus>) -> Result<u64, DomainError> {
        Ok(3)
    }

    async fn count_by_status(
        &self,
        doc_type: DocumentType,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        match self.behavior {
            Behavior::FailGroupedCounts => Err(DomainError::external(format!(
                "aggregate on {doc_type} timed out"
            ))),
            Behavior::Hang => Ok(Vec::new()),
        }
    }
}

impl Drop for ScriptedStore {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// Hands out [`ScriptedStore`] sessions and remembers whether the last one
/// has been released.
pub struct ScriptedConnector {
    behavior: Behavior,
    dropped: Arc<AtomicBool>,
}

impl ScriptedConnector {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session_released(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for ScriptedConnector {
    async fn connect(&self, _connection: &Connection) -> Result<Box<dyn DocumentStore>, DomainError> {
        self.dropped.store(false, Ordering::SeqCst);
        Ok(Box::new(ScriptedStore {
            behavior: self.behavior,
            dropped: self.dropped.clone(),
        }))
    }
}
