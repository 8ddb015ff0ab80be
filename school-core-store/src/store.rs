//! In-memory reference backend with unit-of-work semantics.
//!
//! Every unit of work operates on a private copy of the committed tables.
//! `commit` publishes the copy in one step; dropping or rolling back simply
//! discards it. Writers are serialized by a gate held for the lifetime of
//! the unit of work, so two commits never interleave.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock as ParkingRwLock;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use school_core_db::models::{EnrollmentModel, RepresentativeModel, StudentModel};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Transaction has been consumed")]
    TransactionConsumed,

    #[error("{entity} {id} already exists")]
    DuplicateId { entity: &'static str, id: Uuid },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Conversion error: {0}")]
    Conversion(String),
}

/// Stored rows keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub representatives: BTreeMap<Uuid, RepresentativeModel>,
    pub students: BTreeMap<Uuid, StudentModel>,
    pub enrollments: BTreeMap<Uuid, EnrollmentModel>,
}

/// Shared handle to the working copy of one unit of work.
///
/// Repositories built for the same unit of work share one executor.
/// `None` means the unit of work has been committed or rolled back.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Tables>>>,
}

impl Executor {
    pub fn new(tables: Tables) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tables))),
        }
    }
}

pub struct UnitOfWork {
    executor: Executor,
    committed: Arc<ParkingRwLock<Tables>>,
    _write_guard: OwnedMutexGuard<()>,
}

impl UnitOfWork {
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Publish the working copy as the new committed state.
    pub async fn commit(self) -> Result<(), StoreError> {
        let tables = self
            .executor
            .tx
            .lock()
            .await
            .take()
            .ok_or(StoreError::TransactionConsumed)?;
        *self.committed.write() = tables;
        tracing::debug!("unit of work committed");
        Ok(())
    }

    /// Discard the working copy.
    pub async fn rollback(self) {
        self.executor.tx.lock().await.take();
        tracing::debug!("unit of work rolled back");
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    committed: Arc<ParkingRwLock<Tables>>,
    write_gate: Arc<Mutex<()>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a unit of work, waiting for any other writer to finish.
    pub async fn begin(&self) -> UnitOfWork {
        let write_guard = self.write_gate.clone().lock_owned().await;
        let snapshot = self.committed.read().clone();
        UnitOfWork {
            executor: Executor::new(snapshot),
            committed: self.committed.clone(),
            _write_guard: write_guard,
        }
    }

    /// Executor over a copy of the committed state, for lookups that never commit.
    pub fn read_only(&self) -> Executor {
        Executor::new(self.committed.read().clone())
    }

    /// Copy of the committed state
    pub fn snapshot(&self) -> Tables {
        self.committed.read().clone()
    }
}
