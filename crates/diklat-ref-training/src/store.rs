//! In-memory implementation of `Repository`.
//!
//! `InMemoryRepository` is the reference persistence collaborator. Rows live
//! in a `Vec` behind a `RwLock`, in insertion order, so results are stable
//! across calls. Every scope and filter of a query is applied here, before
//! pagination, exactly as a SQL backend would place them in its `WHERE`.

use std::sync::RwLock;

use diklat_contracts::{
    envelope::PageRequest,
    error::{AccessError, AccessResult},
    resource::ResourceType,
    scope::{Scopable, ScopedQuery},
};
use diklat_core::traits::{QueryPage, Repository};

pub struct InMemoryRepository<T> {
    resource: ResourceType,
    rows: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T>
where
    T: Scopable + Clone + Send + Sync,
{
    pub fn new(resource: ResourceType, rows: Vec<T>) -> Self {
        Self {
            resource,
            rows: RwLock::new(rows),
        }
    }

    /// Append a row. Fails if a row with the same id exists.
    pub fn insert(&self, row: T) -> AccessResult<()> {
        let mut rows = self.write()?;
        if rows.iter().any(|r| r.id() == row.id()) {
            return Err(AccessError::InvalidInput {
                reason: format!("{} '{}' already exists", self.resource, row.id()),
            });
        }
        rows.push(row);
        Ok(())
    }

    /// Replace the row with the same id.
    pub fn replace(&self, row: T) -> AccessResult<()> {
        let mut rows = self.write()?;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == row.id())
            .ok_or_else(|| self.not_found(row.id()))?;
        *slot = row;
        Ok(())
    }

    /// Remove and return the row with `id`.
    pub fn remove(&self, id: &str) -> AccessResult<T> {
        let mut rows = self.write()?;
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| self.not_found(id))?;
        Ok(rows.remove(index))
    }

    pub fn len(&self) -> AccessResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> AccessResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> AccessResult<std::sync::RwLockReadGuard<'_, Vec<T>>> {
        self.rows.read().map_err(|e| AccessError::StorageError {
            reason: format!("{} store lock poisoned: {}", self.resource, e),
        })
    }

    fn write(&self) -> AccessResult<std::sync::RwLockWriteGuard<'_, Vec<T>>> {
        self.rows.write().map_err(|e| AccessError::StorageError {
            reason: format!("{} store lock poisoned: {}", self.resource, e),
        })
    }

    fn not_found(&self, id: &str) -> AccessError {
        AccessError::NotFound {
            resource: self.resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl<T> Repository for InMemoryRepository<T>
where
    T: Scopable + Clone + Send + Sync,
{
    type Record = T;

    fn resource(&self) -> ResourceType {
        self.resource
    }

    fn find(&self, query: &ScopedQuery, page: PageRequest) -> AccessResult<QueryPage<T>> {
        if query.resource() != self.resource {
            return Err(AccessError::InvalidInput {
                reason: format!(
                    "query for '{}' sent to the '{}' store",
                    query.resource(),
                    self.resource
                ),
            });
        }

        let rows = self.read()?;
        let matched: Vec<&T> = rows.iter().filter(|r| query.matches(*r)).collect();
        let total = matched.len() as u64;

        Ok(QueryPage {
            rows: matched
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .cloned()
                .collect(),
            total,
        })
    }

    fn get(&self, id: &str) -> AccessResult<Option<T>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }
}
