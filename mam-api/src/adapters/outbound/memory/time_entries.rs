use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{DateRange, NewTimeEntry, ProjectId, TimeEntry, TimeEntryId, UserId},
    ports::outbound::TimeEntryRepository,
    HoursError,
};

/// Time entry store backed by an in-memory HashMap.
#[derive(Clone, Default)]
pub struct MemoryTimeEntryRepository {
    entries: Arc<RwLock<HashMap<TimeEntryId, TimeEntry>>>,
    next_id: Arc<AtomicI32>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryTimeEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    fn check_available(&self) -> Result<(), HoursError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(HoursError::storage("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl TimeEntryRepository for MemoryTimeEntryRepository {
    async fn insert(&self, entry: &NewTimeEntry) -> Result<TimeEntry, HoursError> {
        self.check_available()?;

        let id = TimeEntryId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let entry = TimeEntry::from_new(id, entry.clone(), OffsetDateTime::now_utc());
        self.entries.write().unwrap().insert(id, entry.clone());

        Ok(entry)
    }

    async fn get(&self, id: TimeEntryId) -> Result<Option<TimeEntry>, HoursError> {
        self.check_available()?;
        Ok(self.entries.read().unwrap().get(&id).cloned())
    }

    async fn list_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<Vec<TimeEntry>, HoursError> {
        self.check_available()?;

        let mut entries: Vec<TimeEntry> = self
            .entries
            .read()
            .unwrap()
            .values()
            .filter(|e| &e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(entries)
    }

    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<TimeEntry>, HoursError> {
        self.check_available()?;

        Ok(self
            .entries
            .read()
            .unwrap()
            .values()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update(&self, entry: &TimeEntry) -> Result<(), HoursError> {
        self.check_available()?;

        let mut entries = self.entries.write().unwrap();
        match entries.get_mut(&entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(HoursError::TimeEntryNotFound(entry.id)),
        }
    }

    async fn delete(&self, id: TimeEntryId) -> Result<bool, HoursError> {
        self.check_available()?;
        Ok(self.entries.write().unwrap().remove(&id).is_some())
    }
}
