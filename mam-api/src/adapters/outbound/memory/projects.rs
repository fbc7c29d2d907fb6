use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewProject, Project, ProjectId},
    ports::outbound::ProjectRepository,
    HoursError,
};

/// Project store backed by an in-memory HashMap.
#[derive(Clone, Default)]
pub struct MemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
    next_id: Arc<AtomicI32>,
    fail_totals: Arc<AtomicBool>,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `set_total_minutes` fail while other calls keep working.
    pub fn set_fail_totals(&self, fail: bool) {
        self.fail_totals.store(fail, Ordering::SeqCst);
    }

    /// Stored total for assertions, `None` for unknown projects.
    pub fn total_minutes(&self, id: ProjectId) -> Option<i32> {
        self.projects.read().unwrap().get(&id).map(|p| p.total_minutes)
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn insert(&self, project: &NewProject) -> Result<Project, HoursError> {
        let id = ProjectId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let project = Project::from_new(id, project.clone(), OffsetDateTime::now_utc());
        self.projects.write().unwrap().insert(id, project.clone());

        Ok(project)
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>, HoursError> {
        Ok(self.projects.read().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>, HoursError> {
        let mut projects: Vec<Project> = self.projects.read().unwrap().values().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(projects)
    }

    async fn update(&self, project: &Project) -> Result<(), HoursError> {
        let mut projects = self.projects.write().unwrap();
        match projects.get_mut(&project.id) {
            Some(stored) => {
                let total_minutes = stored.total_minutes;
                *stored = project.clone();
                stored.total_minutes = total_minutes;
                Ok(())
            }
            None => Err(HoursError::ProjectNotFound(project.id)),
        }
    }

    async fn set_total_minutes(&self, id: ProjectId, minutes: i32) -> Result<(), HoursError> {
        if self.fail_totals.load(Ordering::SeqCst) {
            return Err(HoursError::storage("write timed out"));
        }

        let mut projects = self.projects.write().unwrap();
        let project = projects
            .get_mut(&id)
            .ok_or(HoursError::ProjectNotFound(id))?;
        project.total_minutes = minutes;

        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, HoursError> {
        Ok(self.projects.write().unwrap().remove(&id).is_some())
    }
}
