//! Project store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId},
    HoursError,
};

/// Outbound port for project persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn insert(&self, project: &NewProject) -> Result<Project, HoursError>;

    async fn get(&self, id: ProjectId) -> Result<Option<Project>, HoursError>;

    /// All projects, most recently created first.
    async fn list(&self) -> Result<Vec<Project>, HoursError>;

    /// Persist the editable fields of an existing project. `total_minutes`
    /// is left alone; use [`ProjectRepository::set_total_minutes`].
    async fn update(&self, project: &Project) -> Result<(), HoursError>;

    async fn set_total_minutes(&self, id: ProjectId, minutes: i32) -> Result<(), HoursError>;

    /// Returns `false` when no project had that id.
    async fn delete(&self, id: ProjectId) -> Result<bool, HoursError>;
}
