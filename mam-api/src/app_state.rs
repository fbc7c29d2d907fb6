use std::sync::Arc;

use sqlx::PgPool;
use time::UtcOffset;

use crate::{
    adapters::outbound::postgres::{PostgresProjectRepository, PostgresTimeEntryRepository},
    domain::{ports::inbound::HoursService, services::HoursServiceImpl},
};

#[derive(Clone)]
pub struct AppState {
    pub hours_service: Arc<dyn HoursService>,
}

impl AppState {
    /// Wire the Postgres-backed stores into the hours service.
    ///
    /// `offset` is the server's local offset; week boundaries are computed in it.
    pub fn new(db_pool: PgPool, offset: UtcOffset) -> Self {
        let entries = PostgresTimeEntryRepository::new(db_pool.clone());
        let projects = PostgresProjectRepository::new(db_pool);
        let service = HoursServiceImpl::new(Arc::new(entries), Arc::new(projects), offset);

        Self::with_service(Arc::new(service))
    }

    pub fn with_service(hours_service: Arc<dyn HoursService>) -> Self {
        Self { hours_service }
    }
}
