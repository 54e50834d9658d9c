use std::sync::Arc;

use crate::{
    repository::employee::EmployeeRepository,
    service::{employee::EmployeeService, insert::InsertCoordinator},
    utils::asset_store::AssetStore,
};

/// Shared by every worker. Must be built once, outside the `HttpServer`
/// factory, so all workers serialize inserts through the same coordinator.
pub struct AppState {
    pub employees: EmployeeService,
    pub inserts: InsertCoordinator,
}

impl AppState {
    pub fn new(repo: Arc<dyn EmployeeRepository>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            employees: EmployeeService::new(repo.clone()),
            inserts: InsertCoordinator::new(repo, assets),
        }
    }
}
