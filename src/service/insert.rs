use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::AppResult,
    model::employee::{Employee, NewEmployee, UploadedAsset},
    repository::employee::EmployeeRepository,
    utils::asset_store::AssetStore,
};

/// Registers new employees together with their uploaded image.
///
/// Ids are handed out as `max(id) + 1`, so the read-then-write sequence runs
/// under `lock`. Build one coordinator per process and share it.
pub struct InsertCoordinator {
    repo: Arc<dyn EmployeeRepository>,
    assets: Arc<dyn AssetStore>,
    lock: Mutex<()>,
}

impl InsertCoordinator {
    pub fn new(repo: Arc<dyn EmployeeRepository>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            repo,
            assets,
            lock: Mutex::new(()),
        }
    }

    /// Store the asset, then insert the row under the next free id.
    ///
    /// A failed asset write leaves the table untouched; a failed row insert
    /// removes the asset again.
    pub async fn insert(
        &self,
        new_employee: NewEmployee,
        asset: UploadedAsset,
    ) -> AppResult<Employee> {
        let _guard = self.lock.lock().await;

        let image = self.assets.store(&asset.file_name, &asset.data).await?;

        match self.insert_row(new_employee, image.clone()).await {
            Ok(employee) => {
                info!(employee_id = employee.id, image = %image, "Employee registered");
                Ok(employee)
            }
            Err(e) => {
                if let Err(cleanup) = self.assets.remove(&image).await {
                    warn!(error = %cleanup, image = %image, "Failed to remove orphaned asset");
                }
                Err(e)
            }
        }
    }

    async fn insert_row(&self, new_employee: NewEmployee, image: String) -> AppResult<Employee> {
        let id = self.repo.find_max_id().await? + 1;
        let employee = new_employee.into_employee(id, image);
        self.repo.insert(&employee).await?;
        Ok(employee)
    }
}
