use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    model::{employee::Employee, paging::Paging},
    repository::employee::{EmployeeRepository, PageLookup},
};

/// In-process stand-in for the `employees` table used by unit tests.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    rows: Mutex<Vec<Employee>>,
}

impl InMemoryEmployeeRepository {
    pub fn with_rows(rows: Vec<Employee>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn snapshot(&self) -> Vec<Employee> {
        self.rows.lock().unwrap().clone()
    }

    fn sorted_matching(&self, name: &str) -> Vec<Employee> {
        let mut rows: Vec<Employee> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| name.is_empty() || e.name.contains(name))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.hire_date.cmp(&b.hire_date).then(a.id.cmp(&b.id)));
        rows
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        Ok(self.sorted_matching(""))
    }

    async fn find_page(&self, paging: &Paging, name: &str) -> AppResult<PageLookup> {
        let page: Vec<Employee> = self
            .sorted_matching(name)
            .into_iter()
            .skip(paging.offset() as usize)
            .take(paging.page_size() as usize)
            .collect();

        if page.is_empty() {
            Ok(PageLookup::NoMatches)
        } else {
            Ok(PageLookup::Found(page))
        }
    }

    async fn load(&self, id: i32) -> AppResult<Employee> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    async fn update_dependents_count(&self, id: i32, dependents_count: i32) -> AppResult<()> {
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|e| e.id == id) {
            row.dependents_count = dependents_count;
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Employee>> {
        Ok(self
            .sorted_matching("")
            .into_iter()
            .filter(|e| e.name.contains(name))
            .collect())
    }

    async fn insert(&self, employee: &Employee) -> AppResult<()> {
        // let a concurrent caller observe the same max id if nothing serializes us
        tokio::task::yield_now().await;

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|e| e.id == employee.id) {
            return Err(AppError::UniqueConstraintViolation(employee.id));
        }
        rows.push(employee.clone());
        Ok(())
    }

    async fn find_max_id(&self) -> AppResult<i32> {
        let max_id = self.rows.lock().unwrap().iter().map(|e| e.id).max();
        tokio::task::yield_now().await;
        Ok(max_id.unwrap_or(0))
    }

    async fn count_matching(&self, name: &str) -> AppResult<i64> {
        Ok(self.sorted_matching(name).len() as i64)
    }
}
