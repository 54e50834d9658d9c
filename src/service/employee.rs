use std::sync::Arc;

use crate::{
    error::AppResult,
    model::{employee::Employee, paging::Paging},
    repository::employee::{EmployeeRepository, PageLookup},
};

/// Result of a name search.
///
/// When nothing matched, `employees` holds the full list instead and
/// `no_results` is raised so the view can show an advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub employees: Vec<Employee>,
    pub no_results: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub paging: Paging,
    pub no_results: bool,
}

/// Read and update use cases over the employee store.
#[derive(Clone)]
pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn show_list(&self) -> AppResult<Vec<Employee>> {
        self.repo.find_all().await
    }

    pub async fn show_page(&self, current_page: u32, name: &str) -> AppResult<EmployeePage> {
        let mut paging = Paging::new(current_page);
        let total = self.repo.count_matching(name).await?;
        paging.set_total_records(u64::try_from(total).unwrap_or(0));

        let page = match self.repo.find_page(&paging, name).await? {
            PageLookup::Found(employees) => EmployeePage {
                employees,
                paging,
                no_results: false,
            },
            PageLookup::NoMatches => EmployeePage {
                employees: Vec::new(),
                paging,
                no_results: true,
            },
        };

        Ok(page)
    }

    pub async fn show_detail(&self, id: i32) -> AppResult<Employee> {
        self.repo.load(id).await
    }

    pub async fn update_dependents_count(&self, id: i32, dependents_count: i32) -> AppResult<()> {
        self.repo.update_dependents_count(id, dependents_count).await
    }

    /// Substring search on the name. An empty `name` lists everyone; a
    /// search with no hits falls back to everyone plus the advisory flag.
    pub async fn search(&self, name: &str) -> AppResult<SearchResult> {
        let employees = if name.is_empty() {
            self.show_list().await?
        } else {
            self.repo.find_by_name(name).await?
        };

        if employees.is_empty() {
            return Ok(SearchResult {
                employees: self.show_list().await?,
                no_results: true,
            });
        }

        Ok(SearchResult {
            employees,
            no_results: false,
        })
    }

    pub async fn total_records(&self, name: &str) -> AppResult<i64> {
        self.repo.count_matching(name).await
    }

    pub async fn find_max_id(&self) -> AppResult<i32> {
        self.repo.find_max_id().await
    }
}
