use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error};

use crate::{
    error::{AppError, AppResult},
    model::{employee::Employee, paging::Paging},
    utils::db_utils::{NameFilter, contains_pattern, is_duplicate_key},
};

/// Column list for `employees` queries.
const EMPLOYEE_COLUMNS: &str = "\
    id, name, image, gender, hire_date, mail_address, zip_code, \
    address, telephone, salary, characteristics, dependents_count";

/// Outcome of a paged lookup.
///
/// `NoMatches` means the filtered window held no rows at all, which callers
/// treat differently from a page that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Found(Vec<Employee>),
    NoMatches,
}

/// Storage operations over the `employees` table.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Every employee, oldest hire first.
    async fn find_all(&self) -> AppResult<Vec<Employee>>;

    /// One page of employees, optionally filtered by a name substring.
    async fn find_page(&self, paging: &Paging, name: &str) -> AppResult<PageLookup>;

    /// The employee with `id`, or [`AppError::NotFound`].
    async fn load(&self, id: i32) -> AppResult<Employee>;

    /// Overwrite the dependents count. Unknown ids are ignored.
    async fn update_dependents_count(&self, id: i32, dependents_count: i32) -> AppResult<()>;

    /// Employees whose name contains `name`, oldest hire first.
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Employee>>;

    async fn insert(&self, employee: &Employee) -> AppResult<()>;

    /// Greatest stored id, 0 for an empty table.
    async fn find_max_id(&self) -> AppResult<i32>;

    /// Number of employees matched by the same filter as [`find_page`](Self::find_page).
    async fn count_matching(&self, name: &str) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY hire_date, id");

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, sql = %sql, "Failed to fetch employees");
                e
            })?;

        Ok(employees)
    }

    async fn find_page(&self, paging: &Paging, name: &str) -> AppResult<PageLookup> {
        let filter = NameFilter::new(name);
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees {} ORDER BY hire_date, id LIMIT ? OFFSET ?",
            filter.where_clause
        );
        debug!(
            sql = %sql,
            pattern = ?filter.pattern,
            page = paging.current_page(),
            "Fetching employee page"
        );

        let mut query = sqlx::query_as::<_, Employee>(&sql);
        if let Some(pattern) = filter.pattern {
            query = query.bind(pattern);
        }
        let employees = query
            .bind(i64::from(paging.page_size()))
            .bind(paging.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, sql = %sql, "Failed to fetch employee page");
                e
            })?;

        if employees.is_empty() {
            Ok(PageLookup::NoMatches)
        } else {
            Ok(PageLookup::Found(employees))
        }
    }

    async fn load(&self, id: i32) -> AppResult<Employee> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = id, "Failed to fetch employee");
                e
            })?
            .ok_or(AppError::NotFound(id))
    }

    async fn update_dependents_count(&self, id: i32, dependents_count: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE employees SET dependents_count = ? WHERE id = ?")
            .bind(dependents_count)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = id, "Failed to update dependents count");
                e
            })?;

        if result.rows_affected() == 0 {
            debug!(employee_id = id, "Dependents count update matched no row");
        }

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE name LIKE ? ORDER BY hire_date, id"
        );

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(contains_pattern(name))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, search = %name, "Failed to search employees");
                e
            })?;

        Ok(employees)
    }

    async fn insert(&self, employee: &Employee) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO employees ({EMPLOYEE_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );

        sqlx::query(&sql)
            .bind(employee.id)
            .bind(&employee.name)
            .bind(&employee.image)
            .bind(&employee.gender)
            .bind(employee.hire_date)
            .bind(&employee.mail_address)
            .bind(&employee.zip_code)
            .bind(&employee.address)
            .bind(&employee.telephone)
            .bind(employee.salary)
            .bind(&employee.characteristics)
            .bind(employee.dependents_count)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::UniqueConstraintViolation(employee.id)
                } else {
                    error!(error = %e, employee_id = employee.id, "Failed to insert employee");
                    AppError::Database(e)
                }
            })?;

        Ok(())
    }

    async fn find_max_id(&self) -> AppResult<i32> {
        let max_id = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(id) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(max_id.unwrap_or(0))
    }

    async fn count_matching(&self, name: &str) -> AppResult<i64> {
        let filter = NameFilter::new(name);
        let sql = format!("SELECT COUNT(*) AS total FROM employees {}", filter.where_clause);
        debug!(sql = %sql, pattern = ?filter.pattern, "Counting employees");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(pattern) = filter.pattern {
            query = query.bind(pattern);
        }

        let total = query.fetch_one(&self.pool).await.map_err(|e| {
            error!(error = %e, sql = %sql, "Failed to count employees");
            e
        })?;

        Ok(total)
    }
}
