//! Integration tests for the MySQL-backed employee repository.
//!
//! Each test gets a fresh database with the crate migrations applied. They
//! need `DATABASE_URL` pointing at a MySQL server, so they are ignored by
//! default; run them with `cargo test -- --ignored`.

use std::sync::Arc;

use chrono::NaiveDate;
use employee_records::error::AppError;
use employee_records::model::employee::{Employee, NewEmployee, UploadedAsset};
use employee_records::model::paging::Paging;
use employee_records::repository::employee::{
    EmployeeRepository, MySqlEmployeeRepository, PageLookup,
};
use employee_records::service::insert::InsertCoordinator;
use employee_records::utils::asset_store::FsAssetStore;
use sqlx::MySqlPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn employee(id: i32, name: &str, hire_date: (i32, u32, u32)) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        image: Some(format!("{id}.png")),
        gender: "female".to_string(),
        hire_date: NaiveDate::from_ymd_opt(hire_date.0, hire_date.1, hire_date.2).unwrap(),
        mail_address: format!("{}@example.com", name.to_lowercase()),
        zip_code: "100-0001".to_string(),
        address: "Chiyoda, Tokyo".to_string(),
        telephone: "03-0000-0000".to_string(),
        salary: 250_000,
        characteristics: "Punctual".to_string(),
        dependents_count: 1,
    }
}

async fn seeded(pool: MySqlPool) -> MySqlEmployeeRepository {
    let repo = MySqlEmployeeRepository::new(pool);
    repo.insert(&employee(1, "Alice", (2020, 4, 1))).await.unwrap();
    repo.insert(&employee(2, "Bob", (2018, 10, 1))).await.unwrap();
    repo.insert(&employee(3, "Alina", (2022, 1, 15))).await.unwrap();
    repo
}

fn names(employees: &[Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn find_all_orders_by_hire_date(pool: MySqlPool) {
    let repo = seeded(pool).await;

    let all = repo.find_all().await.unwrap();

    assert_eq!(names(&all), ["Bob", "Alice", "Alina"]);
    assert_eq!(all.len() as i64, repo.count_matching("").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn empty_table_yields_empty_list_and_zero_max_id(pool: MySqlPool) {
    let repo = MySqlEmployeeRepository::new(pool);

    assert!(repo.find_all().await.unwrap().is_empty());
    assert_eq!(repo.find_max_id().await.unwrap(), 0);
    assert_eq!(repo.count_matching("").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn name_filter_matches_substrings(pool: MySqlPool) {
    let repo = seeded(pool).await;

    let found = repo.find_by_name("Ali").await.unwrap();

    assert_eq!(names(&found), ["Alice", "Alina"]);
    assert_eq!(repo.count_matching("Ali").await.unwrap(), 2);
    assert!(repo.find_by_name("zzz").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn find_page_distinguishes_no_matches(pool: MySqlPool) {
    let repo = seeded(pool).await;

    match repo.find_page(&Paging::new(1), "Ali").await.unwrap() {
        PageLookup::Found(rows) => assert_eq!(names(&rows), ["Alice", "Alina"]),
        PageLookup::NoMatches => panic!("expected a page"),
    }
    assert_eq!(
        repo.find_page(&Paging::new(2), "").await.unwrap(),
        PageLookup::NoMatches
    );
    assert_eq!(
        repo.find_page(&Paging::new(1), "zzz").await.unwrap(),
        PageLookup::NoMatches
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn quotes_in_search_are_data_not_sql(pool: MySqlPool) {
    let repo = seeded(pool).await;

    let found = repo.find_by_name("' OR '1'='1").await.unwrap();

    assert!(found.is_empty());
}

// ---------------------------------------------------------------------------
// Load / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn load_round_trips_and_reports_missing_ids(pool: MySqlPool) {
    let repo = seeded(pool).await;

    assert_eq!(repo.load(2).await.unwrap(), employee(2, "Bob", (2018, 10, 1)));
    assert!(matches!(repo.load(99).await, Err(AppError::NotFound(99))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn update_changes_only_dependents_count(pool: MySqlPool) {
    let repo = seeded(pool).await;

    repo.update_dependents_count(1, 4).await.unwrap();
    repo.update_dependents_count(99, 4).await.unwrap();

    let expected = Employee {
        dependents_count: 4,
        ..employee(1, "Alice", (2020, 4, 1))
    };
    assert_eq!(repo.load(1).await.unwrap(), expected);
    assert_eq!(repo.find_all().await.unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn duplicate_id_is_a_unique_constraint_violation(pool: MySqlPool) {
    let repo = seeded(pool).await;

    let err = repo
        .insert(&employee(2, "Again", (2024, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UniqueConstraintViolation(2)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a MySQL server in DATABASE_URL"]
async fn concurrent_inserts_get_ids_one_to_n(pool: MySqlPool) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(MySqlEmployeeRepository::new(pool));
    let coordinator = Arc::new(InsertCoordinator::new(
        repo.clone(),
        Arc::new(FsAssetStore::new(dir.path())),
    ));

    let tasks = (0..10).map(|i| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            let new_employee = NewEmployee {
                name: format!("Worker{i}"),
                gender: "male".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                mail_address: format!("worker{i}@example.com"),
                zip_code: "150-0002".to_string(),
                address: "Shibuya, Tokyo".to_string(),
                telephone: "03-9999-9999".to_string(),
                salary: 200_000,
                characteristics: "Diligent".to_string(),
                dependents_count: 0,
            };
            let asset = UploadedAsset {
                file_name: format!("worker{i}.png"),
                data: vec![1, 2, 3],
            };
            coordinator.insert(new_employee, asset).await
        })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let mut ids: Vec<i32> = repo.find_all().await.unwrap().iter().map(|e| e.id).collect();
    ids.sort();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
}
