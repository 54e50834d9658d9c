use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::forms::{InsertEmployeeForm, InsertEmployeeUpload, UpdateEmployeeForm},
    error::{AppError, AppResult},
    model::{employee::Employee, paging::Paging},
    state::AppState,
};

/// Advisory shown when a name search matched nobody.
pub const NO_RESULTS_MESSAGE: &str = "No employees matched your search";

const LIST_PATH: &str = "/employee/showList";

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub employees: Vec<Employee>,
    #[schema(example = "Al")]
    pub name: String,
    #[schema(example = "No employees matched your search", nullable = true)]
    pub search_message: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePageResponse {
    pub employees: Vec<Employee>,
    pub paging: Paging,
    pub name: String,
    #[schema(nullable = true)]
    pub search_message: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailQuery {
    /// Employee id
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Name substring; empty lists everyone
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Name substring; empty pages through everyone
    pub name: Option<String>,
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LIST_PATH))
        .finish()
}

fn advisory(no_results: bool) -> Option<String> {
    no_results.then(|| NO_RESULTS_MESSAGE.to_string())
}

/// Employee list ordered by hire date
#[utoipa::path(
    get,
    path = "/employee/showList",
    responses(
        (status = 200, description = "All employees", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn show_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let employees = state.employees.show_list().await?;
    Ok(HttpResponse::Ok().json(EmployeeListResponse { employees }))
}

/// One page of employees, optionally filtered by name
#[utoipa::path(
    get,
    path = "/employee/showPage",
    params(PageQuery),
    responses(
        (status = 200, description = "Paged employee list", body = EmployeePageResponse)
    ),
    tag = "Employee"
)]
pub async fn show_page(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let name = query.name.unwrap_or_default();
    let page = state
        .employees
        .show_page(query.page.unwrap_or(1), &name)
        .await?;

    Ok(HttpResponse::Ok().json(EmployeePageResponse {
        employees: page.employees,
        paging: page.paging,
        name,
        search_message: advisory(page.no_results),
    }))
}

/// Employee detail
#[utoipa::path(
    get,
    path = "/employee/showDetail",
    params(DetailQuery),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Id is missing or not a number", body = Object, example = json!({
            "error": "Bad request: id must be a number", "code": "BAD_REQUEST"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee with id 9 not found", "code": "NOT_FOUND"
        }))
    ),
    tag = "Employee"
)]
pub async fn show_detail(
    state: web::Data<AppState>,
    query: web::Query<DetailQuery>,
) -> AppResult<HttpResponse> {
    let id = query
        .id
        .as_deref()
        .map(str::trim)
        .and_then(|raw| raw.parse::<i32>().ok())
        .ok_or_else(|| AppError::BadRequest("id must be a number".to_string()))?;

    let employee = state.employees.show_detail(id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update the dependents count of one employee
#[utoipa::path(
    post,
    path = "/employee/update",
    request_body(content = UpdateEmployeeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the list"),
        (status = 400, description = "Validation failed")
    ),
    tag = "Employee"
)]
pub async fn update(
    state: web::Data<AppState>,
    form: web::Form<UpdateEmployeeForm>,
) -> AppResult<HttpResponse> {
    let (id, dependents_count) = form.parse()?;

    state
        .employees
        .update_dependents_count(id, dependents_count)
        .await?;
    debug!(employee_id = id, dependents_count, "Dependents count updated");

    Ok(redirect_to_list())
}

/// Name search; falls back to the full list when nothing matches
#[utoipa::path(
    get,
    path = "/employee/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching employees, or everyone with an advisory", body = SearchResponse)
    ),
    tag = "Employee"
)]
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let name = query.into_inner().name.unwrap_or_default();
    let result = state.employees.search(&name).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        employees: result.employees,
        name,
        search_message: advisory(result.no_results),
    }))
}

/// Blank registration form
#[utoipa::path(
    get,
    path = "/employee/insertForm",
    responses(
        (status = 200, description = "Empty form", body = InsertEmployeeForm)
    ),
    tag = "Employee"
)]
pub async fn insert_form() -> HttpResponse {
    HttpResponse::Ok().json(InsertEmployeeForm::default())
}

/// Register an employee with an uploaded image
#[utoipa::path(
    post,
    path = "/employee/insert",
    request_body(content = InsertEmployeeForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Registered, redirects to the list"),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Validation failed",
            "code": "VALIDATION_ERROR",
            "fields": { "imageData": ["Please select an image"] }
        })),
        (status = 500, description = "Asset or database failure")
    ),
    tag = "Employee"
)]
pub async fn insert(
    state: web::Data<AppState>,
    MultipartForm(upload): MultipartForm<InsertEmployeeUpload>,
) -> AppResult<HttpResponse> {
    let (form, asset) = upload.into_parts();
    let (new_employee, asset) = form.validate_with_asset(asset)?;

    state.inserts.insert(new_employee, asset).await?;

    Ok(redirect_to_list())
}
