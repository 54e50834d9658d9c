use crate::api::employee::{EmployeeListResponse, EmployeePageResponse, SearchResponse};
use crate::api::forms::{InsertEmployeeForm, UpdateEmployeeForm};
use crate::model::employee::Employee;
use crate::model::paging::Paging;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Records API",
        version = "0.1.0",
        description = r#"
## Employee Records

List, search, page through, view and register employees.

### Key Features
- **Listing** ordered by hire date, with optional paging (5 per page)
- **Search** by name substring; a search with no hits shows everyone with an advisory message
- **Detail** view of a single employee
- **Update** of the dependents count
- **Registration** with an uploaded portrait image

### Response Format
- JSON views; form posts answer with `303 See Other` to `/employee/showList`
- Errors: `{ "error", "code", "fields"? }`
"#,
    ),
    paths(
        crate::api::employee::show_list,
        crate::api::employee::show_page,
        crate::api::employee::show_detail,
        crate::api::employee::update,
        crate::api::employee::search,
        crate::api::employee::insert_form,
        crate::api::employee::insert
    ),
    components(
        schemas(
            Employee,
            Paging,
            EmployeeListResponse,
            EmployeePageResponse,
            SearchResponse,
            InsertEmployeeForm,
            UpdateEmployeeForm
        )
    ),
    tags(
        (name = "Employee", description = "Employee records APIs"),
    )
)]
pub struct ApiDoc;
