use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    model::employee::{NewEmployee, UploadedAsset},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn message(code: &'static str, text: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(text.into())
}

fn validate_hire_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(message("required", "Please enter the hire date"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| message("date", "Hire date must be in yyyy-MM-dd format"))
}

fn non_negative(
    value: &str,
    missing: &'static str,
    invalid: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(message("required", missing));
    }
    match value.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(()),
        _ => Err(message("range", invalid)),
    }
}

fn validate_salary(value: &str) -> Result<(), ValidationError> {
    non_negative(
        value,
        "Please enter a salary",
        "Salary must be a whole number of 0 or more",
    )
}

fn validate_dependents_count(value: &str) -> Result<(), ValidationError> {
    non_negative(
        value,
        "Please enter the number of dependents",
        "Dependents count must be a whole number of 0 or more",
    )
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<i32>()
        .map(|_| ())
        .map_err(|_| message("id", "Employee id must be a number"))
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for {field}")))
}

/// Fields of the employee registration form, as submitted.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InsertEmployeeForm {
    #[validate(length(min = 1, message = "Please enter a name"))]
    pub name: String,

    #[validate(length(min = 1, message = "Please select a gender"))]
    pub gender: String,

    #[serde(rename = "hireDate")]
    #[schema(example = "2024-04-01")]
    #[validate(custom(function = "validate_hire_date"))]
    pub hire_date: String,

    #[serde(rename = "mailAddress")]
    #[validate(length(min = 1, message = "Please enter a mail address"))]
    pub mail_address: String,

    #[serde(rename = "zipCode")]
    #[validate(length(min = 1, message = "Please enter a zip code"))]
    pub zip_code: String,

    #[validate(length(min = 1, message = "Please enter an address"))]
    pub address: String,

    #[validate(length(min = 1, message = "Please enter a telephone number"))]
    pub telephone: String,

    #[validate(custom(function = "validate_salary"))]
    pub salary: String,

    #[validate(length(min = 1, message = "Please enter characteristics"))]
    pub characteristics: String,

    #[serde(rename = "dependentsCount")]
    #[validate(custom(function = "validate_dependents_count"))]
    pub dependents_count: String,
}

impl InsertEmployeeForm {
    /// Validate the form and the accompanying upload together so every
    /// problem is reported at once.
    pub fn validate_with_asset(
        self,
        asset: Option<UploadedAsset>,
    ) -> AppResult<(NewEmployee, UploadedAsset)> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let asset = match asset {
            Some(asset) if !asset.data.is_empty() => Some(asset),
            _ => {
                errors.add("imageData", message("required", "Please select an image"));
                None
            }
        };

        match asset {
            Some(asset) if errors.is_empty() => Ok((self.into_new_employee()?, asset)),
            _ => Err(AppError::Validation(errors)),
        }
    }

    fn into_new_employee(self) -> AppResult<NewEmployee> {
        Ok(NewEmployee {
            hire_date: NaiveDate::parse_from_str(&self.hire_date, DATE_FORMAT)
                .map_err(|_| AppError::BadRequest("Invalid value for hireDate".into()))?,
            salary: parse_field("salary", &self.salary)?,
            dependents_count: parse_field("dependentsCount", &self.dependents_count)?,
            name: self.name,
            gender: self.gender,
            mail_address: self.mail_address,
            zip_code: self.zip_code,
            address: self.address,
            telephone: self.telephone,
            characteristics: self.characteristics,
        })
    }
}

/// Multipart body of `POST /employee/insert`.
#[derive(MultipartForm)]
pub struct InsertEmployeeUpload {
    pub name: Option<Text<String>>,
    pub gender: Option<Text<String>>,
    #[multipart(rename = "hireDate")]
    pub hire_date: Option<Text<String>>,
    #[multipart(rename = "mailAddress")]
    pub mail_address: Option<Text<String>>,
    #[multipart(rename = "zipCode")]
    pub zip_code: Option<Text<String>>,
    pub address: Option<Text<String>>,
    pub telephone: Option<Text<String>>,
    pub salary: Option<Text<String>>,
    pub characteristics: Option<Text<String>>,
    #[multipart(rename = "dependentsCount")]
    pub dependents_count: Option<Text<String>>,
    #[multipart(rename = "imageData")]
    pub image_data: Option<Bytes>,
}

fn text(field: Option<Text<String>>) -> String {
    field
        .map(|t| t.into_inner().trim().to_string())
        .unwrap_or_default()
}

impl InsertEmployeeUpload {
    pub fn into_parts(self) -> (InsertEmployeeForm, Option<UploadedAsset>) {
        let asset = self.image_data.map(|file| UploadedAsset {
            file_name: file.file_name.unwrap_or_default(),
            data: file.data.to_vec(),
        });

        let form = InsertEmployeeForm {
            name: text(self.name),
            gender: text(self.gender),
            hire_date: text(self.hire_date),
            mail_address: text(self.mail_address),
            zip_code: text(self.zip_code),
            address: text(self.address),
            telephone: text(self.telephone),
            salary: text(self.salary),
            characteristics: text(self.characteristics),
            dependents_count: text(self.dependents_count),
        };

        (form, asset)
    }
}

/// Body of `POST /employee/update`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeForm {
    #[validate(custom(function = "validate_id"))]
    pub id: String,

    #[serde(rename = "dependentsCount")]
    #[validate(custom(function = "validate_dependents_count"))]
    pub dependents_count: String,
}

impl UpdateEmployeeForm {
    /// Validated `(id, dependents_count)`.
    pub fn parse(&self) -> AppResult<(i32, i32)> {
        let trimmed = Self {
            id: self.id.trim().to_string(),
            dependents_count: self.dependents_count.trim().to_string(),
        };
        trimmed.validate()?;

        Ok((
            parse_field("id", &trimmed.id)?,
            parse_field("dependentsCount", &trimmed.dependents_count)?,
        ))
    }
}
