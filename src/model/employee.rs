use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "name": "Taro Yamada",
        "image": "4f1c2b7e-0d8a-4c55-9d0e-1e2f3a4b5c6d_taro.png",
        "gender": "male",
        "hireDate": "2019-04-01",
        "mailAddress": "taro@example.com",
        "zipCode": "160-0022",
        "address": "Shinjuku, Tokyo",
        "telephone": "03-1234-5678",
        "salary": 300000,
        "characteristics": "Calm and reliable",
        "dependentsCount": 2
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Taro Yamada")]
    pub name: String,

    /// Stored asset file name; absent until the upload has been persisted.
    #[schema(nullable = true)]
    pub image: Option<String>,

    #[schema(example = "male")]
    pub gender: String,

    #[schema(example = "2019-04-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    pub mail_address: String,
    pub zip_code: String,
    pub address: String,
    pub telephone: String,

    #[schema(example = 300000)]
    pub salary: i32,

    pub characteristics: String,

    #[schema(example = 2)]
    pub dependents_count: i32,
}

/// A validated employee that has not been assigned an id or image yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub gender: String,
    pub hire_date: NaiveDate,
    pub mail_address: String,
    pub zip_code: String,
    pub address: String,
    pub telephone: String,
    pub salary: i32,
    pub characteristics: String,
    pub dependents_count: i32,
}

impl NewEmployee {
    pub fn into_employee(self, id: i32, image: String) -> Employee {
        Employee {
            id,
            name: self.name,
            image: Some(image),
            gender: self.gender,
            hire_date: self.hire_date,
            mail_address: self.mail_address,
            zip_code: self.zip_code,
            address: self.address,
            telephone: self.telephone,
            salary: self.salary,
            characteristics: self.characteristics,
            dependents_count: self.dependents_count,
        }
    }
}

/// Raw bytes of an uploaded image together with the name the client sent.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub file_name: String,
    pub data: Vec<u8>,
}
