// Student endpoints
//
// CRUD over student records plus batch delete. Listing is paged and
// filterable by keyword, class, and status.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PageResponse, Student, StudentForm};

/// Query parameters for [`ApiClient::list_students`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiClient {
    /// List students, paged.
    ///
    /// `GET /student/list`
    pub async fn list_students(
        &self,
        query: &StudentListQuery,
    ) -> Result<PageResponse<Student>, Error> {
        self.get_query("/student/list", query).await
    }

    /// Fetch a single student by id.
    ///
    /// `GET /student/{id}`
    pub async fn get_student(&self, id: i64) -> Result<Student, Error> {
        self.get(&format!("/student/{id}")).await
    }

    /// Create a student.
    ///
    /// `POST /student`
    pub async fn create_student(&self, form: &StudentForm) -> Result<Student, Error> {
        debug!(student_id = %form.student_id, "creating student");
        self.post("/student", form).await
    }

    /// Update a student.
    ///
    /// `PUT /student/{id}`
    pub async fn update_student(&self, id: i64, form: &StudentForm) -> Result<Student, Error> {
        debug!(id, "updating student");
        self.put(&format!("/student/{id}"), form).await
    }

    /// Delete a student.
    ///
    /// `DELETE /student/{id}`
    pub async fn delete_student(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting student");
        let _: Option<serde_json::Value> = self.delete(&format!("/student/{id}")).await?;
        Ok(())
    }

    /// Delete several students in one call.
    ///
    /// `POST /student/batch-delete` with `{"ids": [...]}`
    pub async fn batch_delete_students(&self, ids: &[i64]) -> Result<(), Error> {
        debug!(count = ids.len(), "batch deleting students");
        let _: Option<serde_json::Value> = self
            .post("/student/batch-delete", &json!({ "ids": ids }))
            .await?;
        Ok(())
    }
}
