// Enrollment endpoints
//
// Student-course enrollment: enroll, drop, and the various views over a
// student's course selections. Paths live under `/student-course/`.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Enrollment, PageResponse};

/// Query parameters for the paged enrollment views.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiClient {
    /// Enroll the current student in a course.
    ///
    /// `POST /student-course/enroll` with `{"courseId": ...}`
    pub async fn enroll_course(&self, course_id: i64) -> Result<Enrollment, Error> {
        debug!(course_id, "enrolling in course");
        self.post("/student-course/enroll", &json!({ "courseId": course_id }))
            .await
    }

    /// Drop an enrollment.
    ///
    /// `DELETE /student-course/{enrollmentId}`
    pub async fn drop_course(&self, enrollment_id: i64) -> Result<(), Error> {
        debug!(enrollment_id, "dropping course");
        let _: Option<serde_json::Value> = self
            .delete(&format!("/student-course/{enrollment_id}"))
            .await?;
        Ok(())
    }

    /// The current student's enrolled courses, paged.
    ///
    /// `GET /student-course/enrolled`
    pub async fn enrolled_courses(
        &self,
        query: &EnrollmentQuery,
    ) -> Result<PageResponse<Enrollment>, Error> {
        self.get_query("/student-course/enrolled", query).await
    }

    /// Courses still open for enrollment, paged.
    ///
    /// `GET /student-course/available`
    pub async fn available_courses(
        &self,
        query: &EnrollmentQuery,
    ) -> Result<PageResponse<Enrollment>, Error> {
        self.get_query("/student-course/available", query).await
    }

    /// Full enrollment history for the current student.
    ///
    /// `GET /student-course/history`
    pub async fn enrollment_history(&self) -> Result<Vec<Enrollment>, Error> {
        self.get("/student-course/history").await
    }

    /// Currently active enrollments for the current student.
    ///
    /// `GET /student-course/active`
    pub async fn active_enrollments(&self) -> Result<Vec<Enrollment>, Error> {
        self.get("/student-course/active").await
    }
}
