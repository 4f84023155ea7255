// Course endpoints
//
// Course CRUD plus nested schedule and attachment management. Note the
// backend's contract: creation posts to `/course/create` and updates POST
// (not PUT) to `/course/{id}`.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Course, CourseAttachment, CourseForm, CourseSchedule, PageResponse};

/// Query parameters for [`ApiClient::list_courses`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

impl ApiClient {
    /// List courses, paged.
    ///
    /// `GET /course/list`
    pub async fn list_courses(
        &self,
        query: &CourseListQuery,
    ) -> Result<PageResponse<Course>, Error> {
        self.get_query("/course/list", query).await
    }

    /// Fetch a single course with its schedules and attachments.
    ///
    /// `GET /course/{id}`
    pub async fn get_course(&self, id: i64) -> Result<Course, Error> {
        self.get(&format!("/course/{id}")).await
    }

    /// Create a course.
    ///
    /// `POST /course/create`
    pub async fn create_course(&self, form: &CourseForm) -> Result<Course, Error> {
        debug!(name = %form.name, "creating course");
        self.post("/course/create", form).await
    }

    /// Update a course. The backend takes updates as POST.
    ///
    /// `POST /course/{id}`
    pub async fn update_course(&self, id: i64, form: &CourseForm) -> Result<Course, Error> {
        debug!(id, "updating course");
        self.post(&format!("/course/{id}"), form).await
    }

    /// Delete a course.
    ///
    /// `DELETE /course/{id}`
    pub async fn delete_course(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting course");
        let _: Option<serde_json::Value> = self.delete(&format!("/course/{id}")).await?;
        Ok(())
    }

    /// Add a weekly schedule slot to a course.
    ///
    /// `POST /course/{courseId}/schedules`
    pub async fn add_course_schedule(
        &self,
        course_id: i64,
        schedule: &CourseSchedule,
    ) -> Result<CourseSchedule, Error> {
        debug!(course_id, "adding course schedule");
        self.post(&format!("/course/{course_id}/schedules"), schedule)
            .await
    }

    /// Remove a schedule slot.
    ///
    /// `DELETE /course/schedules/{scheduleId}`
    pub async fn delete_course_schedule(&self, schedule_id: i64) -> Result<(), Error> {
        debug!(schedule_id, "deleting course schedule");
        let _: Option<serde_json::Value> = self
            .delete(&format!("/course/schedules/{schedule_id}"))
            .await?;
        Ok(())
    }

    /// Attach an already-uploaded file to a course.
    ///
    /// `POST /course/{courseId}/attachments`
    pub async fn add_course_attachment(
        &self,
        course_id: i64,
        attachment: &CourseAttachment,
    ) -> Result<CourseAttachment, Error> {
        debug!(course_id, file = %attachment.file_name, "adding course attachment");
        self.post(&format!("/course/{course_id}/attachments"), attachment)
            .await
    }
}
