// Upload endpoints
//
// Multipart file uploads: avatars and generic files. Callers pass raw
// bytes plus a file name; the helpers assemble the multipart form the
// backend expects (`file` part, optional `directory` part).

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::UploadResult;

fn file_part(file_name: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes).file_name(file_name.to_owned())
}

impl ApiClient {
    /// Upload an avatar for the current user.
    ///
    /// `POST /upload/avatar` (multipart, `file` part)
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, Error> {
        debug!(file_name, size = bytes.len(), "uploading avatar");
        let form = Form::new().part("file", file_part(file_name, bytes));
        self.post_multipart("/upload/avatar", form).await
    }

    /// Upload a generic file, optionally into a named directory.
    ///
    /// `POST /upload/file` (multipart, `file` + optional `directory` parts)
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        directory: Option<&str>,
    ) -> Result<UploadResult, Error> {
        debug!(file_name, size = bytes.len(), "uploading file");
        let mut form = Form::new().part("file", file_part(file_name, bytes));
        if let Some(dir) = directory {
            form = form.text("directory", dir.to_owned());
        }
        self.post_multipart("/upload/file", form).await
    }

    /// Upload and assign an avatar for a specific student.
    ///
    /// `POST /upload/student/{id}/avatar` (multipart, `file` part)
    pub async fn upload_student_avatar(
        &self,
        student_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, Error> {
        debug!(student_id, file_name, "uploading student avatar");
        let form = Form::new().part("file", file_part(file_name, bytes));
        self.post_multipart(&format!("/upload/student/{student_id}/avatar"), form)
            .await
    }
}
