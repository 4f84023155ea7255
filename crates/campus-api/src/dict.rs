// Dictionary endpoints: class list and enum-style label dictionaries.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ClassInfo, DictItem};

impl ApiClient {
    /// `GET /dict/classes`
    pub async fn classes(&self) -> Result<Vec<ClassInfo>, Error> {
        self.get("/dict/classes").await
    }

    /// `GET /dict/status`
    pub async fn status_dict(&self) -> Result<Vec<DictItem>, Error> {
        self.get("/dict/status").await
    }

    /// `GET /dict/gender`
    pub async fn gender_dict(&self) -> Result<Vec<DictItem>, Error> {
        self.get("/dict/gender").await
    }
}
