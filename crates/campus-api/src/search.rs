// Search endpoints: scoped and global keyword search plus trending keywords.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Course, PageResponse, SearchHits, Student};

/// Query parameters for the scoped search endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
struct KeywordQuery<'a> {
    keyword: &'a str,
}

#[derive(Debug, Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ApiClient {
    /// Search courses by keyword, paged.
    ///
    /// `GET /search/courses`
    pub async fn search_courses(&self, query: &SearchQuery) -> Result<PageResponse<Course>, Error> {
        self.get_query("/search/courses", query).await
    }

    /// Search students by keyword, paged.
    ///
    /// `GET /search/students`
    pub async fn search_students(
        &self,
        query: &SearchQuery,
    ) -> Result<PageResponse<Student>, Error> {
        self.get_query("/search/students", query).await
    }

    /// Search students and courses in one call.
    ///
    /// `GET /search/global`
    pub async fn global_search(&self, keyword: &str) -> Result<SearchHits, Error> {
        self.get_query("/search/global", &KeywordQuery { keyword })
            .await
    }

    /// Most popular search keywords.
    ///
    /// `GET /search/popular-keywords`
    pub async fn popular_keywords(&self, limit: Option<u32>) -> Result<Vec<String>, Error> {
        self.get_query("/search/popular-keywords", &LimitQuery { limit })
            .await
    }
}
