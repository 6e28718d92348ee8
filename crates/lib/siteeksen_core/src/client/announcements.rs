//! `/announcements`

use reqwest::Method;
use serde_json::Value;

use super::{ApiResult, SessionClient};
use crate::models::api::{AnnouncementQuery, NewAnnouncement};

impl SessionClient {
    /// `GET /announcements`
    pub async fn list_announcements(&self, query: &AnnouncementQuery) -> ApiResult<Value> {
        self.get_json(&["announcements"], query).await
    }

    /// `POST /announcements`
    pub async fn create_announcement(&self, announcement: &NewAnnouncement) -> ApiResult<Value> {
        self.send_json(Method::POST, &["announcements"], announcement)
            .await
    }

    /// `DELETE /announcements/{id}`
    pub async fn delete_announcement(&self, id: &str) -> ApiResult<()> {
        self.delete(&["announcements", id]).await
    }
}
