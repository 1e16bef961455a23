//! Announcement Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::validate_not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Announcement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: AnnouncementStatus,
    /// Author account
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub messages: Option<String>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Create announcement payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnouncementCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub status: Option<AnnouncementStatus>,
    /// Defaults to the caller
    pub created_by: Option<i64>,
    pub messages: Option<String>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Update announcement payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnnouncementUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub status: Option<AnnouncementStatus>,
    pub messages: Option<String>,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AnnouncementUpdate {
    pub fn apply(self, announcement: &mut Announcement) {
        if let Some(title) = self.title {
            announcement.title = title;
        }
        if let Some(content) = self.content {
            announcement.content = content;
        }
        if let Some(status) = self.status {
            announcement.status = status;
        }
        if let Some(messages) = self.messages {
            announcement.messages = Some(messages);
        }
        if let Some(begin_date) = self.begin_date {
            announcement.begin_date = Some(begin_date);
        }
        if let Some(end_date) = self.end_date {
            announcement.end_date = Some(end_date);
        }
    }
}
