//! Event Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::validate_not_blank;

/// Day-of-week label, set independently of `event_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Event entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub day: Option<DayOfWeek>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: Option<i64>,
    /// Participant account ids (loaded from the join table)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub participants: Vec<i64>,
    pub created_at: i64,
}

/// Create event payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub day: Option<DayOfWeek>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[serde(default)]
    pub participants: Vec<i64>,
}

/// Update event payload
///
/// `participants`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EventUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub day: Option<DayOfWeek>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub participants: Option<Vec<i64>>,
}

impl EventUpdate {
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if let Some(day) = self.day {
            event.day = Some(day);
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(price) = self.price {
            event.price = Some(price);
        }
        if let Some(participants) = self.participants {
            event.participants = participants;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label_is_not_checked_against_date() {
        // 2026-10-16 is a Friday; a Monday label is still accepted
        let create: EventCreate = serde_json::from_value(serde_json::json!({
            "title": "Feeding time",
            "event_date": "2026-10-16",
            "day": "monday",
            "start_time": "10:00:00",
            "end_time": "11:00:00"
        }))
        .unwrap();
        assert!(create.validate().is_ok());
        assert_eq!(create.day, Some(DayOfWeek::Monday));
        assert!(create.participants.is_empty());
    }

    #[test]
    fn test_participants_replace_set() {
        let mut event = Event {
            id: 1,
            title: "Night safari".into(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            day: None,
            start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            price: None,
            participants: vec![1, 2],
            created_at: 0,
        };
        EventUpdate {
            participants: Some(vec![3]),
            ..Default::default()
        }
        .apply(&mut event);
        assert_eq!(event.participants, vec![3]);
        assert_eq!(event.title, "Night safari");
    }
}
