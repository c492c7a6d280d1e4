//! Session bookings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::types::{BookingId, BookingStatus, SessionType, UserId};
use crate::validation::{Issue, Schema, check_date, check_enum};

const SESSION_TYPES: &[&str] = &["ai", "human", "group"];
const STATUSES: &[&str] = &["pending", "confirmed", "completed", "cancelled"];

/// A booked wellness session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub user_id: Option<UserId>,
    pub session_type: SessionType,
    pub therapist_name: Option<String>,
    pub date: NaiveDate,
    /// Display time such as `"9:00 AM"`.
    pub time: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    /// Set once by the server when the booking is stored.
    pub created_at: DateTime<Utc>,
}

/// Insert schema for [`Booking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub session_type: SessionType,
    #[serde(default)]
    pub therapist_name: Option<String>,
    pub date: NaiveDate,
    #[validate(length(min = 1, code = "too_small", message = "Time cannot be empty"))]
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to [`BookingStatus::Pending`].
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl NewBooking {
    /// Build the stored record, stamping `created_at`.
    #[must_use]
    pub fn into_booking(self, id: BookingId, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            session_type: self.session_type,
            therapist_name: self.therapist_name,
            date: self.date,
            time: self.time,
            notes: self.notes,
            status: self.status.unwrap_or_default(),
            created_at,
        }
    }
}

impl Schema for NewBooking {
    const NAME: &'static str = "booking";
    const REQUIRED: &'static [&'static str] = &["sessionType", "date", "time"];

    fn precheck(fields: &Map<String, Value>) -> Vec<Issue> {
        [
            check_enum(fields, "sessionType", SESSION_TYPES),
            check_date(fields, "date"),
            check_enum(fields, "status", STATUSES),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Body of a booking status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

impl Schema for BookingStatusUpdate {
    const NAME: &'static str = "booking status";
    const REQUIRED: &'static [&'static str] = &["status"];

    fn precheck(fields: &Map<String, Value>) -> Vec<Issue> {
        check_enum(fields, "status", STATUSES).into_iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{IssueCode, parse};

    #[test]
    fn test_status_defaults_to_pending() {
        let new: NewBooking = parse(json!({
            "userId": 1,
            "sessionType": "ai",
            "date": "2024-06-01",
            "time": "9:00 AM"
        }))
        .unwrap();

        let now = Utc::now();
        let booking = new.into_booking(BookingId::new(1), now);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, now);
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_unknown_session_type_and_bad_date() {
        let issues = parse::<NewBooking>(json!({
            "sessionType": "spa",
            "date": "tomorrow",
            "time": "9:00 AM"
        }))
        .unwrap_err();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, IssueCode::InvalidEnumValue);
        assert_eq!(issues[0].path, vec!["sessionType"]);
        assert_eq!(issues[1].code, IssueCode::InvalidDate);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let issues = parse::<NewBooking>(json!({ "notes": "first visit" })).unwrap_err();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.message == "Required"));
    }

    #[test]
    fn test_status_update_rejects_non_canonical_status() {
        let issues = parse::<BookingStatusUpdate>(json!({ "status": "archived" })).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::InvalidEnumValue);

        let update: BookingStatusUpdate = parse(json!({ "status": "confirmed" })).unwrap();
        assert_eq!(update.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_wire_format() {
        let booking = Booking {
            id: BookingId::new(4),
            user_id: None,
            session_type: SessionType::Group,
            therapist_name: Some("Certified Instructor".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: "1:00 PM".to_string(),
            notes: None,
            status: BookingStatus::Cancelled,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["sessionType"], json!("group"));
        assert_eq!(value["date"], json!("2024-06-01"));
        assert_eq!(value["status"], json!("cancelled"));
        assert!(value["createdAt"].is_string());
    }
}
