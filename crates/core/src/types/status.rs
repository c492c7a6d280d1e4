//! Enumerations for bookings.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Lifecycle status of a booking.
///
/// New bookings start as `Pending`. Any status may be set from any other;
/// only membership in this set is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// The wire/database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid booking status: {s}")),
        }
    }
}

/// Kind of session a user can book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// AI-assisted guidance.
    Ai,
    /// One-on-one session with a therapist.
    Human,
    /// Guided meditation in a small group.
    Group,
}

impl SessionType {
    /// All session types in display order.
    pub const ALL: [Self; 3] = [Self::Ai, Self::Human, Self::Group];

    /// The wire/database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Human => "human",
            Self::Group => "group",
        }
    }

    /// Display title of the offering.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Ai => "AI-Assisted Guidance",
            Self::Human => "Human Therapist",
            Self::Group => "Group Session",
        }
    }

    /// Short description of the offering.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Ai => "Personalized recommendations with AI support",
            Self::Human => "One-on-one session with certified professional",
            Self::Group => "Guided meditation with small group",
        }
    }

    /// Practitioner shown when a booking doesn't name one.
    #[must_use]
    pub const fn default_practitioner(&self) -> &'static str {
        match self {
            Self::Ai => "HealthyOwl AI Assistant",
            Self::Human => "Dr. Sarah Johnson",
            Self::Group => "Certified Instructor",
        }
    }

    /// Price per session.
    #[must_use]
    pub const fn price(&self) -> Price {
        let cents = match self {
            Self::Ai => 0,
            Self::Human => 7500,
            Self::Group => 3500,
        };
        match Price::from_cents(cents) {
            Ok(price) => price,
            Err(_) => Price::ZERO,
        }
    }

    /// Session length in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        match self {
            Self::Ai => 30,
            Self::Human => 45,
            Self::Group => 60,
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(Self::Ai),
            "human" => Ok(Self::Human),
            "group" => Ok(Self::Group),
            _ => Err(format!("invalid session type: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_defaults_to_pending() {
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn test_booking_status_round_trips_through_str() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_booking_status_rejects_unknown() {
        assert!("archived".parse::<BookingStatus>().is_err());
        assert!("Pending".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_session_type_serde_names() {
        assert_eq!(serde_json::to_string(&SessionType::Ai).unwrap(), "\"ai\"");
        let parsed: SessionType = serde_json::from_str("\"group\"").unwrap();
        assert_eq!(parsed, SessionType::Group);
    }

    #[test]
    fn test_session_type_offering_details() {
        assert_eq!(SessionType::Ai.price(), Price::ZERO);
        assert_eq!(SessionType::Human.price().cents(), 7500);
        assert_eq!(SessionType::Group.price().cents(), 3500);
        assert_eq!(SessionType::Human.duration_minutes(), 45);
    }
}
