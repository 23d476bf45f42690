use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dates::{DayKey, parse_instant};

/// Remaining slots at or below this count are shown as "almost full".
pub const ALMOST_FULL_THRESHOLD: u32 = 3;

/// Booking capacity. Upstream exposes both numbers or neither.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Slots {
    pub available: u32,
    pub max: u32,
}

impl Slots {
    pub fn from_pair(available: Option<u32>, max: Option<u32>) -> Option<Self> {
        match (available, max) {
            (Some(available), Some(max)) => Some(Self { available, max }),
            _ => None,
        }
    }
}

/// Parent class as seen from one of its occurrences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location_name: Option<String>,
    pub location_city: Option<String>,
    pub location_country: Option<String>,
    pub event_type: Option<String>,
    pub url_slug: Option<String>,
}

/// A single scheduled instance of a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct EventOccurrence {
    pub id: String,
    #[schema(example = "2024-12-01T10:00:00+00:00")]
    pub start_date: String,
    #[schema(example = "2024-12-01T12:00:00+00:00")]
    pub end_date: String,
    pub is_cancelled: bool,
    pub is_highlighted: bool,
    pub slots: Option<Slots>,
    pub participants_count: u32,
    pub class: ClassSummary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    Cancelled,
    Past,
    Today,
    Upcoming,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Full,
    AlmostFull,
    Available,
    NoBooking,
}

impl EventOccurrence {
    pub fn start(&self, tz: Tz) -> Option<DateTime<Utc>> {
        parse_instant(&self.start_date, tz)
    }

    pub fn end(&self, tz: Tz) -> Option<DateTime<Utc>> {
        parse_instant(&self.end_date, tz)
    }

    /// Starts strictly after `now`. Unparseable starts are never upcoming.
    pub fn is_upcoming(&self, now: DateTime<Utc>, tz: Tz) -> bool {
        self.start(tz).is_some_and(|start| start > now)
    }

    /// Always derived from cancellation and remaining slots.
    pub fn is_bookable(&self) -> bool {
        !self.is_cancelled && self.slots.is_some_and(|slots| slots.available > 0)
    }

    pub fn status(&self, now: DateTime<Utc>, tz: Tz) -> Option<OccurrenceStatus> {
        if self.is_cancelled {
            return Some(OccurrenceStatus::Cancelled);
        }
        let start = self.start(tz)?;
        if start < now {
            Some(OccurrenceStatus::Past)
        } else if DayKey::from_instant(start, tz) == DayKey::from_instant(now, tz) {
            Some(OccurrenceStatus::Today)
        } else {
            Some(OccurrenceStatus::Upcoming)
        }
    }

    pub fn availability(&self) -> Option<Availability> {
        if self.is_cancelled {
            return None;
        }
        let availability = match self.slots.map(|slots| slots.available) {
            Some(0) => Availability::Full,
            Some(n) if n <= ALMOST_FULL_THRESHOLD => Availability::AlmostFull,
            Some(_) => Availability::Available,
            None => Availability::NoBooking,
        };
        Some(availability)
    }

    /// Human duration such as `2h` or `1h 30m`.
    pub fn duration_label(&self, tz: Tz) -> Option<String> {
        let minutes = (self.end(tz)? - self.start(tz)?).num_minutes();
        if minutes < 0 {
            return None;
        }
        let (hours, rest) = (minutes / 60, minutes % 60);
        if rest > 0 {
            Some(format!("{hours}h {rest}m"))
        } else {
            Some(format!("{hours}h"))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Category {
    Festival,
    Workshop,
    Class,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TeacherLabel {
    pub name: String,
    pub image_url: Option<String>,
}

/// Display card for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub teacher: TeacherLabel,
    pub category: Category,
    pub is_bookable: bool,
    pub is_highlighted: bool,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub slots: Option<Slots>,
    pub participants_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TeacherSummary {
    pub id: String,
    pub name: String,
    pub url_slug: Option<String>,
    pub image_url: Option<String>,
    pub is_owner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BookingOption {
    pub id: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BookingCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<BookingOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub location_name: Option<String>,
    pub location_city: Option<String>,
    pub location_country: Option<String>,
    pub location: String,
    pub event_type: Option<String>,
    pub category: Category,
    pub url_slug: String,
    pub teachers: Vec<TeacherSummary>,
    pub booking_categories: Vec<BookingCategory>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::occurrence;
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_slots_require_both_numbers() {
        assert_eq!(
            Slots::from_pair(Some(0), Some(6)),
            Some(Slots {
                available: 0,
                max: 6
            })
        );
        assert_eq!(Slots::from_pair(Some(3), None), None);
        assert_eq!(Slots::from_pair(None, Some(3)), None);
    }

    #[test]
    fn test_bookable_is_derived() {
        let mut event = occurrence("1", "2024-12-01T10:00:00Z");
        assert!(event.is_bookable());

        event.slots = Some(Slots {
            available: 0,
            max: 6,
        });
        assert!(!event.is_bookable());

        event.slots = None;
        assert!(!event.is_bookable());

        event.slots = Some(Slots {
            available: 2,
            max: 6,
        });
        event.is_cancelled = true;
        assert!(!event.is_bookable());
    }

    #[test]
    fn test_status() {
        let now = utc("2024-12-01T12:00:00Z");
        let tz = Tz::UTC;
        assert_eq!(
            occurrence("1", "2024-12-01T10:00:00Z").status(now, tz),
            Some(OccurrenceStatus::Past)
        );
        assert_eq!(
            occurrence("2", "2024-12-01T18:00:00Z").status(now, tz),
            Some(OccurrenceStatus::Today)
        );
        assert_eq!(
            occurrence("3", "2024-12-02T18:00:00Z").status(now, tz),
            Some(OccurrenceStatus::Upcoming)
        );
        assert_eq!(occurrence("4", "invalid-date").status(now, tz), None);

        let mut cancelled = occurrence("5", "invalid-date");
        cancelled.is_cancelled = true;
        assert_eq!(cancelled.status(now, tz), Some(OccurrenceStatus::Cancelled));
    }

    #[test]
    fn test_availability() {
        let mut event = occurrence("1", "2024-12-01T10:00:00Z");
        assert_eq!(event.availability(), Some(Availability::Available));

        event.slots = Some(Slots {
            available: 3,
            max: 6,
        });
        assert_eq!(event.availability(), Some(Availability::AlmostFull));

        event.slots = Some(Slots {
            available: 0,
            max: 6,
        });
        assert_eq!(event.availability(), Some(Availability::Full));

        event.slots = None;
        assert_eq!(event.availability(), Some(Availability::NoBooking));

        event.is_cancelled = true;
        assert_eq!(event.availability(), None);
    }

    #[test]
    fn test_duration_label() {
        let mut event = occurrence("1", "2024-12-01T10:00:00Z");
        event.end_date = "2024-12-01T12:00:00Z".to_string();
        assert_eq!(event.duration_label(Tz::UTC).as_deref(), Some("2h"));

        event.end_date = "2024-12-01T11:30:00Z".to_string();
        assert_eq!(event.duration_label(Tz::UTC).as_deref(), Some("1h 30m"));

        event.end_date = "2024-12-01T09:00:00Z".to_string();
        assert_eq!(event.duration_label(Tz::UTC), None);

        event.end_date = "soon".to_string();
        assert_eq!(event.duration_label(Tz::UTC), None);
    }
}
