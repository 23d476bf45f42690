//! Groups occurrences by calendar day for the date picker.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::dates::DayKey;
use crate::models::EventOccurrence;

/// Dots drawn in a day cell before collapsing the rest into "more".
pub const MAX_INDICATOR_DOTS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DotTone {
    Default,
    Highlighted,
    Cancelled,
}

/// One dot per occurrence, carrying that occurrence's own flags.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct IndicatorDot {
    pub event_id: String,
    pub is_highlighted: bool,
    pub is_cancelled: bool,
    pub tone: DotTone,
}

impl IndicatorDot {
    fn for_event(event: &EventOccurrence) -> Self {
        let tone = if event.is_highlighted {
            DotTone::Highlighted
        } else if event.is_cancelled {
            DotTone::Cancelled
        } else {
            DotTone::Default
        };
        Self {
            event_id: event.id.clone(),
            is_highlighted: event.is_highlighted,
            is_cancelled: event.is_cancelled,
            tone,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct DayIndicator {
    #[schema(value_type = String, example = "2024-12-01")]
    pub day: DayKey,
    pub count: usize,
    pub dots: Vec<IndicatorDot>,
    pub has_more: bool,
    pub highlighted: bool,
    pub cancelled: bool,
}

/// Occurrences bucketed by the display-timezone day they start on.
#[derive(Debug, Clone, Default)]
pub struct CalendarDays {
    buckets: BTreeMap<DayKey, Vec<EventOccurrence>>,
}

impl CalendarDays {
    /// Buckets keep input order. Occurrences whose start does not parse are
    /// left out.
    pub fn group_by_day(events: &[EventOccurrence], tz: Tz) -> Self {
        let mut buckets: BTreeMap<DayKey, Vec<EventOccurrence>> = BTreeMap::new();
        for event in events {
            let Some(start) = event.start(tz) else {
                warn!(
                    event_id = %event.id,
                    start_date = %event.start_date,
                    "skipping occurrence with unparseable start date"
                );
                continue;
            };
            buckets
                .entry(DayKey::from_instant(start, tz))
                .or_default()
                .push(event.clone());
        }
        Self { buckets }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.buckets.keys().copied()
    }

    pub fn events_on(&self, day: NaiveDate) -> &[EventOccurrence] {
        self.buckets
            .get(&DayKey::from(day))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lookup by `YYYY-MM-DD` text. Invalid text yields an empty slice.
    pub fn events_on_date(&self, date: &str) -> &[EventOccurrence] {
        match date.parse::<DayKey>() {
            Ok(day) => self.events_on(day.date()),
            Err(_) => &[],
        }
    }

    pub fn day_indicator(&self, day: NaiveDate) -> DayIndicator {
        let events = self.events_on(day);
        DayIndicator {
            day: DayKey::from(day),
            count: events.len(),
            dots: events
                .iter()
                .take(MAX_INDICATOR_DOTS)
                .map(IndicatorDot::for_event)
                .collect(),
            has_more: events.len() > MAX_INDICATOR_DOTS,
            highlighted: events.iter().any(|event| event.is_highlighted),
            cancelled: events.iter().any(|event| event.is_cancelled),
        }
    }

    pub fn indicators(&self) -> Vec<DayIndicator> {
        self.days().map(|day| self.day_indicator(day.date())).collect()
    }

    /// Target occurrence when a day is picked: the first upcoming one on that
    /// day, else the first one on that day.
    pub fn resolve_day_selection(
        &self,
        day: NaiveDate,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Option<&EventOccurrence> {
        let events = self.events_on(day);
        events
            .iter()
            .find(|event| event.is_upcoming(now, tz))
            .or_else(|| events.first())
    }
}
