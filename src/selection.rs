//! Tracks which occurrence of a class is currently selected.
//!
//! Selection always keys off occurrence ids so it survives re-fetches that
//! reorder or update the list.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::EventOccurrence;

/// Picks the occurrence to show when the caller has no preference.
///
/// The earliest upcoming occurrence wins. When nothing is upcoming the most
/// recent one wins instead. Ties keep list order and unparseable starts
/// compare as the earliest possible instant.
pub fn default_selection(
    events: &[EventOccurrence],
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<&EventOccurrence> {
    let keyed: Vec<(Option<DateTime<Utc>>, &EventOccurrence)> =
        events.iter().map(|event| (event.start(tz), event)).collect();

    let mut next_upcoming: Option<(DateTime<Utc>, &EventOccurrence)> = None;
    for (start, event) in &keyed {
        let Some(start) = *start else {
            continue;
        };
        if start <= now {
            continue;
        }
        if next_upcoming.is_none_or(|(best, _)| start < best) {
            next_upcoming = Some((start, *event));
        }
    }
    if let Some((_, event)) = next_upcoming {
        return Some(event);
    }

    let mut latest: Option<(Option<DateTime<Utc>>, &EventOccurrence)> = None;
    for (start, event) in keyed {
        if latest.is_none_or(|(best, _)| start > best) {
            latest = Some((start, event));
        }
    }
    latest.map(|(_, event)| event)
}

#[derive(Debug, Clone)]
pub struct EventSelection {
    explicit_id: Option<String>,
    selected: Option<EventOccurrence>,
    tz: Tz,
}

impl EventSelection {
    /// `explicit_id` is the occurrence the caller asked for, if any.
    pub fn new(explicit_id: Option<String>, tz: Tz) -> Self {
        Self {
            explicit_id: explicit_id.filter(|id| !id.is_empty()),
            selected: None,
            tz,
        }
    }

    pub fn selected(&self) -> Option<&EventOccurrence> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|event| event.id.as_str())
    }

    /// Selects the explicit target if present, otherwise the default pick.
    pub fn initialize(&mut self, events: &[EventOccurrence], now: DateTime<Utc>) {
        let explicit = self
            .explicit_id
            .as_deref()
            .and_then(|id| find_by_id(events, id));
        if self.explicit_id.is_some() && explicit.is_none() {
            debug!(
                explicit_id = ?self.explicit_id,
                "requested occurrence not in list, using default selection"
            );
        }
        self.selected = explicit
            .or_else(|| default_selection(events, now, self.tz))
            .cloned();
    }

    /// Re-derives the selection for a freshly fetched list, keeping the
    /// current id when it is still present.
    pub fn refresh(&mut self, events: &[EventOccurrence], now: DateTime<Utc>) {
        let kept = self
            .selected_id()
            .and_then(|id| find_by_id(events, id))
            .cloned();
        match kept {
            Some(event) => self.selected = Some(event),
            None => self.initialize(events, now),
        }
    }

    /// Unknown ids leave the selection untouched.
    pub fn select_by_id(&mut self, id: &str, events: &[EventOccurrence]) {
        if let Some(event) = find_by_id(events, id) {
            self.selected = Some(event.clone());
        }
    }

    pub fn set_selected(&mut self, event: Option<EventOccurrence>) {
        self.selected = event;
    }

    /// Applies the default pick. An empty list leaves the selection untouched.
    pub fn select_next_upcoming(&mut self, events: &[EventOccurrence], now: DateTime<Utc>) {
        if let Some(event) = default_selection(events, now, self.tz) {
            self.selected = Some(event.clone());
        }
    }
}

fn find_by_id<'a>(events: &'a [EventOccurrence], id: &str) -> Option<&'a EventOccurrence> {
    events.iter().find(|event| event.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::occurrence;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn december() -> Vec<EventOccurrence> {
        vec![
            occurrence("1", "2024-12-01T10:00:00Z"),
            occurrence("2", "2024-12-02T14:00:00Z"),
            occurrence("3", "2024-12-03T09:00:00Z"),
        ]
    }

    fn initialized(events: &[EventOccurrence], explicit: Option<&str>, now: &str) -> EventSelection {
        let mut selection = EventSelection::new(explicit.map(str::to_string), Tz::UTC);
        selection.initialize(events, utc(now));
        selection
    }

    #[test]
    fn test_selects_next_upcoming() {
        let selection = initialized(&december(), None, "2024-11-29T12:00:00Z");
        assert_eq!(selection.selected_id(), Some("1"));
    }

    #[test]
    fn test_selects_earliest_upcoming_regardless_of_order() {
        let events = vec![
            occurrence("3", "2024-12-03T09:00:00Z"),
            occurrence("1", "2024-12-01T10:00:00Z"),
            occurrence("2", "2024-12-02T14:00:00Z"),
        ];
        let selection = initialized(&events, None, "2024-12-01T11:00:00Z");
        assert_eq!(selection.selected_id(), Some("2"));
    }

    #[test]
    fn test_selects_latest_past_when_nothing_upcoming() {
        let selection = initialized(&december(), None, "2024-12-04T00:00:00Z");
        assert_eq!(selection.selected_id(), Some("3"));
    }

    #[test]
    fn test_bare_dates() {
        let events = vec![
            occurrence("1", "2024-12-01"),
            occurrence("2", "2024-12-02"),
            occurrence("3", "2024-12-03"),
        ];
        assert_eq!(
            initialized(&events, None, "2024-11-29T00:00:00Z").selected_id(),
            Some("1")
        );
        assert_eq!(
            initialized(&events, None, "2024-12-04T00:00:00Z").selected_id(),
            Some("3")
        );
    }

    #[test]
    fn test_ties_keep_list_order() {
        let past: Vec<EventOccurrence> = ["a", "b", "c"]
            .into_iter()
            .map(|id| occurrence(id, "2024-11-20T10:00:00Z"))
            .collect();
        assert_eq!(
            initialized(&past, None, "2024-11-29T12:00:00Z").selected_id(),
            Some("a")
        );
        assert_eq!(
            initialized(&past, None, "2024-11-01T12:00:00Z").selected_id(),
            Some("a")
        );
    }

    #[test]
    fn test_start_equal_to_now_is_not_upcoming() {
        let events = vec![
            occurrence("now", "2024-12-01T10:00:00Z"),
            occurrence("before", "2024-11-30T10:00:00Z"),
        ];
        let selection = initialized(&events, None, "2024-12-01T10:00:00Z");
        assert_eq!(selection.selected_id(), Some("now"));
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        let selection = initialized(&[], None, "2024-11-29T12:00:00Z");
        assert!(selection.selected().is_none());
        let selection = initialized(&[], Some("1"), "2024-11-29T12:00:00Z");
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_explicit_id_wins() {
        let selection = initialized(&december(), Some("2"), "2024-11-29T12:00:00Z");
        assert_eq!(selection.selected_id(), Some("2"));
    }

    #[test]
    fn test_unknown_explicit_id_falls_back_to_default() {
        let selection = initialized(&december(), Some("missing"), "2024-11-29T12:00:00Z");
        assert_eq!(selection.selected_id(), Some("1"));
    }

    #[test]
    fn test_select_by_unknown_id_keeps_selection() {
        let events = december();
        let mut selection = initialized(&events, None, "2024-11-29T12:00:00Z");
        selection.select_by_id("missing", &events);
        assert_eq!(selection.selected_id(), Some("1"));

        selection.select_by_id("3", &events);
        assert_eq!(selection.selected_id(), Some("3"));
    }

    #[test]
    fn test_set_selected_overrides_and_clears() {
        let events = december();
        let mut selection = initialized(&events, None, "2024-11-29T12:00:00Z");
        selection.set_selected(Some(events[2].clone()));
        assert_eq!(selection.selected_id(), Some("3"));
        selection.set_selected(None);
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_select_next_upcoming_ignores_empty_list() {
        let events = december();
        let mut selection = initialized(&events, Some("3"), "2024-11-29T12:00:00Z");
        selection.select_next_upcoming(&[], utc("2024-11-29T12:00:00Z"));
        assert_eq!(selection.selected_id(), Some("3"));
        selection.select_next_upcoming(&events, utc("2024-11-29T12:00:00Z"));
        assert_eq!(selection.selected_id(), Some("1"));
    }

    #[test]
    fn test_refresh_keeps_selected_id_with_new_fields() {
        let now = utc("2024-11-29T12:00:00Z");
        let events = december();
        let mut selection = initialized(&events, None, "2024-11-29T12:00:00Z");
        selection.select_by_id("3", &events);

        let mut refetched = december();
        refetched.reverse();
        refetched[0].is_cancelled = true;
        refetched[0].participants_count = 9;
        selection.refresh(&refetched, now);

        let selected = selection.selected().unwrap();
        assert_eq!(selected.id, "3");
        assert!(selected.is_cancelled);
        assert_eq!(selected.participants_count, 9);
    }

    #[test]
    fn test_refresh_reinitializes_when_selection_vanishes() {
        let now = utc("2024-11-29T12:00:00Z");
        let events = december();
        let mut selection = initialized(&events, Some("3"), "2024-11-29T12:00:00Z");

        let refetched = vec![events[0].clone(), events[1].clone()];
        selection.refresh(&refetched, now);
        assert_eq!(selection.selected_id(), Some("1"));

        selection.refresh(&[], now);
        assert!(selection.selected().is_none());
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let now = utc("2024-11-29T12:00:00Z");
        let events = december();
        let mut selection = EventSelection::new(None, Tz::UTC);
        selection.refresh(&events, now);
        let first = selection.selected().cloned();
        selection.refresh(&events, now);
        assert_eq!(selection.selected().cloned(), first);
        assert_eq!(selection.selected_id(), Some("1"));
    }

    #[test]
    fn test_invalid_dates_never_win() {
        let events = vec![
            occurrence("bad", "invalid-date"),
            occurrence("1", "2024-12-01T10:00:00Z"),
        ];
        assert_eq!(
            initialized(&events, None, "2024-11-29T12:00:00Z").selected_id(),
            Some("1")
        );
        assert_eq!(
            initialized(&events, None, "2024-12-04T12:00:00Z").selected_id(),
            Some("1")
        );
    }

    #[test]
    fn test_invalid_dates_still_produce_a_selection() {
        let events = vec![
            occurrence("bad", "invalid-date"),
            occurrence("worse", ""),
        ];
        assert_eq!(
            initialized(&events, None, "2024-11-29T12:00:00Z").selected_id(),
            Some("bad")
        );
    }

    #[test]
    fn test_highlight_does_not_affect_selection() {
        let mut events = december();
        events[1].is_highlighted = true;
        assert_eq!(
            initialized(&events, None, "2024-11-29T12:00:00Z").selected_id(),
            Some("1")
        );
    }
}
