use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Dates that cannot be resolved sort to the very beginning of the timeline
pub const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("sentinel date is valid"),
};

#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: i64) -> Self {
        EventId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parse an id coming from outside the core, eg. a click payload.
    /// Anything that isn't an integer is simply not an id.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok().map(EventId)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single timeline entry. Events are created once at load time and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    /// The date exactly as it appeared in the source
    pub date_raw: String,
    pub date_parsed: NaiveDate,
}

impl Event {
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        description: impl Into<String>,
        date_raw: impl Into<String>,
    ) -> Self {
        let date_raw = date_raw.into();
        let date_parsed = parse_date(&date_raw);
        Self {
            id,
            name: name.into(),
            description: description.into(),
            date_raw,
            date_parsed,
        }
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn year_month(year: &str, month: &str) -> Option<NaiveDate> {
    let (year, month) = (year.trim(), month.trim());
    if !all_digits(year) || !all_digits(month) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Resolve a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` string into a date.
///
/// Year-only dates land on January 1st and year-month dates on the first of
/// the month. Anything else resolves to [`SENTINEL_DATE`].
pub fn parse_date(date_str: &str) -> NaiveDate {
    let s = date_str.trim();

    let parsed = match s.len() {
        4 if all_digits(s) => s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        7 => s
            .split_once('-')
            .and_then(|(year, month)| year_month(year, month)),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
            let parts: Vec<&str> = s.split('-').collect();
            match parts.as_slice() {
                [year, month] => year_month(year, month),
                _ => None,
            }
        }),
    };

    parsed.unwrap_or_else(|| {
        warn!("could not parse date '{}', using {}", s, SENTINEL_DATE);
        SENTINEL_DATE
    })
}

/// The immutable, date-ordered set of events for a session.
///
/// Shared read-only between every derivation, usually behind an `Arc`.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    by_id: HashMap<EventId, usize>,
}

impl EventStore {
    /// Build a store from events in source order. Events are stable-sorted by
    /// their parsed date, so equal dates keep their source order. Repeated ids
    /// keep the first occurrence.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::with_capacity(events.len());
        let mut unique = Vec::with_capacity(events.len());

        for event in events {
            if !seen.insert(event.id) {
                warn!("dropping event '{}': duplicate id {}", event.name, event.id);
                continue;
            }
            unique.push(event);
        }

        // Vec::sort_by_key is stable
        unique.sort_by_key(|ev| ev.date_parsed);

        let by_id = unique
            .iter()
            .enumerate()
            .map(|(pos, ev)| (ev.id, pos))
            .collect();

        debug!("event store built with {} events", unique.len());

        Self {
            events: unique,
            by_id,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at a store position, as referenced by a [`crate::VisibleSet`]
    pub fn at(&self, pos: usize) -> Option<&Event> {
        self.events.get(pos)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.position(id).and_then(|pos| self.events.get(pos))
    }

    pub fn position(&self, id: EventId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_each_granularity() {
        assert_eq!(parse_date("1999"), ymd(1999, 1, 1));
        assert_eq!(parse_date("1999-06"), ymd(1999, 6, 1));
        assert_eq!(parse_date("1999-06-15"), ymd(1999, 6, 15));
    }

    #[test]
    fn tolerates_whitespace() {
        assert_eq!(parse_date("  2004 "), ymd(2004, 1, 1));
        assert_eq!(parse_date("2004 - 11"), ymd(2004, 11, 1));
        assert_eq!(parse_date("\t2004-11-02\n"), ymd(2004, 11, 2));
    }

    #[test]
    fn unparseable_dates_use_sentinel() {
        assert_eq!(parse_date("not-a-date"), SENTINEL_DATE);
        assert_eq!(parse_date(""), SENTINEL_DATE);
        assert_eq!(parse_date("abcd"), SENTINEL_DATE);
        assert_eq!(parse_date("1999-13"), SENTINEL_DATE);
        assert_eq!(parse_date("1999-02-30"), SENTINEL_DATE);
        assert_eq!(parse_date("1999-06-15-01"), SENTINEL_DATE);
        assert_eq!(SENTINEL_DATE, ymd(1900, 1, 1));
    }

    #[test]
    fn store_sorts_stably_by_date() {
        let store = EventStore::from_events(vec![
            Event::new(EventId::new(1), "late", "", "2001"),
            Event::new(EventId::new(2), "tie a", "", "1990-05"),
            Event::new(EventId::new(3), "broken", "", "soon"),
            Event::new(EventId::new(4), "tie b", "", "1990-05-01"),
        ]);

        let names: Vec<&str> = store.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["broken", "tie a", "tie b", "late"]);
    }

    #[test]
    fn store_lookup_by_id() {
        let store = EventStore::from_events(vec![
            Event::new(EventId::new(10), "b", "", "2000"),
            Event::new(EventId::new(20), "a", "", "1999"),
        ]);

        assert_eq!(store.get(EventId::new(10)).map(|e| e.name.as_str()), Some("b"));
        assert_eq!(store.position(EventId::new(20)), Some(0));
        assert!(store.get(EventId::new(30)).is_none());
    }

    #[test]
    fn store_keeps_first_duplicate() {
        let store = EventStore::from_events(vec![
            Event::new(EventId::new(1), "first", "", "2000"),
            Event::new(EventId::new(1), "second", "", "1999"),
        ]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(EventId::new(1)).unwrap().name, "first");
    }

    #[test]
    fn event_ids_parse_only_integers() {
        assert_eq!(EventId::parse(" 42 "), Some(EventId::new(42)));
        assert_eq!(EventId::parse("42a"), None);
        assert_eq!(EventId::parse(""), None);
    }
}
