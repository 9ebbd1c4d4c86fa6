use crate::config::Density;
use crate::event::{Event, EventStore};

/// Case-insensitive substring match against an event's name or description.
/// An empty search term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchPredicate {
    needle: Option<String>,
}

impl SearchPredicate {
    pub fn new(search: Option<&str>) -> Self {
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);
        Self { needle }
    }

    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn is_match_all(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, event: &Event) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        event.name.to_lowercase().contains(needle.as_str())
            || event.description.to_lowercase().contains(needle.as_str())
    }
}

/// An ordered set of store positions that survived filtering. Positions
/// refer into the [`EventStore`], events are never copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    positions: Vec<usize>,
}

impl VisibleSet {
    pub fn new(positions: Vec<usize>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn events<'a>(&'a self, store: &'a EventStore) -> impl Iterator<Item = &'a Event> + 'a {
        self.positions.iter().filter_map(move |pos| store.at(*pos))
    }
}

/// Positions of every event matching `predicate`, in store order
#[profiling::function]
pub fn search(store: &EventStore, predicate: &SearchPredicate) -> VisibleSet {
    if predicate.is_match_all() {
        return VisibleSet::new((0..store.len()).collect());
    }

    let positions = store
        .events()
        .iter()
        .enumerate()
        .filter(|(_, ev)| predicate.matches(ev))
        .map(|(pos, _)| pos)
        .collect();

    VisibleSet::new(positions)
}

/// Thin out a filtered sequence according to `density`.
///
/// Every `6 - density`th element is kept. The first and last elements always
/// survive so the timeline keeps its endpoints.
#[profiling::function]
pub fn sample(filtered: &VisibleSet, density: Density) -> VisibleSet {
    let Some(step) = density.step() else {
        return filtered.clone();
    };

    let len = filtered.len();
    if len == 0 {
        return VisibleSet::default();
    }

    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if !indices.contains(&(len - 1)) {
        indices.push(len - 1);
    }
    if !indices.contains(&0) {
        indices.insert(0, 0);
    }

    VisibleSet::new(
        indices
            .into_iter()
            .map(|i| filtered.positions[i])
            .collect(),
    )
}

/// Derive the visible events for a search term and a density level.
pub fn filter(store: &EventStore, search_term: Option<&str>, density: Density) -> VisibleSet {
    let filtered = search(store, &SearchPredicate::new(search_term));
    sample(&filtered, density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use pretty_assertions::assert_eq;

    fn store_of(n: usize) -> EventStore {
        let events = (0..n)
            .map(|i| {
                Event::new(
                    EventId::new(i as i64),
                    format!("Event {i}"),
                    if i % 3 == 0 { "Launch of a ROCKET" } else { "quiet day" },
                    format!("{}", 1950 + i),
                )
            })
            .collect();
        EventStore::from_events(events)
    }

    fn density(d: u8) -> Density {
        Density::new(d)
    }

    #[test]
    fn full_density_is_identity() {
        let store = store_of(13);
        let all = filter(&store, None, density(5));
        assert_eq!(all.positions(), (0..13).collect::<Vec<_>>().as_slice());

        let some = search(&store, &SearchPredicate::new(Some("rocket")));
        assert_eq!(sample(&some, density(5)), some);
    }

    #[test]
    fn sampling_steps_by_density() {
        let store = store_of(10);
        // step = 6 - 3 = 3
        assert_eq!(filter(&store, None, density(3)).positions(), &[0, 3, 6, 9]);
        // step = 6 - 4 = 2, last index appended
        assert_eq!(
            filter(&store, None, density(4)).positions(),
            &[0, 2, 4, 6, 8, 9]
        );
        // step = 5
        assert_eq!(filter(&store, None, density(1)).positions(), &[0, 5, 9]);
    }

    #[test]
    fn sampling_forces_endpoints() {
        for n in 1..25 {
            let store = store_of(n);
            for d in 1..=4 {
                let visible = filter(&store, None, density(d));
                let positions = visible.positions();
                assert_eq!(positions.first(), Some(&0), "n={n} d={d}");
                assert_eq!(positions.last(), Some(&(n - 1)), "n={n} d={d}");

                let mut deduped = positions.to_vec();
                deduped.dedup();
                assert_eq!(deduped.len(), positions.len(), "n={n} d={d}");
            }
        }
    }

    #[test]
    fn single_event_survives_sampling() {
        let store = store_of(1);
        assert_eq!(filter(&store, None, density(1)).positions(), &[0]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = store_of(7);
        let upper = filter(&store, Some("ROCKET"), density(5));
        let lower = filter(&store, Some("rocket"), density(5));
        assert_eq!(upper, lower);
        assert_eq!(upper.positions(), &[0, 3, 6]);

        let by_name = filter(&store, Some("event 4"), density(5));
        assert_eq!(by_name.positions(), &[4]);
    }

    #[test]
    fn empty_search_matches_absent_search() {
        let store = store_of(9);
        for d in 1..=5 {
            assert_eq!(
                filter(&store, Some(""), density(d)),
                filter(&store, None, density(d))
            );
        }
    }

    #[test]
    fn sampling_applies_to_filtered_sequence() {
        let store = store_of(13);
        // matches at 0, 3, 6, 9, 12. step 2 keeps filtered indices 0, 2, 4
        let visible = filter(&store, Some("rocket"), density(4));
        assert_eq!(visible.positions(), &[0, 6, 12]);
    }

    #[test]
    fn no_matches_is_empty() {
        let store = store_of(5);
        assert!(filter(&store, Some("submarine"), density(2)).is_empty());
    }

    #[test]
    fn empty_store_is_empty_at_any_density() {
        let store = EventStore::default();
        for d in 1..=5 {
            assert!(filter(&store, None, density(d)).is_empty());
        }
    }
}
