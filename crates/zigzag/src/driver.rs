use crate::config::{Density, ItemsPerRow, TimelineConfig};
use crate::event::{Event, EventId, EventStore};
use crate::filter::{sample, search, SearchPredicate, VisibleSet};
use crate::gallery::{GalleryState, NavDirection};
use crate::graph::{DependencyGraph, Node};
use crate::images::{ImageRef, ImageResolver};
use crate::layout::{layout, Layout};
use crate::selection::{ClickSignal, SelectionPhase, SessionState};
use crate::view::{ModalView, TimelineView};
use poll_promise::Promise;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One discrete input from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    ItemsPerRow(u8),
    Density(u8),
    Search(String),
    ItemClicked(ClickSignal),
    Nav(NavDirection),
    Close,
}

struct PendingImages {
    event_id: EventId,
    started: Instant,
    promise: Promise<Vec<ImageRef>>,
}

/// Owns the inputs, the derived view state and the session state of one
/// timeline session, and applies user inputs to them one at a time.
pub struct TimelineDriver {
    store: Arc<EventStore>,
    resolver: Arc<dyn ImageResolver>,
    graph: DependencyGraph,

    search: SearchPredicate,
    density: Density,
    items_per_row: ItemsPerRow,
    connector_height: f32,

    filtered: VisibleSet,
    visible: VisibleSet,
    layout: Layout,
    generation: u32,
    last_recomputed: Vec<Node>,

    state: SessionState,
    pending: Option<PendingImages>,
    background_images: bool,
    resolve_timeout: Duration,
}

impl TimelineDriver {
    /// Runs the first layout pass, then starts accepting input
    pub fn start(
        store: Arc<EventStore>,
        resolver: Arc<dyn ImageResolver>,
        config: &TimelineConfig,
    ) -> Self {
        let mut driver = Self {
            store,
            resolver,
            graph: DependencyGraph::new(),
            search: SearchPredicate::match_all(),
            density: config.density,
            items_per_row: config.items_per_row,
            connector_height: config.connector_height,
            filtered: VisibleSet::default(),
            visible: VisibleSet::default(),
            layout: Layout::default(),
            generation: 0,
            last_recomputed: Vec::new(),
            state: SessionState::initial(),
            pending: None,
            background_images: config.background_images,
            resolve_timeout: config.resolve_timeout(),
        };

        let all = driver.graph.all_derived();
        driver.recompute(&all);
        driver.state = driver.state.loaded();

        info!(
            "timeline ready: {} events, {} visible",
            driver.store.len(),
            driver.visible.len()
        );

        driver
    }

    /// Apply one input. Returns true if anything the UI shows changed.
    pub fn handle(&mut self, input: UserInput) -> bool {
        debug!("input {:?}", input);

        match input {
            UserInput::ItemsPerRow(n) => {
                let items_per_row = ItemsPerRow::new(n);
                if items_per_row == self.items_per_row {
                    return false;
                }
                self.items_per_row = items_per_row;
                self.invalidate(&[Node::ItemsPerRow]);
                true
            }

            UserInput::Density(level) => {
                let density = Density::new(level);
                if density == self.density {
                    return false;
                }
                self.density = density;
                self.invalidate(&[Node::Density]);
                true
            }

            UserInput::Search(term) => {
                let search = SearchPredicate::new(Some(&term));
                if search == self.search {
                    return false;
                }
                self.search = search;
                self.invalidate(&[Node::SearchTerm]);
                true
            }

            UserInput::ItemClicked(signal) => {
                let target = signal.handle.and_then(|h| self.layout.resolve(h));
                let next = self.state.click(target, signal);
                if next == self.state {
                    return false;
                }
                self.state = next;

                if let SelectionPhase::Selecting(id) = self.state.selection.phase() {
                    self.begin_selection(id);
                }
                true
            }

            UserInput::Nav(direction) => self.replace_state(self.state.navigate(direction)),

            UserInput::Close => {
                self.pending = None;
                self.replace_state(self.state.close())
            }
        }
    }

    pub fn set_connector_height(&mut self, height: f32) {
        if height == self.connector_height {
            return;
        }
        self.connector_height = height;
        self.invalidate(&[Node::ConnectorHeight]);
    }

    /// Finish a background image resolution if it is done, or give up on it
    /// once it has taken too long. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let event_id = pending.event_id;
        let images = match pending.promise.try_take() {
            Ok(images) => images,
            Err(promise) => {
                if pending.started.elapsed() < self.resolve_timeout {
                    self.pending = Some(PendingImages { promise, ..pending });
                    return false;
                }

                warn!(
                    "images for event {} took longer than {:?}, opening without them",
                    event_id, self.resolve_timeout
                );
                Vec::new()
            }
        };

        self.replace_state(self.state.resolved(event_id, images))
    }

    /// Block until no image resolution is pending. Bounded by the resolve
    /// timeout.
    pub fn settle(&mut self) {
        while self.pending.is_some() {
            if !self.poll() && self.pending.is_some() {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The event the modal is showing or about to show
    pub fn selected(&self) -> Option<&Event> {
        self.state
            .selection
            .selected_event_id()
            .and_then(|id| self.store.get(id))
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.state.gallery
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn items_per_row(&self) -> ItemsPerRow {
        self.items_per_row
    }

    /// Derived nodes touched by the most recent input
    pub fn last_recomputed(&self) -> &[Node] {
        &self.last_recomputed
    }

    pub fn timeline_view(&self) -> TimelineView<'_> {
        TimelineView::new(&self.store, &self.layout)
    }

    pub fn modal_view(&self) -> Option<ModalView<'_>> {
        ModalView::new(&self.store, &self.state)
    }

    fn replace_state(&mut self, next: SessionState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    fn invalidate(&mut self, changed: &[Node]) {
        let dirty = self.graph.dirty_from(changed);
        self.recompute(&dirty);
    }

    #[profiling::function]
    fn recompute(&mut self, dirty: &[Node]) {
        for node in dirty {
            match node {
                Node::Filtered => self.filtered = search(&self.store, &self.search),
                Node::Visible => self.visible = sample(&self.filtered, self.density),
                Node::Layout => {
                    self.generation = self.generation.wrapping_add(1);
                    self.layout = layout(
                        &self.store,
                        &self.visible,
                        self.items_per_row,
                        self.connector_height,
                        self.generation,
                    );
                }
                Node::SearchTerm | Node::Density | Node::ItemsPerRow | Node::ConnectorHeight => {}
            }
        }

        debug!("recomputed {:?}", dirty);
        self.last_recomputed = dirty.to_vec();
    }

    fn begin_selection(&mut self, id: EventId) {
        // a newer selection supersedes whatever was in flight
        self.pending = None;

        if self.store.get(id).is_none() {
            self.state = self.state.lookup_missed(id);
            return;
        }

        if !self.background_images {
            let images = resolve_images(self.resolver.as_ref(), id);
            self.state = self.state.resolved(id, images);
            return;
        }

        let resolver = Arc::clone(&self.resolver);
        let promise = Promise::spawn_thread(format!("images-{id}"), move || {
            resolve_images(resolver.as_ref(), id)
        });
        self.pending = Some(PendingImages {
            event_id: id,
            started: Instant::now(),
            promise,
        });
    }
}

/// A resolver that panics resolves to no images
fn resolve_images(resolver: &dyn ImageResolver, id: EventId) -> Vec<ImageRef> {
    match catch_unwind(AssertUnwindSafe(|| resolver.resolve(id))) {
        Ok(images) => images,
        Err(_) => {
            warn!("image resolver panicked for event {id}, opening without images");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::{NoImages, StaticImages};
    use crate::layout::ItemHandle;
    use pretty_assertions::assert_eq;

    fn store() -> Arc<EventStore> {
        Arc::new(EventStore::from_events(
            (0..10)
                .map(|i| {
                    Event::new(
                        EventId::new(i),
                        format!("Event {i}"),
                        if i % 2 == 0 { "even thing" } else { "odd thing" },
                        format!("{}", 2000 + i),
                    )
                })
                .collect(),
        ))
    }

    fn sync_config() -> TimelineConfig {
        TimelineConfig {
            background_images: false,
            ..Default::default()
        }
    }

    fn first_handle(driver: &TimelineDriver) -> ItemHandle {
        driver.layout().rows().next().unwrap().items[0].handle
    }

    #[test]
    fn start_lays_out_and_marks_loaded() {
        let driver = TimelineDriver::start(store(), Arc::new(NoImages), &sync_config());

        assert!(driver.state().selection.app_loaded());
        assert_eq!(driver.visible().len(), 10);
        assert_eq!(driver.layout().rows().count(), 2);
        assert_eq!(driver.state().selection.selected_event_id(), None);
        assert!(driver.modal_view().is_none());
    }

    #[test]
    fn only_downstream_nodes_recompute() {
        let mut driver = TimelineDriver::start(store(), Arc::new(NoImages), &sync_config());

        assert!(driver.handle(UserInput::ItemsPerRow(3)));
        assert_eq!(driver.last_recomputed(), &[Node::Layout]);

        assert!(driver.handle(UserInput::Density(2)));
        assert_eq!(driver.last_recomputed(), &[Node::Visible, Node::Layout]);

        assert!(driver.handle(UserInput::Search("odd".to_string())));
        assert_eq!(
            driver.last_recomputed(),
            &[Node::Filtered, Node::Visible, Node::Layout]
        );

        driver.set_connector_height(40.0);
        assert_eq!(driver.last_recomputed(), &[Node::Layout]);
        assert!(driver.layout().connectors().all(|c| c.height == 40.0));
    }

    #[test]
    fn unchanged_inputs_do_nothing() {
        let mut driver = TimelineDriver::start(store(), Arc::new(NoImages), &sync_config());
        let generation = driver.layout().generation();

        assert!(!driver.handle(UserInput::ItemsPerRow(6)));
        assert!(!driver.handle(UserInput::Density(5)));
        assert!(!driver.handle(UserInput::Search(String::new())));
        assert_eq!(driver.layout().generation(), generation);
    }

    #[test]
    fn click_opens_modal_synchronously() {
        let images = StaticImages::new().with(
            EventId::new(0),
            vec![
                ImageRef::new("image/jpeg", vec![1]),
                ImageRef::new("image/jpeg", vec![2]),
                ImageRef::new("image/jpeg", vec![3]),
            ],
        );
        let mut driver = TimelineDriver::start(store(), Arc::new(images), &sync_config());

        let handle = first_handle(&driver);
        assert!(driver.handle(UserInput::ItemClicked(ClickSignal::clicked(handle))));
        assert_eq!(
            driver.state().selection.phase(),
            SelectionPhase::Open(EventId::new(0))
        );

        assert_eq!(driver.selected().map(|e| e.name.as_str()), Some("Event 0"));

        driver.handle(UserInput::Nav(NavDirection::Prev));
        assert_eq!(driver.gallery().current_index(), 2);
        let modal = driver.modal_view().unwrap();
        assert_eq!(modal.counter.as_deref(), Some("Image 3 of 3"));

        assert!(driver.handle(UserInput::Close));
        assert_eq!(driver.state(), &SessionState::initial().loaded());
    }

    #[test]
    fn stale_handles_are_ignored_after_relayout() {
        let mut driver = TimelineDriver::start(store(), Arc::new(NoImages), &sync_config());
        let stale = first_handle(&driver);

        driver.handle(UserInput::ItemsPerRow(2));
        assert!(!driver.handle(UserInput::ItemClicked(ClickSignal::clicked(stale))));
        assert_eq!(driver.state().selection.selected_event_id(), None);
    }

    #[test]
    fn background_resolution_opens_after_settle() {
        let images = StaticImages::new().with(
            EventId::new(0),
            vec![ImageRef::new("image/jpeg", vec![9])],
        );
        let mut driver =
            TimelineDriver::start(store(), Arc::new(images), &TimelineConfig::default());

        let handle = first_handle(&driver);
        driver.handle(UserInput::ItemClicked(ClickSignal::clicked(handle)));
        assert_eq!(
            driver.state().selection.phase(),
            SelectionPhase::Selecting(EventId::new(0))
        );
        assert!(driver.is_resolving());
        assert!(driver.modal_view().is_none());

        driver.settle();
        assert!(!driver.is_resolving());
        let modal = driver.modal_view().unwrap();
        assert_eq!(modal.title, "Event 0");
        assert_eq!(modal.image.map(|i| i.bytes()), Some(&[9u8][..]));
    }

    struct SlowImages;

    impl ImageResolver for SlowImages {
        fn resolve(&self, _event_id: EventId) -> Vec<ImageRef> {
            std::thread::sleep(Duration::from_millis(500));
            vec![ImageRef::new("image/jpeg", vec![1])]
        }
    }

    #[test]
    fn slow_resolution_times_out_to_empty_gallery() {
        let config = TimelineConfig {
            resolve_timeout_ms: 20,
            ..Default::default()
        };
        let mut driver = TimelineDriver::start(store(), Arc::new(SlowImages), &config);

        let handle = first_handle(&driver);
        driver.handle(UserInput::ItemClicked(ClickSignal::clicked(handle)));
        driver.settle();

        assert!(driver.state().selection.is_open());
        assert!(driver.state().gallery.is_empty());
        assert!(driver.modal_view().unwrap().empty_message.is_some());
    }

    struct PanickingImages;

    impl ImageResolver for PanickingImages {
        fn resolve(&self, _event_id: EventId) -> Vec<ImageRef> {
            panic!("decoder blew up");
        }
    }

    #[test]
    fn panicking_resolver_opens_empty_gallery() {
        for background_images in [true, false] {
            let config = TimelineConfig {
                background_images,
                ..Default::default()
            };
            let mut driver = TimelineDriver::start(store(), Arc::new(PanickingImages), &config);

            let handle = first_handle(&driver);
            driver.handle(UserInput::ItemClicked(ClickSignal::clicked(handle)));
            driver.settle();

            assert_eq!(
                driver.state().selection.phase(),
                SelectionPhase::Open(EventId::new(0))
            );
            assert!(driver.gallery().is_empty());
            assert!(driver.modal_view().unwrap().empty_message.is_some());
        }
    }

    #[test]
    fn close_drops_pending_resolution() {
        let mut driver =
            TimelineDriver::start(store(), Arc::new(SlowImages), &TimelineConfig::default());

        let handle = first_handle(&driver);
        driver.handle(UserInput::ItemClicked(ClickSignal::clicked(handle)));
        assert!(driver.is_resolving());

        driver.handle(UserInput::Close);
        assert!(!driver.is_resolving());
        assert!(!driver.poll());
        assert_eq!(driver.state().selection.phase(), SelectionPhase::Idle);
    }

    #[test]
    fn newer_selection_supersedes_pending_one() {
        let images = StaticImages::new()
            .with(EventId::new(0), vec![ImageRef::new("image/jpeg", vec![0])])
            .with(EventId::new(1), vec![ImageRef::new("image/jpeg", vec![1])]);
        let mut driver =
            TimelineDriver::start(store(), Arc::new(images), &TimelineConfig::default());

        let row = driver.layout().rows().next().unwrap().clone();
        driver.handle(UserInput::ItemClicked(ClickSignal::clicked(row.items[0].handle)));
        driver.handle(UserInput::ItemClicked(ClickSignal::clicked(row.items[1].handle)));
        driver.settle();

        assert_eq!(
            driver.state().selection.phase(),
            SelectionPhase::Open(EventId::new(1))
        );
        assert_eq!(driver.state().gallery.current().map(|i| i.bytes()), Some(&[1u8][..]));
    }

    #[test]
    fn empty_search_results_render_empty_state() {
        let mut driver = TimelineDriver::start(store(), Arc::new(NoImages), &sync_config());
        driver.handle(UserInput::Search("nothing like this".to_string()));

        assert!(matches!(driver.timeline_view(), TimelineView::Empty { .. }));
    }
}
