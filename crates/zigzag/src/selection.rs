//! Selection state machine.
//!
//! All transitions are pure functions from one [`SessionState`] to the next.
//! The driver holds the current value and swaps it for the result of each
//! input, so a transition never observes a half-applied predecessor.

use crate::event::EventId;
use crate::gallery::{GalleryState, NavDirection};
use crate::images::ImageRef;
use crate::layout::ItemHandle;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum SelectionPhase {
    /// Nothing selected, modal closed
    #[default]
    Idle,
    /// An event was picked, its images are being resolved
    Selecting(EventId),
    /// The modal is showing the event
    Open(EventId),
}

/// A click on a rendered timeline item.
///
/// `clicks` is the number of clicks the UI reports for the item. Signals
/// without a click count are framework noise, not user input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClickSignal {
    pub handle: Option<ItemHandle>,
    pub clicks: Option<u32>,
}

impl ClickSignal {
    pub fn clicked(handle: ItemHandle) -> Self {
        Self {
            handle: Some(handle),
            clicks: Some(1),
        }
    }

    /// A signal that carries no click at all
    pub fn none() -> Self {
        Self {
            handle: None,
            clicks: None,
        }
    }

    pub fn is_real(&self) -> bool {
        self.handle.is_some() && self.clicks.is_some_and(|n| n > 0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    phase: SelectionPhase,
    app_loaded: bool,
}

impl SelectionState {
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn app_loaded(&self) -> bool {
        self.app_loaded
    }

    pub fn selected_event_id(&self) -> Option<EventId> {
        match self.phase {
            SelectionPhase::Idle => None,
            SelectionPhase::Selecting(id) | SelectionPhase::Open(id) => Some(id),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, SelectionPhase::Open(_))
    }
}

/// Everything about a session that changes in response to clicks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub selection: SelectionState,
    pub gallery: GalleryState,
}

impl SessionState {
    pub fn initial() -> Self {
        Self::default()
    }

    fn idle(&self) -> Self {
        SessionState {
            selection: SelectionState {
                phase: SelectionPhase::Idle,
                app_loaded: self.selection.app_loaded,
            },
            gallery: GalleryState::empty(),
        }
    }

    /// The first timeline render finished. Happens once per session.
    pub fn loaded(&self) -> Self {
        let mut next = self.clone();
        next.selection.app_loaded = true;
        next
    }

    /// A click on an item that resolved to `target`, or to nothing.
    pub fn click(&self, target: Option<EventId>, signal: ClickSignal) -> Self {
        if !self.selection.app_loaded {
            debug!("ignoring click before the timeline finished loading");
            return self.clone();
        }

        if !signal.is_real() {
            return self.clone();
        }

        let Some(id) = target else {
            debug!("click on an item that is no longer laid out");
            return self.clone();
        };

        debug!("selecting event {id}");
        SessionState {
            selection: SelectionState {
                phase: SelectionPhase::Selecting(id),
                app_loaded: true,
            },
            gallery: GalleryState::empty(),
        }
    }

    /// The selected id has no event behind it
    pub fn lookup_missed(&self, id: EventId) -> Self {
        if self.selection.phase != SelectionPhase::Selecting(id) {
            return self.clone();
        }

        debug!("event {id} not found, back to idle");
        self.idle()
    }

    /// Images for `id` arrived. Results for anything but the event currently
    /// being selected are stale and dropped.
    pub fn resolved(&self, id: EventId, images: Vec<ImageRef>) -> Self {
        if self.selection.phase != SelectionPhase::Selecting(id) {
            debug!("discarding stale images for event {id}");
            return self.clone();
        }

        debug!("opening event {id} with {} images", images.len());
        SessionState {
            selection: SelectionState {
                phase: SelectionPhase::Open(id),
                app_loaded: self.selection.app_loaded,
            },
            gallery: GalleryState::new(images),
        }
    }

    pub fn close(&self) -> Self {
        if self.selection.phase == SelectionPhase::Idle {
            return self.clone();
        }

        self.idle()
    }

    pub fn navigate(&self, direction: NavDirection) -> Self {
        if !self.selection.is_open() {
            return self.clone();
        }

        SessionState {
            selection: self.selection,
            gallery: self.gallery.navigate(direction),
        }
    }
}
