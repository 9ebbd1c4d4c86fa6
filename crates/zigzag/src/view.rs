//! What the UI layer draws: plain strings and flags derived from the
//! layout and the session state.

use crate::event::{Event, EventStore};
use crate::images::ImageRef;
use crate::layout::{Connector, ItemHandle, Layout, LayoutNode, RowParity};
use crate::selection::SessionState;
use std::borrow::Cow;

pub const SUMMARY_MAX_CHARS: usize = 100;
pub const ELLIPSIS: &str = "...";
pub const NO_RESULTS_MESSAGE: &str = "No events match your search criteria.";
pub const NO_IMAGES_MESSAGE: &str = "No images available for this event.";

/// Shorten a description for the collapsed row view
pub fn summarize(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(SUMMARY_MAX_CHARS) {
        None => Cow::Borrowed(description),
        Some((cut, _)) => Cow::Owned(format!("{}{}", &description[..cut], ELLIPSIS)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowItemView<'a> {
    pub handle: ItemHandle,
    pub date: &'a str,
    pub title: &'a str,
    pub summary: Cow<'a, str>,
}

impl<'a> RowItemView<'a> {
    fn new(handle: ItemHandle, event: &'a Event) -> Self {
        Self {
            handle,
            date: &event.date_raw,
            title: &event.name,
            summary: summarize(&event.description),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowView<'a> {
    Row {
        parity: RowParity,
        /// Items in drawing order
        items: Vec<RowItemView<'a>>,
    },
    Connector(Connector),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineView<'a> {
    /// Nothing matched the current search
    Empty { message: &'static str },
    Rows(Vec<RowView<'a>>),
}

impl<'a> TimelineView<'a> {
    pub fn new(store: &'a EventStore, layout: &Layout) -> Self {
        if layout.is_empty() {
            return TimelineView::Empty {
                message: NO_RESULTS_MESSAGE,
            };
        }

        let rows = layout
            .nodes()
            .iter()
            .map(|node| match node {
                LayoutNode::Row(row) => RowView::Row {
                    parity: row.parity,
                    items: row
                        .display_items()
                        .filter_map(|item| {
                            store
                                .at(item.position)
                                .map(|event| RowItemView::new(item.handle, event))
                        })
                        .collect(),
                },
                LayoutNode::Connector(connector) => RowView::Connector(connector.clone()),
            })
            .collect();

        TimelineView::Rows(rows)
    }
}

/// The event modal. Only exists while an event is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView<'a> {
    pub title: &'a str,
    /// `Date: <raw date>`
    pub date_label: String,
    pub description: &'a str,
    pub image: Option<&'a ImageRef>,
    pub image_index: usize,
    pub counter: Option<String>,
    pub show_nav: bool,
    /// Shown in place of the image when the event has none
    pub empty_message: Option<&'static str>,
}

impl<'a> ModalView<'a> {
    pub fn new(store: &'a EventStore, state: &'a SessionState) -> Option<Self> {
        if !state.selection.is_open() {
            return None;
        }

        let event = store.get(state.selection.selected_event_id()?)?;
        let gallery = &state.gallery;

        Some(Self {
            title: &event.name,
            date_label: format!("Date: {}", event.date_raw),
            description: &event.description,
            image: gallery.current(),
            image_index: gallery.current_index(),
            counter: gallery.counter_text(),
            show_nav: gallery.can_navigate(),
            empty_message: if gallery.is_empty() {
                Some(NO_IMAGES_MESSAGE)
            } else {
                None
            },
        })
    }
}
