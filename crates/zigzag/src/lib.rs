mod args;
pub mod config;
pub mod driver;
mod error;
pub mod event;
pub mod filter;
pub mod gallery;
pub mod graph;
pub mod images;
mod info;
pub mod layout;
pub mod loader;
mod options;
pub mod selection;
pub mod view;

pub use args::Args;
pub use config::{Density, ItemsPerRow, TimelineConfig};
pub use driver::{TimelineDriver, UserInput};
pub use error::Error;
pub use event::{parse_date, Event, EventId, EventStore, SENTINEL_DATE};
pub use filter::{filter, SearchPredicate, VisibleSet};
pub use gallery::{GalleryState, NavDirection};
pub use graph::{DependencyGraph, Node};
pub use images::{FolderImageResolver, ImageRef, ImageResolver, NoImages, StaticImages};
pub use info::TimelineInfo;
pub use layout::{
    layout, Connector, ConnectorDirection, ItemHandle, Layout, LayoutNode, Row, RowItem, RowParity,
};
pub use loader::load_events;
pub use options::ZigzagOptions;
pub use selection::{ClickSignal, SelectionPhase, SelectionState, SessionState};
pub use view::{ModalView, RowItemView, RowView, TimelineView};

pub type Result<T> = std::result::Result<T, error::Error>;
