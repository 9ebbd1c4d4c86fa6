mod card;
pub mod constants;
mod controls;
mod header;
pub mod images;
mod modal;
mod timeline;

pub use controls::Controls;
pub use header::header_ui;
pub use images::TextureCache;
pub use modal::modal_ui;
pub use timeline::timeline_ui;
