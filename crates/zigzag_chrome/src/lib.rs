pub mod app;
pub mod setup;
pub mod theme;

pub use app::ZigzagApp;
