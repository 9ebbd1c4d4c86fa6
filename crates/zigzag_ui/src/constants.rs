pub const CARD_HEIGHT: f32 = 120.0;
pub const CARD_SPACING: f32 = 8.0;
pub const CARD_ROUNDING: u8 = 8;
pub const CARD_PADDING: f32 = 10.0;
pub const HOVER_LIFT: f32 = 2.0;
pub const TIMELINE_STROKE: f32 = 2.0;
pub const MODAL_WIDTH: f32 = 640.0;
pub const MODAL_IMAGE_HEIGHT: f32 = 420.0;
pub const MODAL_DESCRIPTION_HEIGHT: f32 = 200.0;
