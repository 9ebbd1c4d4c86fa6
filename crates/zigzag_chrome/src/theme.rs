use egui::{Color32, Visuals};

pub const PURPLE: Color32 = Color32::from_rgb(0xCC, 0x43, 0xC5);
const PURPLE_ALT: Color32 = Color32::from_rgb(0x82, 0x56, 0xDD);

const DARKER_BG: Color32 = Color32::from_rgb(0x1F, 0x1F, 0x1F);
const DARK_ISH_BG: Color32 = Color32::from_rgb(0x25, 0x25, 0x25);
const SEMI_DARK_BG: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);
const LIGHTER_GRAY: Color32 = Color32::from_rgb(0xf8, 0xf8, 0xf8);
const LIGHT_GRAY: Color32 = Color32::from_rgb(0xc8, 0xc8, 0xc8); // 78%

pub fn dark_mode() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = DARKER_BG;
    visuals.extreme_bg_color = DARK_ISH_BG;
    visuals.hyperlink_color = PURPLE;
    visuals.selection.bg_fill = PURPLE_ALT;
    visuals.selection.stroke.color = PURPLE;
    visuals.widgets.inactive.weak_bg_fill = DARK_ISH_BG;
    visuals.widgets.hovered.weak_bg_fill = SEMI_DARK_BG;
    visuals
}

pub fn light_mode() -> Visuals {
    let mut visuals = Visuals::light();
    visuals.panel_fill = Color32::WHITE;
    visuals.extreme_bg_color = LIGHTER_GRAY;
    visuals.hyperlink_color = PURPLE;
    visuals.selection.bg_fill = PURPLE_ALT;
    visuals.selection.stroke.color = PURPLE;
    visuals.widgets.inactive.weak_bg_fill = LIGHTER_GRAY;
    visuals.widgets.hovered.weak_bg_fill = LIGHT_GRAY;
    visuals
}
