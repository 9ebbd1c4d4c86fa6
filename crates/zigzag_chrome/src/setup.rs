use eframe::NativeOptions;
use zigzag::ZigzagOptions;

use crate::theme;

pub fn generate_native_options(title: &str) -> NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    }
}

/// Install both themes and pick the one the options ask for
pub fn setup_cc(ctx: &egui::Context, options: ZigzagOptions) {
    ctx.set_visuals_of(egui::Theme::Dark, theme::dark_mode());
    ctx.set_visuals_of(egui::Theme::Light, theme::light_mode());

    let light = options.contains(ZigzagOptions::LightTheme);
    ctx.set_theme(if light {
        egui::Theme::Light
    } else {
        egui::Theme::Dark
    });

    if options.contains(ZigzagOptions::Debug) {
        ctx.set_debug_on_hover(true);
    }
}
