use std::time::Duration;

use tracing::debug;
use zigzag::{TimelineConfig, TimelineDriver, TimelineInfo, UserInput, ZigzagOptions};
use zigzag_ui::{header_ui, modal_ui, timeline_ui, Controls, TextureCache};

/// The timeline window
pub struct ZigzagApp {
    driver: TimelineDriver,
    info: TimelineInfo,
    controls: Controls,
    textures: TextureCache,
    options: ZigzagOptions,
}

impl eframe::App for ZigzagApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}

impl ZigzagApp {
    pub fn new(
        driver: TimelineDriver,
        info: TimelineInfo,
        config: &TimelineConfig,
        options: ZigzagOptions,
    ) -> Self {
        Self {
            driver,
            info,
            controls: Controls::new(config),
            textures: TextureCache::default(),
            options,
        }
    }

    pub fn driver(&self) -> &TimelineDriver {
        &self.driver
    }

    /// Draw one frame, then feed what the user did back to the driver
    #[profiling::function]
    pub fn render(&mut self, ctx: &egui::Context) {
        self.driver.poll();

        let mut inputs: Vec<UserInput> = Vec::new();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(8.0);
            header_ui(ui, &self.info);
            ui.add_space(8.0);
            inputs.extend(self.controls.ui(ui));
            ui.add_space(8.0);
        });

        let items_per_row = self.driver.items_per_row().get();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let view = self.driver.timeline_view();
                if let Some(signal) = timeline_ui(ui, &view, items_per_row) {
                    inputs.push(UserInput::ItemClicked(signal));
                }
            });
        });

        let open = self.driver.state().selection.selected_event_id();
        if let (Some(view), Some(event_id)) = (self.driver.modal_view(), open) {
            inputs.extend(modal_ui(ctx, &view, event_id, &mut self.textures));
        }

        if self.options.contains(ZigzagOptions::Debug) {
            self.debug_window(ctx);
        }

        for input in inputs {
            if self.driver.handle(input) {
                ctx.request_repaint();
            }
        }

        let open = self.driver.state().selection.selected_event_id();
        self.textures.retain_event(open);

        if self.driver.is_resolving() {
            debug!("waiting on images");
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    fn debug_window(&self, ctx: &egui::Context) {
        egui::Window::new("debug").show(ctx, |ui| {
            ui.label(format!("events: {}", self.driver.store().len()));
            ui.label(format!("visible: {}", self.driver.visible().len()));
            ui.label(format!(
                "layout generation: {}",
                self.driver.layout().generation()
            ));
            ui.label(format!("phase: {:?}", self.driver.state().selection.phase()));
            ui.label(format!("textures: {}", self.textures.len()));
        });
    }
}
