use crate::constants::{MODAL_DESCRIPTION_HEIGHT, MODAL_IMAGE_HEIGHT, MODAL_WIDTH};
use crate::images::TextureCache;
use egui::load::SizedTexture;
use egui::RichText;
use zigzag::{EventId, ModalView, NavDirection, UserInput};

/// The open event: title, date, the current image with gallery controls and
/// the full description.
pub fn modal_ui(
    ctx: &egui::Context,
    view: &ModalView<'_>,
    event_id: EventId,
    textures: &mut TextureCache,
) -> Vec<UserInput> {
    let mut inputs = Vec::new();

    let resp = egui::Modal::new(egui::Id::new("event_modal")).show(ctx, |ui| {
        ui.set_width(MODAL_WIDTH);

        ui.heading(view.title);
        ui.label(RichText::new(&view.date_label).weak());
        ui.separator();

        match view.image {
            Some(image) => match textures.get_or_load(ctx, event_id, view.image_index, image) {
                Some(texture) => {
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Image::new(SizedTexture::from_handle(texture))
                                .max_width(MODAL_WIDTH)
                                .max_height(MODAL_IMAGE_HEIGHT),
                        );
                    });
                }
                None => {
                    ui.label(RichText::new("This image could not be displayed.").italics());
                }
            },
            None => {
                if let Some(message) = view.empty_message {
                    ui.label(RichText::new(message).italics());
                }
            }
        }

        if view.show_nav {
            ui.horizontal(|ui| {
                if ui.button("⏴").clicked() {
                    inputs.push(UserInput::Nav(NavDirection::Prev));
                }
                if let Some(counter) = &view.counter {
                    ui.label(counter);
                }
                if ui.button("⏵").clicked() {
                    inputs.push(UserInput::Nav(NavDirection::Next));
                }
            });
        }

        ui.separator();
        egui::ScrollArea::vertical()
            .max_height(MODAL_DESCRIPTION_HEIGHT)
            .show(ui, |ui| {
                ui.label(view.description);
            });

        ui.separator();
        if ui.button("Close").clicked() {
            inputs.push(UserInput::Close);
        }
    });

    // escape or a click on the backdrop
    if resp.should_close() && !inputs.contains(&UserInput::Close) {
        inputs.push(UserInput::Close);
    }

    inputs
}
