use egui::{ColorImage, TextureHandle, TextureOptions};
use std::collections::HashMap;
use tracing::error;
use zigzag::{EventId, ImageRef};

/// Decode an encoded image into something egui can upload
pub fn decode_color_image(image: &ImageRef) -> zigzag::Result<ColorImage> {
    let rgba = image::load_from_memory(image.bytes())?.into_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// GPU textures for the images of the open event
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<(EventId, usize), Option<TextureHandle>>,
}

impl TextureCache {
    /// Texture of the `index`th image of `event_id`, uploaded on first use.
    /// Images that fail to decode are remembered as failed.
    pub fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        event_id: EventId,
        index: usize,
        image: &ImageRef,
    ) -> Option<&TextureHandle> {
        self.textures
            .entry((event_id, index))
            .or_insert_with(|| match decode_color_image(image) {
                Ok(color_image) => Some(ctx.load_texture(
                    format!("event-{event_id}-{index}"),
                    color_image,
                    TextureOptions::LINEAR,
                )),
                Err(err) => {
                    error!("could not decode image {index} of event {event_id}: {err}");
                    None
                }
            })
            .as_ref()
    }

    /// Free every texture that doesn't belong to `open`
    pub fn retain_event(&mut self, open: Option<EventId>) {
        self.textures.retain(|(event_id, _), _| Some(*event_id) == open);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
