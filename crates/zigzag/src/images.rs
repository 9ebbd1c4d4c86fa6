use crate::event::EventId;
use crate::Result;
use base64::Engine;
use image::imageops::FilterType;
use image::ImageFormat;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
const MAX_IMG_LENGTH: u32 = 2048;

/// An encoded image ready to be displayed inline
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    mime: String,
    bytes: Arc<[u8]>,
}

impl ImageRef {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:<mime>;base64,...`
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRef")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Maps an event to its images. Resolvers never fail: anything that cannot be
/// loaded is left out of the result.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, event_id: EventId) -> Vec<ImageRef>;
}

/// Resolver for timelines without images
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _event_id: EventId) -> Vec<ImageRef> {
        Vec::new()
    }
}

/// A fixed, in-memory set of images per event
#[derive(Debug, Default, Clone)]
pub struct StaticImages {
    images: HashMap<EventId, Vec<ImageRef>>,
}

impl StaticImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, event_id: EventId, images: Vec<ImageRef>) -> Self {
        self.images.insert(event_id, images);
        self
    }
}

impl ImageResolver for StaticImages {
    fn resolve(&self, event_id: EventId) -> Vec<ImageRef> {
        self.images.get(&event_id).cloned().unwrap_or_default()
    }
}

/// Reads `<root>/<event id>/*.{png,jpg,jpeg,gif}` and transcodes every image
/// to JPEG.
#[derive(Debug, Clone)]
pub struct FolderImageResolver {
    root: PathBuf,
}

impl FolderImageResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn event_dir(&self, event_id: EventId) -> PathBuf {
        self.root.join(event_id.to_string())
    }

    fn image_paths(dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("no images for {}: {err}", dir.display());
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_supported_image(path))
            .collect();

        // read_dir order is platform dependent
        paths.sort();
        paths
    }
}

impl ImageResolver for FolderImageResolver {
    #[profiling::function]
    fn resolve(&self, event_id: EventId) -> Vec<ImageRef> {
        let dir = self.event_dir(event_id);

        Self::image_paths(&dir)
            .into_iter()
            .filter_map(|path| match transcode_to_jpeg(&path) {
                Ok(img) => Some(img),
                Err(err) => {
                    warn!("error loading image {}: {err}", path.display());
                    None
                }
            })
            .collect()
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// If the image's longest dimension is greater than max_edge, downscale
fn resize_image_if_too_big(
    image: image::DynamicImage,
    max_edge: u32,
    filter: FilterType,
) -> image::DynamicImage {
    let w = image.width();
    let h = image.height();
    let long = w.max(h);

    if long > max_edge {
        let scale = max_edge as f32 / long as f32;
        let new_w = (w as f32 * scale).round() as u32;
        let new_h = (h as f32 * scale).round() as u32;

        image.resize(new_w, new_h, filter)
    } else {
        image
    }
}

fn transcode_to_jpeg(path: &Path) -> Result<ImageRef> {
    let image = image::open(path)?;
    let image = resize_image_if_too_big(image, MAX_IMG_LENGTH, FilterType::CatmullRom);

    // jpeg has no alpha channel
    let rgb = image::DynamicImage::ImageRgb8(image.into_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;

    Ok(ImageRef::new("image/jpeg", buf))
}
