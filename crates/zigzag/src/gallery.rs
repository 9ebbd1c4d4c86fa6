use crate::images::ImageRef;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Prev,
    Next,
}

/// The image set of the selected event and the image currently shown.
///
/// Images are shared, so stepping the cursor never copies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    images: Arc<[ImageRef]>,
    current: usize,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GalleryState {
    /// A fresh gallery always starts at the first image
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self {
            images: images.into(),
            current: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.images.get(self.current)
    }

    /// Prev/next controls only make sense with more than one image
    pub fn can_navigate(&self) -> bool {
        self.images.len() > 1
    }

    /// `Image i of n`, only when there is something to page through
    pub fn counter_text(&self) -> Option<String> {
        if self.can_navigate() {
            Some(format!("Image {} of {}", self.current + 1, self.images.len()))
        } else {
            None
        }
    }

    /// Step the cursor, wrapping around at either end
    pub fn navigate(&self, direction: NavDirection) -> GalleryState {
        if !self.can_navigate() {
            return self.clone();
        }

        let n = self.images.len();
        let current = match direction {
            NavDirection::Prev => (self.current + n - 1) % n,
            NavDirection::Next => (self.current + 1) % n,
        };

        GalleryState {
            images: Arc::clone(&self.images),
            current,
        }
    }
}
