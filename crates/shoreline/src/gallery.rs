//! The beach detail modal.

use log::debug;

use shoreline_core::catalog::Beach;

/// One picture in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    src: &'static str,
    alt: String,
}

impl GalleryImage {
    pub fn src(&self) -> &'static str {
        self.src
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }
}

/// Open/closed state of the detail modal.
///
/// Closing keeps the last beach so reopening shows the same content until a
/// different beach is selected.
#[derive(Debug, Clone, Default)]
pub struct GalleryModal {
    beach: Option<&'static Beach>,
    open: bool,
}

impl GalleryModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `beach` and shows the modal.
    pub fn open(&mut self, beach: &'static Beach) {
        debug!(beach = beach.id(); "Opening gallery modal");
        self.beach = Some(beach);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The last selected beach, if any. The modal renders nothing without one.
    pub fn beach(&self) -> Option<&'static Beach> {
        self.beach
    }

    /// The selected beach's pictures with alt text `"<name> <n>"`, 1-based.
    pub fn images(&self) -> Vec<GalleryImage> {
        let Some(beach) = self.beach else {
            return Vec::new();
        };
        beach
            .images()
            .iter()
            .copied()
            .enumerate()
            .map(|(i, src)| GalleryImage {
                src,
                alt: format!("{} {}", beach.name(), i + 1),
            })
            .collect()
    }
}
