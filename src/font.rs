use std::path::{Path, PathBuf};

use rusttype::{point, Font, Scale};
use tracing::info;

use crate::error::ResourceError;

/// Label font, loaded once at startup and owned by the driver.
pub struct LabelFont {
    font: Font<'static>,
    path: PathBuf,
}

impl LabelFont {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| ResourceError::FontRead {
            path: path.clone(),
            source,
        })?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| ResourceError::FontParse { path: path.clone() })?;

        info!(path = %path.display(), glyphs = font.glyph_count(), "label font loaded");
        Ok(Self { font, path })
    }

    /// Horizontal advance of `text` at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> f64 {
        self.font
            .layout(text, Scale::uniform(size), point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0) as f64
    }
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont").field("path", &self.path).finish()
    }
}
