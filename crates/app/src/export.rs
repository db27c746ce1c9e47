//! PNG export of canvases

use std::path::{Path, PathBuf};

use painting::DrawableCanvas;
use tracing::info;

use crate::session::SessionError;

/// Write `canvas` to `dir/<name>.png`, creating `dir` if needed
pub fn write_png(dir: &Path, name: &str, canvas: &DrawableCanvas) -> Result<PathBuf, SessionError> {
    std::fs::create_dir_all(dir).map_err(|source| SessionError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let surface = canvas.surface();
    let image = image::RgbaImage::from_raw(surface.width, surface.height, surface.to_rgba8())
        .ok_or_else(|| SessionError::Export(format!("{name}: pixel buffer size mismatch")))?;

    let path = dir.join(format!("{name}.png"));
    image.save(&path)?;
    info!("Wrote {}", path.display());
    Ok(path)
}
