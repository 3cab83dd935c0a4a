//! Static render command
//!
//! Writes `index.html`, the icon sprite and the profile image into an
//! output directory that any static host can serve.

use std::path::{Path, PathBuf};

use folio_core::content::SiteContent;
use folio_render::html::icons::SPRITE_PATH;
use folio_render::{RenderOptions, SPRITE, render_page};
use tracing::{info, warn};

use super::load_content;
use crate::cli::args::RenderArgs;
use crate::error::FolioError;
use crate::server::safe_relative_path;

/// Render the page into `args.output`.
///
/// # Errors
///
/// Returns a content error if loading fails, a render error if the page
/// cannot be built, or an I/O error if the output cannot be written.
pub fn run(args: &RenderArgs) -> Result<(), FolioError> {
    let loaded = load_content(&args.content)?;
    let options = RenderOptions {
        reduced_motion: args.reduced_motion,
        ..RenderOptions::default()
    };
    let html = render_page(&loaded.content, &options)?;

    std::fs::create_dir_all(&args.output)?;
    let index = args.output.join("index.html");
    std::fs::write(&index, html)?;

    let sprite = args.output.join(SPRITE_PATH.trim_start_matches('/'));
    if let Some(parent) = sprite.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&sprite, SPRITE)?;

    copy_profile_image(&loaded.content, &args.asset_dir, &args.output)?;

    info!(path = %index.display(), "page rendered");
    Ok(())
}

/// Copies the profile image from `asset_dir` into `output`.
///
/// Returns the destination path when the image was copied. A missing
/// image is not an error: the page renders and the browser shows a
/// broken image.
fn copy_profile_image(
    content: &SiteContent,
    asset_dir: &Path,
    output: &Path,
) -> Result<Option<PathBuf>, FolioError> {
    let image = content.profile.image.as_str();
    if image.contains("://") {
        return Ok(None);
    }
    let Some(relative) = safe_relative_path(image.trim_start_matches('/')) else {
        warn!(image, "profile image path is not a plain relative path; not copied");
        return Ok(None);
    };

    let source = asset_dir.join(&relative);
    if !source.is_file() {
        warn!(
            image = %source.display(),
            "profile image not found; the page will show a broken image"
        );
        return Ok(None);
    }

    let dest = output.join(&relative);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(&source, &dest)?;
    Ok(Some(dest))
}
