use eframe::egui;
use std::path::Path;

use crate::error::PhotoError;
use crate::service::EncodedImage;

/// A practice photo ready to be previewed and sent for critique
pub struct PracticePhoto {
    pub name: String,
    /// The file as it was read, sent to the critique service unchanged
    pub encoded: EncodedImage,
    pub preview: egui::ColorImage,
}

impl PracticePhoto {
    /// Decode `bytes` to validate them and build the preview
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, PhotoError> {
        let name = name.into();
        let img = image::load_from_memory(&bytes)?;
        log::debug!("Decoded practice photo {}: {}x{}", name, img.width(), img.height());

        let rgba = img.to_rgba8();
        let preview = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as usize, rgba.height() as usize],
            rgba.as_raw(),
        );

        Ok(Self {
            name,
            encoded: EncodedImage::sniff(bytes),
            preview,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, PhotoError> {
        let name = path.display().to_string();
        if !has_image_extension(path) {
            return Err(PhotoError::Unsupported(name));
        }
        let bytes = std::fs::read(path).map_err(|source| PhotoError::Read {
            name: name.clone(),
            source,
        })?;
        Self::from_bytes(name, bytes)
    }
}

/// Load an image dropped onto the window during this frame.
///
/// egui reports each drop on exactly one frame, so nothing needs to be
/// remembered between calls. When several files arrive together the first
/// image wins; a drop with no image at all reports the first file as
/// unsupported.
pub fn take_dropped_photo(ctx: &egui::Context) -> Option<Result<PracticePhoto, PhotoError>> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let first = dropped.first()?;

    match dropped.iter().find(|file| is_image_file(file)) {
        Some(file) => Some(load_dropped_file(file, dropped_file_name(file))),
        None => {
            let file_name = dropped_file_name(first);
            log::warn!("Dropped file is not a supported type: {}", file_name);
            Some(Err(PhotoError::Unsupported(file_name)))
        }
    }
}

fn dropped_file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        has_image_extension(path)
    } else {
        has_image_extension(Path::new(&file.name))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

fn load_dropped_file(file: &egui::DroppedFile, file_name: String) -> Result<PracticePhoto, PhotoError> {
    if let Some(bytes) = &file.bytes {
        log::info!("Loading practice photo from memory: {} ({} bytes)", file_name, bytes.len());
        PracticePhoto::from_bytes(file_name, bytes.to_vec())
    } else if let Some(path) = &file.path {
        log::info!("Loading practice photo from path: {}", path.display());
        PracticePhoto::from_path(path)
    } else {
        log::warn!("Dropped file has no accessible data: {}", file_name);
        Err(PhotoError::NoData(file_name))
    }
}
