//! Codec boundary and folder traversal
//!
//! Decode/encode lives entirely behind the `image` crate; the pipeline only
//! ever sees `ImageBuffer`. Every input is forced to 8-bit RGB on decode and
//! the output format is inferred from the destination extension.

use crate::buffer::ImageBuffer;
use crate::error::GlitchError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted by the batch traversal (lowercase).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "gif"];

/// Does this path look like an image the batch should pick up?
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode a file into an RGB buffer.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageBuffer, GlitchError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| GlitchError::codec(path, e))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    ImageBuffer::from_raw(width, height, rgb.into_raw()).ok_or(GlitchError::BadPixelLayout)
}

/// Encode a buffer to a file; format follows the extension.
pub fn save_image(path: impl AsRef<Path>, buffer: &ImageBuffer) -> Result<(), GlitchError> {
    let path = path.as_ref();
    let rgb = image::RgbImage::from_raw(buffer.width(), buffer.height(), buffer.pixels().to_vec())
        .ok_or(GlitchError::BadPixelLayout)?;
    rgb.save(path).map_err(|e| GlitchError::codec(path, e))
}

/// Image files directly inside `folder`, sorted by name so a seeded batch
/// visits them in a reproducible order.
pub fn list_image_files(folder: impl AsRef<Path>) -> Result<Vec<PathBuf>, GlitchError> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(GlitchError::MissingInputFolder(folder.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| GlitchError::io(folder, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(is_image_file(Path::new("photo.png")));
        assert!(is_image_file(Path::new("photo.JPG")));
        assert!(is_image_file(Path::new("dir/photo.jpeg")));
        assert!(is_image_file(Path::new("anim.gif")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("archive.png.zip")));
        assert!(!is_image_file(Path::new("noextension")));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = std::env::temp_dir().join("glitchforge_io_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.png");

        let mut original = ImageBuffer::new(9, 7);
        for y in 0..7 {
            for x in 0..9 {
                original.set_pixel(x, y, (x * 20) as u8, (y * 30) as u8, 200);
            }
        }
        save_image(&path, &original).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, original);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_input_folder_is_an_error() {
        let result = list_image_files("/definitely/not/a/real/folder");
        assert!(matches!(result, Err(GlitchError::MissingInputFolder(_))));
    }
}
