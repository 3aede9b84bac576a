//! Picture discovery and loading.
//!
//! A picture directory holds one frame image (drawn as the background) and
//! any number of puzzle candidates. One candidate is chosen at random per
//! session and scaled down to fit the puzzle area.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FALLBACK_BACKGROUND;
use crate::error::AssetError;
use crate::geometry::fit_within;

/// File extensions accepted as puzzle pictures (compared case-insensitively).
pub const PICTURE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Source of puzzle pictures and the frame image.
pub trait PicturePicker {
    /// Where pictures come from, for diagnostics.
    fn location(&self) -> PathBuf;
    /// Lists puzzle candidates in a stable order.
    fn candidates(&self) -> Result<Vec<PathBuf>, AssetError>;
    /// Decodes a picture into an RGBA buffer.
    fn load(&self, path: &Path) -> Result<RgbaImage, AssetError>;
    /// Decodes the frame image, if there is one.
    fn load_frame(&self) -> Result<RgbaImage, AssetError>;
}

/// Picks pictures from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirectoryPicker {
    dir: PathBuf,
    frame_file: String,
}

impl DirectoryPicker {
    pub fn new(dir: impl Into<PathBuf>, frame_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            frame_file: frame_file.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_candidate(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        if name == self.frame_file {
            return false;
        }
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                PICTURE_EXTENSIONS
                    .iter()
                    .any(|known| extension.eq_ignore_ascii_case(known))
            })
    }
}

impl PicturePicker for DirectoryPicker {
    fn location(&self) -> PathBuf {
        self.dir.clone()
    }

    fn candidates(&self) -> Result<Vec<PathBuf>, AssetError> {
        let read_dir_error = |source| AssetError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if path.is_file() && self.is_candidate(&path) {
                candidates.push(path);
            }
        }
        // directory order is unspecified; sorting keeps seeded runs reproducible
        candidates.sort();
        Ok(candidates)
    }

    fn load(&self, path: &Path) -> Result<RgbaImage, AssetError> {
        let image = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image.to_rgba8())
    }

    fn load_frame(&self) -> Result<RgbaImage, AssetError> {
        self.load(&self.dir.join(&self.frame_file))
    }
}

/// Chooses one puzzle candidate with `rng`.
pub fn pick_picture<P, R>(picker: &P, rng: &mut R) -> Result<PathBuf, AssetError>
where
    P: PicturePicker + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = picker.candidates()?;
    debug!("{} puzzle candidates", candidates.len());
    candidates
        .choose(rng)
        .cloned()
        .ok_or_else(|| AssetError::NoCandidates(picker.location()))
}

/// Scales a picture down, never up, so it fits a `max_size` square.
pub fn scale_to_fit(picture: RgbaImage, max_size: u32) -> RgbaImage {
    let (width, height) = picture.dimensions();
    let (fitted_width, fitted_height) = fit_within(width, height, max_size);
    if (fitted_width, fitted_height) == (width, height) {
        return picture;
    }
    imageops::resize(&picture, fitted_width, fitted_height, FilterType::Lanczos3)
}

/// Loads the frame stretched to the surface, or a plain white surface if the
/// frame is missing or unreadable.
pub fn load_frame_or_default<P>(picker: &P, width: u32, height: u32) -> RgbaImage
where
    P: PicturePicker + ?Sized,
{
    match picker.load_frame() {
        Ok(frame) if frame.dimensions() == (width, height) => frame,
        Ok(frame) => imageops::resize(&frame, width, height, FilterType::Triangle),
        Err(err) => {
            warn!("{err}; using a plain background");
            RgbaImage::from_pixel(width, height, FALLBACK_BACKGROUND)
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    use super::*;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(dir.path().join(name))
            .unwrap();
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"not an image").unwrap();
    }

    /// In-memory picker with no files behind it.
    struct NoPictures;

    impl PicturePicker for NoPictures {
        fn location(&self) -> PathBuf {
            PathBuf::from("memory")
        }

        fn candidates(&self) -> Result<Vec<PathBuf>, AssetError> {
            Ok(Vec::new())
        }

        fn load(&self, path: &Path) -> Result<RgbaImage, AssetError> {
            Err(AssetError::NoCandidates(path.to_path_buf()))
        }

        fn load_frame(&self) -> Result<RgbaImage, AssetError> {
            Err(AssetError::NoCandidates(PathBuf::new()))
        }
    }

    #[test]
    fn test_candidates_filter_extension_and_frame() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "b.png", 2, 2);
        touch(&dir, "a.JPG");
        touch(&dir, "c.jpeg");
        touch(&dir, "box.jpg");
        touch(&dir, "notes.txt");
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let picker = DirectoryPicker::new(dir.path(), "box.jpg");
        let names: Vec<String> = picker
            .candidates()
            .unwrap()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.JPG", "b.png", "c.jpeg"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let picker = DirectoryPicker::new("/nonexistent/tileswap/pictures", "box.jpg");
        assert!(matches!(
            picker.candidates(),
            Err(AssetError::ReadDir { .. })
        ));
    }

    #[test]
    fn test_pick_picture_is_seeded() {
        let dir = TempDir::new().unwrap();
        for name in ["one.png", "two.png", "three.png", "four.png"] {
            touch(&dir, name);
        }
        let picker = DirectoryPicker::new(dir.path(), "box.jpg");
        let first = pick_picture(&picker, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = pick_picture(&picker, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_picture_without_candidates_fails() {
        let result = pick_picture(&NoPictures, &mut StdRng::seed_from_u64(0));
        match result {
            Err(AssetError::NoCandidates(location)) => {
                assert_eq!(location, PathBuf::from("memory"))
            }
            other => panic!("expected NoCandidates, got {other:?}"),
        }
    }

    #[test]
    fn test_load_decodes_png() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "pic.png", 3, 5);
        let picker = DirectoryPicker::new(dir.path(), "box.jpg");
        let picture = picker.load(&dir.path().join("pic.png")).unwrap();
        assert_eq!(picture.dimensions(), (3, 5));
        assert_eq!(*picture.get_pixel(1, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_undecodable_picture_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "broken.png");
        let picker = DirectoryPicker::new(dir.path(), "box.jpg");
        assert!(matches!(
            picker.load(&dir.path().join("broken.png")),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn test_missing_frame_falls_back_to_white() {
        let frame = load_frame_or_default(&NoPictures, 8, 6);
        assert_eq!(frame.dimensions(), (8, 6));
        assert!(frame.pixels().all(|pixel| *pixel == FALLBACK_BACKGROUND));
    }

    #[test]
    fn test_frame_is_stretched_to_surface() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "box.png", 4, 4);
        let picker = DirectoryPicker::new(dir.path(), "box.png");
        let frame = load_frame_or_default(&picker, 10, 7);
        assert_eq!(frame.dimensions(), (10, 7));
    }

    #[test]
    fn test_scale_to_fit_only_shrinks() {
        let large = RgbaImage::new(1400, 700);
        assert_eq!(scale_to_fit(large, 700).dimensions(), (700, 350));
        let small = RgbaImage::new(300, 200);
        assert_eq!(scale_to_fit(small, 700).dimensions(), (300, 200));
    }
}
