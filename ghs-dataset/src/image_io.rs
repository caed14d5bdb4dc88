//! Image decoding.

use crate::common::*;
use bbox::HW;
use image::{DynamicImage, GrayImage};

/// Image pixels laid out as `(channels, height, width)`.
pub type Image = Array3<u8>;

/// Decodes image files into [`Image`] arrays.
pub trait ImageReader
where
    Self: Debug + Send + Sync,
{
    /// Decode the file at `path`, as 3-channel RGB if `color` is set or as a
    /// single luma channel otherwise.
    fn read_image(&self, path: &Path, color: bool) -> anyhow::Result<Image>;
}

/// Reads images from the file system with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageReader;

impl ImageReader for FileImageReader {
    fn read_image(&self, path: &Path, color: bool) -> anyhow::Result<Image> {
        let image = image::open(path)?;
        to_chw_array(&image, color)
    }
}

/// Convert a decoded image into a `(C, H, W)` array.
pub fn to_chw_array(image: &DynamicImage, color: bool) -> anyhow::Result<Image> {
    let (channels, width, height, raw) = if color {
        let rgb = image.to_rgb8();
        let (w, h) = rgb.dimensions();
        (3, w, h, rgb.into_raw())
    } else {
        let luma = image.to_luma8();
        let (w, h) = luma.dimensions();
        (1, w, h, luma.into_raw())
    };

    let hwc = Array3::from_shape_vec((height as usize, width as usize, channels), raw)?;
    Ok(hwc.permuted_axes([2, 0, 1]).as_standard_layout().into_owned())
}

/// The `(height, width)` of a `(C, H, W)` image.
pub fn image_size(image: &Image) -> HW<usize> {
    let (_, h, w) = image.dim();
    HW::from_unsigned_hw([h, w])
}

/// Split an image into single-channel planes.
pub(crate) fn to_planes(image: &Image) -> anyhow::Result<Vec<GrayImage>> {
    let (_, h, w) = image.dim();
    image
        .axis_iter(Axis(0))
        .map(|plane| {
            let raw: Vec<u8> = plane.iter().copied().collect();
            GrayImage::from_raw(w as u32, h as u32, raw)
                .ok_or_else(|| format_err!("image plane does not fit {}x{}", h, w))
        })
        .collect()
}

/// Stack single-channel planes of equal size back into a `(C, H, W)` image.
pub(crate) fn from_planes(planes: &[GrayImage]) -> anyhow::Result<Image> {
    let (w, h) = planes
        .first()
        .map(|plane| plane.dimensions())
        .ok_or_else(|| format_err!("cannot build an image without channels"))?;
    ensure!(
        planes.iter().all(|plane| plane.dimensions() == (w, h)),
        "image planes have different sizes"
    );

    let raw: Vec<u8> = planes
        .iter()
        .flat_map(|plane| plane.as_raw().iter().copied())
        .collect();
    Ok(Array3::from_shape_vec(
        (planes.len(), h as usize, w as usize),
        raw,
    )?)
}
