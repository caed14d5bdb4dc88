//! Geometric sample transforms applied after decoding.

use crate::{
    common::*,
    image_io::{from_planes, image_size, to_planes, Image},
    translate::{CoordRounding, PixelBox},
};
use bbox::{Transform, HW};
use image::imageops::{self, FilterType};

/// A decoded sample handed to a [`SampleTransform`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformInput {
    pub image: Image,
    pub bboxes: Vec<PixelBox>,
    pub labels: Vec<usize>,
}

/// The result of a [`SampleTransform`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub image: Image,
    pub bboxes: Vec<PixelBox>,
    pub labels: Vec<usize>,
    /// Transformed height over original height.
    pub scale: R64,
    /// The `(height, width)` of the image before the transform.
    pub original_size: HW<usize>,
}

/// Resizes or augments a decoded sample.
pub trait SampleTransform
where
    Self: Debug + Send + Sync,
{
    fn apply(&self, input: TransformInput) -> anyhow::Result<TransformOutput>;
}

/// Isotropic resize bounded by a shorter-side target and a longer-side limit.
///
/// The shorter side is scaled to `min_size` unless that pushes the longer side
/// past `max_size`, in which case the longer side is scaled to `max_size`.
#[derive(Debug, Clone)]
pub struct ResizeTransform {
    min_size: NonZeroUsize,
    max_size: NonZeroUsize,
    rounding: CoordRounding,
}

impl ResizeTransform {
    pub fn new(
        min_size: NonZeroUsize,
        max_size: NonZeroUsize,
        rounding: CoordRounding,
    ) -> anyhow::Result<Self> {
        ensure!(
            min_size <= max_size,
            "min_size ({}) must not exceed max_size ({})",
            min_size,
            max_size
        );
        Ok(Self {
            min_size,
            max_size,
            rounding,
        })
    }

    /// The output size for an input of `size`.
    pub fn target_size(&self, size: &HW<usize>) -> anyhow::Result<HW<usize>> {
        let [h, w] = size.hw();
        ensure!(h > 0 && w > 0, "cannot resize an empty image");

        let short = h.min(w) as f64;
        let long = h.max(w) as f64;
        let ratio = (self.min_size.get() as f64 / short).min(self.max_size.get() as f64 / long);

        let resize = |side: usize| ((side as f64 * ratio).round() as usize).max(1);
        Ok(HW::from_unsigned_hw([resize(h), resize(w)]))
    }
}

impl SampleTransform for ResizeTransform {
    fn apply(&self, input: TransformInput) -> anyhow::Result<TransformOutput> {
        let TransformInput {
            image,
            bboxes,
            labels,
        } = input;
        ensure!(
            bboxes.len() == labels.len(),
            "got {} boxes but {} labels",
            bboxes.len(),
            labels.len()
        );

        let original_size = image_size(&image);
        let target_size = self.target_size(&original_size)?;

        let image = if target_size == original_size {
            image
        } else {
            resize_image(&image, &target_size)?
        };

        let to_f64 = |side: usize| side as f64;
        let transform = Transform::from_sizes_exact(
            &original_size.map_monotonic(to_f64),
            &target_size.map_monotonic(to_f64),
        )?;
        let rounding = self.rounding;
        let bboxes: Vec<_> = bboxes
            .iter()
            .map(|bbox| {
                let bbox = bbox.map_monotonic(|value| value as f64);
                (&transform * &bbox).map_monotonic(|value| rounding.apply(r64(value)))
            })
            .collect();

        let scale = r64(target_size.h() as f64 / original_size.h() as f64);

        Ok(TransformOutput {
            image,
            bboxes,
            labels,
            scale,
            original_size,
        })
    }
}

/// Resample every channel of `image` to `size` with a triangle filter.
pub fn resize_image(image: &Image, size: &HW<usize>) -> anyhow::Result<Image> {
    let [h, w] = size.hw();
    let planes: Vec<_> = to_planes(image)?
        .iter()
        .map(|plane| imageops::resize(plane, w as u32, h as u32, FilterType::Triangle))
        .collect();
    from_planes(&planes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bbox::{Rect, TLBR};

    fn transform(min_size: usize, max_size: usize) -> ResizeTransform {
        ResizeTransform::new(
            NonZeroUsize::new(min_size).unwrap(),
            NonZeroUsize::new(max_size).unwrap(),
            CoordRounding::Round,
        )
        .unwrap()
    }

    fn input(h: usize, w: usize, bboxes: Vec<[i64; 4]>) -> TransformInput {
        let labels = (0..bboxes.len()).collect();
        TransformInput {
            image: Image::from_elem((3, h, w), 128),
            bboxes: bboxes
                .into_iter()
                .map(|tlbr| TLBR::try_from_tlbr(tlbr).unwrap())
                .collect(),
            labels,
        }
    }

    #[test]
    fn shorter_side_reaches_min_size() {
        let output = transform(50, 1000)
            .apply(input(100, 200, vec![[10, 20, 60, 120]]))
            .unwrap();
        assert_eq!(output.image.dim(), (3, 50, 100));
        assert_eq!(output.bboxes[0].tlbr(), [5, 10, 30, 60]);
        assert_eq!(output.labels, vec![0]);
        assert_eq!(output.scale, r64(0.5));
        assert_eq!(output.original_size.hw(), [100, 200]);
    }

    #[test]
    fn longer_side_capped_by_max_size() {
        let output = transform(200, 600)
            .apply(input(100, 400, vec![[0, 0, 100, 400]]))
            .unwrap();
        assert_eq!(output.image.dim(), (3, 150, 600));
        assert_eq!(output.bboxes[0].tlbr(), [0, 0, 150, 600]);
        assert_eq!(output.scale, r64(1.5));
    }

    #[test]
    fn sides_are_rounded() {
        let resize = transform(5, 100);
        let size = resize.target_size(&HW::from_unsigned_hw([3, 7])).unwrap();
        assert_eq!(size.hw(), [5, 12]);

        let output = resize.apply(input(3, 7, vec![[0, 0, 3, 7]])).unwrap();
        assert_abs_diff_eq!(output.scale.raw(), 5.0 / 3.0, epsilon = 1e-9);
        assert_eq!(output.bboxes[0].tlbr(), [0, 0, 5, 12]);
    }

    #[test]
    fn matching_size_is_untouched() {
        let sample = input(64, 96, vec![[1, 2, 3, 4]]);
        let output = transform(64, 128).apply(sample.clone()).unwrap();
        assert_eq!(output.image, sample.image);
        assert_eq!(output.bboxes, sample.bboxes);
        assert_eq!(output.scale, r64(1.0));
    }

    #[test]
    fn empty_boxes_pass_through() {
        let output = transform(32, 64).apply(input(16, 16, vec![])).unwrap();
        assert!(output.bboxes.is_empty());
        assert!(output.labels.is_empty());
        assert_eq!(output.image.dim(), (3, 32, 32));
    }

    #[test]
    fn reject_inverted_limits() {
        assert!(ResizeTransform::new(
            NonZeroUsize::new(600).unwrap(),
            NonZeroUsize::new(300).unwrap(),
            CoordRounding::Round,
        )
        .is_err());
    }

    #[test]
    fn reject_mismatched_labels() {
        let mut sample = input(8, 8, vec![[0, 0, 1, 1]]);
        sample.labels.clear();
        assert!(transform(8, 8).apply(sample).is_err());
    }
}
