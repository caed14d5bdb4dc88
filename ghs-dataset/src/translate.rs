//! Conversion from normalized center boxes to pixel corner boxes.

use crate::common::*;
use bbox::{CyCxHW, Rect, HW, TLBR};

/// Box in absolute pixel units, stored as `(y_min, x_min, y_max, x_max)`.
pub type PixelBox = TLBR<i64>;

/// How fractional pixel coordinates are snapped to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordRounding {
    /// Round half away from zero.
    Round,
    /// Truncate toward zero. Tiny boxes may collapse to zero extent.
    Truncate,
}

impl Default for CoordRounding {
    fn default() -> Self {
        Self::Round
    }
}

impl CoordRounding {
    pub fn apply(self, value: R64) -> i64 {
        let value = value.raw();
        match self {
            Self::Round => value.round() as i64,
            Self::Truncate => value.trunc() as i64,
        }
    }
}

/// Translate a normalized `(cx, cy, w, h)` box into pixel corners of an image
/// of `image_size`.
///
/// Inputs outside `[0, 1]` are not clamped, but corners must fit in `i64`.
pub fn translate_bbox(
    image_size: &HW<usize>,
    bbox: &CyCxHW<R64>,
    rounding: CoordRounding,
) -> anyhow::Result<PixelBox> {
    let size = image_size.map_monotonic(|side| side as f64);
    let bbox = CyCxHW::try_from_cycxhw(bbox.cycxhw().map(|value| value.raw()))?;
    let corners = bbox.denormalize_with(&size, |value| value);

    let pixel_range = i64::MIN as f64..i64::MAX as f64;
    ensure!(
        corners.tlbr().iter().all(|value| pixel_range.contains(value)),
        "box {:?} exceeds the pixel range of a {}x{} image",
        bbox.cxcywh(),
        image_size.h(),
        image_size.w()
    );

    Ok(corners.map_monotonic(|value| rounding.apply(r64(value))))
}
