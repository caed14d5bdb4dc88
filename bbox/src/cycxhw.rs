use super::{Rect, HW, TLBR};
use crate::common::*;

/// Bounding box in CyCxHW format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CyCxHW<T> {
    pub(crate) cy: T,
    pub(crate) cx: T,
    pub(crate) h: T,
    pub(crate) w: T,
}

impl<T> CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn try_from_cycxhw(cycxhw: [T; 4]) -> Result<Self> {
        let [cy, cx, h, w] = cycxhw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "box height and width must be non-negative"
        );

        Ok(Self { cy, cx, h, w })
    }

    /// Build from the horizontal-first `[cx, cy, w, h]` order used by
    /// YOLO-style label files.
    pub fn try_from_cxcywh(cxcywh: [T; 4]) -> Result<Self> {
        let [cx, cy, w, h] = cxcywh;
        Self::try_from_cycxhw([cy, cx, h, w])
    }

    /// The `[cx, cy, w, h]` view of the box.
    pub fn cxcywh(&self) -> [T; 4] {
        [self.cx, self.cy, self.w, self.h]
    }
}

impl<T> CyCxHW<T>
where
    T: Float,
{
    /// Scale a box normalized to `[0, 1]` up to the pixel grid of `size` and
    /// convert it to corner form.
    ///
    /// Each corner is computed as `((2 * center ± extent) / 2) * side` and then
    /// passed through `round`, which must be monotonically non-decreasing.
    /// No clamping is performed.
    pub fn denormalize_with<U, F>(&self, size: &HW<T>, round: F) -> TLBR<U>
    where
        F: Fn(T) -> U,
    {
        let two = T::one() + T::one();
        let Self { cy, cx, h, w } = *self;
        let height = size.h();
        let width = size.w();

        TLBR {
            t: round(((two * cy - h) / two) * height),
            l: round(((two * cx - w) / two) * width),
            b: round(((two * cy + h) / two) * height),
            r: round(((two * cx + w) / two) * width),
        }
    }
}

impl<T> Rect for CyCxHW<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> T {
        let two = T::one() + T::one();
        self.cy - self.h / two
    }

    fn l(&self) -> T {
        let two = T::one() + T::one();
        self.cx - self.w / two
    }

    fn b(&self) -> T {
        let two = T::one() + T::one();
        self.cy + self.h / two
    }

    fn r(&self) -> T {
        let two = T::one() + T::one();
        self.cx + self.w / two
    }

    fn cy(&self) -> T {
        self.cy
    }

    fn cx(&self) -> T {
        self.cx
    }

    fn h(&self) -> T {
        self.h
    }

    fn w(&self) -> T {
        self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn horizontal_first_order() {
        let bbox = CyCxHW::try_from_cxcywh([0.5, 0.25, 0.2, 0.4]).unwrap();
        assert_eq!(bbox.cycxhw(), [0.25, 0.5, 0.4, 0.2]);
        assert_eq!(bbox.cxcywh(), [0.5, 0.25, 0.2, 0.4]);
    }

    #[test]
    fn reject_negative_extent() {
        assert!(CyCxHW::try_from_cxcywh([0.5, 0.5, -0.1, 0.2]).is_err());
        assert!(CyCxHW::try_from_cxcywh([0.5, 0.5, 0.1, -0.2]).is_err());
    }

    #[test]
    fn denormalize_full_frame() {
        let bbox = CyCxHW::try_from_cxcywh([0.5, 0.5, 1.0, 1.0]).unwrap();
        let size = HW::try_from_hw([100.0, 200.0]).unwrap();
        let tlbr = bbox.denormalize_with(&size, |v: f64| v.round() as i64);
        assert_eq!(tlbr.tlbr(), [0, 0, 100, 200]);
    }

    #[test]
    fn corners_agree_with_tlbr_conversion() {
        let bbox = CyCxHW::try_from_cycxhw([0.3, 0.6, 0.2, 0.4]).unwrap();
        let tlbr: TLBR<f64> = bbox.into();
        let size = HW::try_from_hw([1.0, 1.0]).unwrap();
        let denorm = bbox.denormalize_with(&size, |v| v);
        for (lhs, rhs) in tlbr.tlbr().iter().zip(denorm.tlbr().iter()) {
            assert_abs_diff_eq!(*lhs, *rhs, epsilon = 1e-12);
        }
    }
}
