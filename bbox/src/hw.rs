use crate::common::*;

/// A non-negative `(height, width)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HW<T> {
    h: T,
    w: T,
}

impl<T> HW<T>
where
    T: Unsigned + Copy,
{
    /// Build a size from unsigned sides, which are never negative.
    pub fn from_unsigned_hw(hw: [T; 2]) -> Self {
        let [h, w] = hw;
        Self { h, w }
    }
}

impl<T> HW<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn try_from_hw(hw: [T; 2]) -> Result<Self> {
        let [h, w] = hw;
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "height and width parameters must be non-negative"
        );
        Ok(Self { h, w })
    }

    pub fn area(&self) -> T {
        self.h * self.w
    }

    pub fn h(&self) -> T {
        self.h
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn hw(&self) -> [T; 2] {
        [self.h, self.w]
    }

    /// Convert both sides with `f`, which must map non-negative values to
    /// non-negative values.
    pub fn map_monotonic<U, F>(&self, f: F) -> HW<U>
    where
        F: Fn(T) -> U,
    {
        HW {
            h: f(self.h),
            w: f(self.w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn size_area() {
        let size = HW::try_from_hw([3.0, 2.0]).unwrap();
        let area: f64 = size.area();
        assert_abs_diff_eq!(area, 6.0);
    }

    #[test]
    fn reject_negative_size() {
        assert!(HW::try_from_hw([-1, 2]).is_err());
    }

    #[test]
    fn cast_pixel_size() {
        let size = HW::from_unsigned_hw([480usize, 640]);
        let size = size.map_monotonic(|side| side as f64);
        assert_eq!(size.hw(), [480.0, 640.0]);
    }
}
