use super::{Rect, TLBR};
use crate::{common::*, HW};

/// Axis-aligned affine map `y' = y * sy + ty`, `x' = x * sx + tx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    /// The map that carries `src` onto `tgt`.
    pub fn from_rects<R>(src: &R, tgt: &R) -> Self
    where
        R: Rect<Type = T>,
    {
        let sy = tgt.h() / src.h();
        let sx = tgt.w() / src.w();
        let ty = tgt.t() - src.t() * sy;
        let tx = tgt.l() - src.l() * sx;

        Self { sy, sx, ty, tx }
    }

    /// Stretch an image of `src_size` to exactly `tgt_size`.
    pub fn from_sizes_exact(src_size: &HW<T>, tgt_size: &HW<T>) -> Result<Self> {
        let zero = T::zero();
        ensure!(
            src_size.h() > zero && src_size.w() > zero,
            "source size must be positive"
        );
        let src = TLBR::try_from_tlhw([zero, zero, src_size.h(), src_size.w()])?;
        let tgt = TLBR::try_from_tlhw([zero, zero, tgt_size.h(), tgt_size.w()])?;
        Ok(Self::from_rects(&src, &tgt))
    }
}

impl<T> Mul<&TLBR<T>> for &Transform<T>
where
    T: Copy + Num + PartialOrd,
{
    type Output = TLBR<T>;

    fn mul(self, rhs: &TLBR<T>) -> Self::Output {
        rhs.transform(self)
    }
}
