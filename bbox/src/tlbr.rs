use super::{CyCxHW, Rect};
use crate::{common::*, Transform};

/// Bounding box in TLBR format.
///
/// Holds `b >= t` and `r >= l` once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + PartialOrd,
{
    pub fn try_from_tlbr(tlbr: [T; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");
        Ok(Self { t, l, b, r })
    }

    /// Map each coordinate through `f`.
    ///
    /// `f` must be monotonically non-decreasing so that the corner ordering
    /// survives, which holds for rounding and truncation.
    pub fn map_monotonic<U, F>(&self, f: F) -> TLBR<U>
    where
        F: Fn(T) -> U,
    {
        let Self { t, l, b, r } = *self;
        TLBR {
            t: f(t),
            l: f(l),
            b: f(b),
            r: f(r),
        }
    }
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn try_from_tlhw(tlhw: [T; 4]) -> Result<Self> {
        let [t, l, h, w] = tlhw;
        Self::try_from_tlbr([t, l, t + h, l + w])
    }

    pub fn transform(&self, transform: &Transform<T>) -> Self {
        TLBR {
            t: self.t * transform.sy + transform.ty,
            l: self.l * transform.sx + transform.tx,
            b: self.b * transform.sy + transform.ty,
            r: self.r * transform.sx + transform.tx,
        }
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> T {
        self.t
    }

    fn l(&self) -> T {
        self.l
    }

    fn b(&self) -> T {
        self.b
    }

    fn r(&self) -> T {
        self.r
    }

    fn cy(&self) -> T {
        let two = T::one() + T::one();
        self.t + self.h() / two
    }

    fn cx(&self) -> T {
        let two = T::one() + T::one();
        self.l + self.w() / two
    }

    fn h(&self) -> T {
        self.b - self.t
    }

    fn w(&self) -> T {
        self.r - self.l
    }
}

impl<T> From<&CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: &CyCxHW<T>) -> Self {
        let two = T::one() + T::one();
        let CyCxHW { cy, cx, h, w } = *from;
        Self {
            t: cy - h / two,
            l: cx - w / two,
            b: cy + h / two,
            r: cx + w / two,
        }
    }
}

impl<T> From<CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: CyCxHW<T>) -> Self {
        Self::from(&from)
    }
}
