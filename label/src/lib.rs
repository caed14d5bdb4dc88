//! Bounding boxes tagged with an object class.

use bbox::Rect;

/// A rectangle annotated with a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label<R, C>
where
    R: Rect,
{
    pub rect: R,
    pub class: C,
}

impl<R, C> Label<R, C>
where
    R: Rect,
{
    pub fn new(rect: R, class: C) -> Self {
        Self { rect, class }
    }

    /// Replace the rectangle, keeping the class.
    pub fn map_rect<S, F>(self, f: F) -> Label<S, C>
    where
        S: Rect,
        F: FnOnce(R) -> S,
    {
        let Self { rect, class } = self;
        Label {
            rect: f(rect),
            class,
        }
    }
}

/// Split a sequence of labels into parallel rectangle and class vectors.
pub fn unzip_labels<R, C, I>(labels: I) -> (Vec<R>, Vec<C>)
where
    R: Rect,
    I: IntoIterator<Item = Label<R, C>>,
{
    labels
        .into_iter()
        .map(|Label { rect, class }| (rect, class))
        .unzip()
}
