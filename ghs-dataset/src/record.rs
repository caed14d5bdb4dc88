use crate::{common::*, image_io::Image, translate::PixelBox};
use bbox::HW;

/// A training sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: Image,
    pub bboxes: Vec<PixelBox>,
    pub labels: Vec<usize>,
    /// Resize factor applied by the transform, `1.0` without one.
    pub scale: R64,
}

/// An evaluation sample.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalSample {
    pub image: Image,
    /// The `(height, width)` of the decoded image before any transform.
    pub original_size: HW<usize>,
    pub bboxes: Vec<PixelBox>,
    pub labels: Vec<usize>,
    /// Per-box difficulty. Annotation files carry no such field, so every
    /// entry is `false`.
    pub difficult: Vec<bool>,
}

/// A loaded sample, shaped by the dataset mode.
#[derive(Debug, Clone, PartialEq)]
pub enum DataRecord {
    Train(Sample),
    Eval(EvalSample),
}

impl DataRecord {
    pub fn image(&self) -> &Image {
        match self {
            Self::Train(sample) => &sample.image,
            Self::Eval(sample) => &sample.image,
        }
    }

    pub fn bboxes(&self) -> &[PixelBox] {
        match self {
            Self::Train(sample) => &sample.bboxes,
            Self::Eval(sample) => &sample.bboxes,
        }
    }

    pub fn labels(&self) -> &[usize] {
        match self {
            Self::Train(sample) => &sample.labels,
            Self::Eval(sample) => &sample.labels,
        }
    }

    pub fn into_train(self) -> Option<Sample> {
        match self {
            Self::Train(sample) => Some(sample),
            Self::Eval(_) => None,
        }
    }

    pub fn into_eval(self) -> Option<EvalSample> {
        match self {
            Self::Train(_) => None,
            Self::Eval(sample) => Some(sample),
        }
    }

    /// Drop mode-specific fields, keeping `(image, bboxes, labels)`.
    pub fn into_parts(self) -> (Image, Vec<PixelBox>, Vec<usize>) {
        match self {
            Self::Train(Sample {
                image,
                bboxes,
                labels,
                ..
            }) => (image, bboxes, labels),
            Self::Eval(EvalSample {
                image,
                bboxes,
                labels,
                ..
            }) => (image, bboxes, labels),
        }
    }
}

/// Parallel image, box and label sequences of consecutive samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    pub images: Vec<Image>,
    pub bboxes: Vec<Vec<PixelBox>>,
    pub labels: Vec<Vec<usize>>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn push(&mut self, record: DataRecord) {
        let (image, bboxes, labels) = record.into_parts();
        self.images.push(image);
        self.bboxes.push(bboxes);
        self.labels.push(labels);
    }
}

impl FromIterator<DataRecord> for Batch {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = DataRecord>,
    {
        let mut batch = Batch::default();
        iter.into_iter().for_each(|record| batch.push(record));
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::TLBR;

    fn train(value: u8, n_boxes: usize) -> DataRecord {
        DataRecord::Train(Sample {
            image: Image::from_elem((1, 2, 2), value),
            bboxes: vec![TLBR::try_from_tlbr([0, 0, 1, 1]).unwrap(); n_boxes],
            labels: vec![value as usize; n_boxes],
            scale: r64(1.0),
        })
    }

    #[test]
    fn batch_keeps_parallel_order() {
        let batch: Batch = vec![train(1, 2), train(2, 0), train(3, 1)]
            .into_iter()
            .collect();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.images[1][[0, 0, 0]], 2);
        assert_eq!(batch.bboxes.iter().map(Vec::len).collect::<Vec<_>>(), [2, 0, 1]);
        assert_eq!(batch.labels, vec![vec![1, 1], vec![], vec![3]]);
    }

    #[test]
    fn mode_accessors() {
        let record = train(5, 1);
        assert_eq!(record.labels(), &[5]);
        assert!(record.clone().into_eval().is_none());
        assert_eq!(record.into_train().map(|sample| sample.scale), Some(r64(1.0)));
    }
}
