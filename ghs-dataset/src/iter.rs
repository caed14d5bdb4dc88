//! Sequential traversal over a [GhsDataset].

use crate::{
    common::*,
    dataset::GhsDataset,
    error::Result,
    record::{Batch, DataRecord},
};
use std::iter::FusedIterator;

/// Iterates over samples in dataset order.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    dataset: &'a GhsDataset,
    indices: Range<usize>,
}

impl<'a> Records<'a> {
    pub(crate) fn new(dataset: &'a GhsDataset) -> Self {
        Self {
            dataset,
            indices: 0..dataset.len(),
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<DataRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.dataset.get(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a> ExactSizeIterator for Records<'a> {}

impl<'a> FusedIterator for Records<'a> {}

/// Iterates over consecutive batches in dataset order.
///
/// Every batch holds `batch_size` samples except possibly the last one, which
/// holds the remainder. A failing sample fails the whole batch.
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    dataset: &'a GhsDataset,
    indices: Range<usize>,
    batch_size: NonZeroUsize,
}

impl<'a> Batches<'a> {
    pub(crate) fn new(dataset: &'a GhsDataset, batch_size: NonZeroUsize) -> Self {
        Self {
            dataset,
            indices: 0..dataset.len(),
            batch_size,
        }
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        let Range { start, end } = self.indices.clone();
        if start >= end {
            return None;
        }
        let stop = end.min(start.saturating_add(self.batch_size.get()));
        self.indices.start = stop;

        let batch = (start..stop)
            .map(|index| self.dataset.get(index))
            .collect::<Result<Vec<_>>>()
            .map(Batch::from_iter);
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.indices.len();
        let batch_size = self.batch_size.get();
        let count = len / batch_size + usize::from(len % batch_size != 0);
        (count, Some(count))
    }
}

impl<'a> ExactSizeIterator for Batches<'a> {}

impl<'a> FusedIterator for Batches<'a> {}

/// An item produced by [Iter].
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetItem {
    Record(DataRecord),
    Batch(Batch),
}

impl DatasetItem {
    pub fn into_record(self) -> Option<DataRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Batch(_) => None,
        }
    }

    pub fn into_batch(self) -> Option<Batch> {
        match self {
            Self::Record(_) => None,
            Self::Batch(batch) => Some(batch),
        }
    }
}

/// Iterates over records or batches, depending on the configured batch size.
#[derive(Debug, Clone)]
pub enum Iter<'a> {
    Records(Records<'a>),
    Batches(Batches<'a>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<DatasetItem>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Records(iter) => iter.next().map(|record| record.map(DatasetItem::Record)),
            Self::Batches(iter) => iter.next().map(|batch| batch.map(DatasetItem::Batch)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Records(iter) => iter.size_hint(),
            Self::Batches(iter) => iter.size_hint(),
        }
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}
