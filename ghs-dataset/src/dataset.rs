use crate::{
    annotation::{annotation_path, read_pixel_annotations},
    classes::ClassTable,
    common::*,
    config::DatasetConfig,
    error::{Error, Result},
    image_io::{image_size, FileImageReader, ImageReader},
    iter::{Batches, Iter, Records},
    record::{DataRecord, EvalSample, Sample},
    transform::{ResizeTransform, SampleTransform, TransformInput, TransformOutput},
    translate::CoordRounding,
};

/// Loading options that do not involve collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetOptions {
    /// If set, [GhsDataset::iter] produces batches of this size.
    pub batch_size: Option<NonZeroUsize>,
    /// Produce [EvalSample]s instead of [Sample]s.
    pub test: bool,
    /// Decode images as RGB instead of grayscale.
    pub color: bool,
    pub rounding: CoordRounding,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            batch_size: None,
            test: false,
            color: true,
            rounding: CoordRounding::default(),
        }
    }
}

impl From<&DatasetConfig> for DatasetOptions {
    fn from(config: &DatasetConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            test: config.test,
            color: config.color,
            rounding: config.rounding,
        }
    }
}

/// The GHS pictogram detection dataset.
///
/// Samples are decoded from disk on every access. The dataset holds no
/// mutable state; iterators keep their own cursor.
#[derive(Debug)]
pub struct GhsDataset {
    ids: Vec<PathBuf>,
    classes: ClassTable,
    options: DatasetOptions,
    reader: Box<dyn ImageReader>,
    transform: Option<Box<dyn SampleTransform>>,
}

impl GhsDataset {
    /// Build a dataset over `ids` with the file system image reader, the GHS
    /// class table and no transform.
    pub fn new<I, P>(ids: I, options: DatasetOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            classes: ClassTable::default(),
            options,
            reader: Box::new(FileImageReader),
            transform: None,
        }
    }

    /// Build a dataset from a configuration.
    pub fn open(config: &DatasetConfig) -> anyhow::Result<Self> {
        let DatasetConfig {
            ref index_file,
            ref root_dir,
            ref classes_file,
            rounding,
            transform,
            ..
        } = *config;

        let ids = load_index_file(index_file)?;
        let ids: Vec<PathBuf> = match root_dir {
            Some(root_dir) => ids
                .into_iter()
                .map(|path| root_dir.join(path))
                .collect(),
            None => ids,
        };

        let classes = match classes_file {
            Some(path) => ClassTable::load(path)?,
            None => ClassTable::default(),
        };

        let mut dataset = Self::new(ids, config.into()).with_classes(classes);
        if let Some(transform) = transform {
            dataset = dataset.with_transform(ResizeTransform::new(
                transform.min_size,
                transform.max_size,
                rounding,
            )?);
        }

        info!(
            "loaded {} samples from '{}'",
            dataset.len(),
            index_file.display()
        );

        Ok(dataset)
    }

    pub fn with_classes(self, classes: ClassTable) -> Self {
        Self { classes, ..self }
    }

    pub fn with_image_reader<R>(self, reader: R) -> Self
    where
        R: ImageReader + 'static,
    {
        Self {
            reader: Box::new(reader),
            ..self
        }
    }

    pub fn with_transform<T>(self, transform: T) -> Self
    where
        T: SampleTransform + 'static,
    {
        Self {
            transform: Some(Box::new(transform)),
            ..self
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Image paths in dataset order.
    pub fn ids(&self) -> &[PathBuf] {
        &self.ids
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.classes.name(label)
    }

    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }

    /// Load the sample at `index`.
    pub fn get(&self, index: usize) -> Result<DataRecord> {
        let path = self.ids.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        self.load_path(path)
    }

    /// Load the sample of an arbitrary image path.
    pub fn load_path(&self, image_path: impl AsRef<Path>) -> Result<DataRecord> {
        let image_path = image_path.as_ref();
        let DatasetOptions {
            test,
            color,
            rounding,
            ..
        } = self.options;

        let image = self
            .reader
            .read_image(image_path, color)
            .map_err(|source| Error::ImageDecode {
                path: image_path.to_owned(),
                source,
            })?;
        let size = image_size(&image);

        let (bboxes, labels) =
            read_pixel_annotations(annotation_path(image_path), &size, rounding)?;

        let TransformOutput {
            image,
            bboxes,
            labels,
            scale,
            original_size,
        } = match &self.transform {
            Some(transform) => transform
                .apply(TransformInput {
                    image,
                    bboxes,
                    labels,
                })
                .and_then(|output| {
                    ensure!(
                        output.bboxes.len() == output.labels.len(),
                        "transform returned {} boxes but {} labels",
                        output.bboxes.len(),
                        output.labels.len()
                    );
                    Ok(output)
                })
                .map_err(|source| Error::Transform {
                    path: image_path.to_owned(),
                    source,
                })?,
            None => TransformOutput {
                image,
                bboxes,
                labels,
                scale: r64(1.0),
                original_size: size,
            },
        };

        debug!(
            "loaded '{}' with shape {:?} and {} boxes",
            image_path.display(),
            image.dim(),
            bboxes.len()
        );

        let record = if test {
            let difficult = vec![false; bboxes.len()];
            DataRecord::Eval(EvalSample {
                image,
                original_size,
                bboxes,
                labels,
                difficult,
            })
        } else {
            DataRecord::Train(Sample {
                image,
                bboxes,
                labels,
                scale,
            })
        };

        Ok(record)
    }

    /// Iterate over samples in order.
    pub fn records(&self) -> Records<'_> {
        Records::new(self)
    }

    /// Iterate over batches of at most `batch_size` samples in order. The last
    /// batch is shorter when the sample count is not a multiple of
    /// `batch_size`.
    pub fn batches(&self, batch_size: NonZeroUsize) -> Batches<'_> {
        Batches::new(self, batch_size)
    }

    /// Iterate over batches if a batch size is configured, or over samples
    /// otherwise.
    pub fn iter(&self) -> Iter<'_> {
        match self.options.batch_size {
            Some(batch_size) => Iter::Batches(self.batches(batch_size)),
            None => Iter::Records(self.records()),
        }
    }
}

impl<'a> IntoIterator for &'a GhsDataset {
    type Item = <Iter<'a> as Iterator>::Item;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read an index file with one image path per line.
///
/// Trailing whitespace is stripped and blank lines are skipped.
pub fn load_index_file(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;

    let ids = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();
    Ok(ids)
}
