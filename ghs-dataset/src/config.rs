//! Dataset configuration format.

use crate::{common::*, translate::CoordRounding};

/// The dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Text file listing one image path per line.
    pub index_file: PathBuf,
    /// If set, relative image paths are resolved against this directory.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    /// Optional class names file. The GHS pictogram classes are used if unset.
    #[serde(default)]
    pub classes_file: Option<PathBuf>,
    /// If set, iteration produces batches of this size.
    #[serde(default)]
    pub batch_size: Option<NonZeroUsize>,
    /// Produce evaluation samples instead of training samples.
    #[serde(default)]
    pub test: bool,
    /// Decode images as RGB. Grayscale is used otherwise.
    #[serde(default = "default_color")]
    pub color: bool,
    /// Snapping of translated box corners to the pixel grid.
    #[serde(default)]
    pub rounding: CoordRounding,
    /// Resize options. Images keep their decoded size if unset.
    #[serde(default)]
    pub transform: Option<TransformConfig>,
}

/// Resize options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    pub min_size: NonZeroUsize,
    pub max_size: NonZeroUsize,
}

impl DatasetConfig {
    /// A configuration with defaults for everything except the index file.
    pub fn new(index_file: impl Into<PathBuf>) -> Self {
        Self {
            index_file: index_file.into(),
            root_dir: None,
            classes_file: None,
            batch_size: None,
            test: false,
            color: default_color(),
            rounding: CoordRounding::default(),
            transform: None,
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}

fn default_color() -> bool {
    true
}
