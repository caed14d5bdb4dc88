//! Object class tables.

use crate::common::*;
use strum::{AsRefStr, Display, EnumCount, EnumIter, FromRepr, IntoEnumIterator as _};

/// The nine pictograms of the Globally Harmonized System, in label order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumCount, EnumIter, FromRepr,
)]
pub enum GhsClass {
    #[strum(serialize = "GHS01_Explosive")]
    Explosive,
    #[strum(serialize = "GHS02_Flammable")]
    Flammable,
    #[strum(serialize = "GHS03_Oxidizing")]
    Oxidizing,
    #[strum(serialize = "GHS04_CompressedGas")]
    CompressedGas,
    #[strum(serialize = "GHS05_Corrosive")]
    Corrosive,
    #[strum(serialize = "GHS06_Toxic")]
    Toxic,
    #[strum(serialize = "GHS07_Harmful")]
    Harmful,
    #[strum(serialize = "GHS08_HealthHazard")]
    HealthHazard,
    #[strum(serialize = "GHS09_EnvironmentalHazard")]
    EnvironmentalHazard,
}

impl GhsClass {
    /// The integer label used in annotation files.
    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Self> {
        Self::from_repr(id)
    }
}

/// Mapping from integer labels to class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTable {
    names: IndexSet<String>,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            names: GhsClass::iter().map(|class| class.to_string()).collect(),
        }
    }
}

impl ClassTable {
    pub fn new<I, S>(names: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        ensure!(!names.is_empty(), "no classes found");
        if let Some(name) = names.iter().duplicates().next() {
            bail!("duplicated class name '{}'", name);
        }
        Ok(Self {
            names: names.into_iter().collect(),
        })
    }

    /// Load a classes file with one class name per line.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read classes file '{}'", path.display()))?;
        let names = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty());
        Self::new(names).with_context(|| format!("invalid classes file '{}'", path.display()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get_index(id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}
