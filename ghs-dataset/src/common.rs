//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context as _};
pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use ndarray::{Array3, Axis};
pub use noisy_float::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{
    fmt::Debug,
    fs,
    io,
    num::NonZeroUsize,
    ops::Range,
    path::{Path, PathBuf},
};
