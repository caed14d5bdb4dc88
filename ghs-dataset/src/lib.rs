//! Loader for the GHS hazard pictogram detection dataset.
//!
//! Images are listed in an index file. Each image has a sibling `.txt`
//! annotation file with one `label center_x center_y width height` line per
//! object. Loading a sample decodes the image, converts the normalized boxes
//! to pixel corners and optionally resizes the sample.

mod common;

pub mod annotation;
pub use annotation::*;
pub mod classes;
pub use classes::*;
pub mod config;
pub use config::*;
pub mod dataset;
pub use dataset::*;
pub mod error;
pub use error::{Error, Result};
pub mod image_io;
pub use image_io::*;
pub mod iter;
pub use iter::*;
pub mod record;
pub use record::*;
pub mod transform;
pub use transform::*;
pub mod translate;
pub use translate::*;
