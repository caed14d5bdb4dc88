pub use anyhow::{ensure, Result};
pub use num_traits::{Float, Num, Unsigned};
pub use std::ops::Mul;
