pub mod error;

pub use error::{PodupError, Result};
