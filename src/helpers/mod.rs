//! Helper functions for date formatting and URL generation

mod date;
mod url;

pub use date::*;
pub use url::*;
