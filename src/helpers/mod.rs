//! Helper functions shared by the loader, generator, and templates

mod date;
mod url;

pub use date::*;
pub use url::*;
