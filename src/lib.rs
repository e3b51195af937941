pub mod index;
mod label;
pub mod options;
pub mod scan;

#[cfg(feature = "pulldown")]
pub mod adapters;

pub use index::*;
pub use options::*;
pub use scan::*;
