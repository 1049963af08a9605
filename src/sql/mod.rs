//! Safe SQL builder: identifiers from descriptors only, values as parameters.

mod builder;
pub mod page;
pub mod params;
pub use builder::*;
pub use page::*;
pub use params::*;
