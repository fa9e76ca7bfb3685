//! Safe SQL builder: identifiers from entity metadata only, values as parameters.

mod builder;
pub use builder::*;
