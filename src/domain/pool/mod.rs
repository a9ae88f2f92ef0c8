//! Pool snapshot aggregate: the normalized input every chart computation reads.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
