//! Value types for dimensional calculations

mod dimension;
mod quantity;

pub use dimension::{Dimension, OrderVector};
pub use quantity::{Quantity, ResolvedUnit};
