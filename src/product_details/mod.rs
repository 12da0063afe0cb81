mod product;
mod specs;

pub use product::ProductDetails;
pub use specs::{Specification, SpecificationTable};
