pub mod product;

pub use product::{Product, ProductType, RentalTerms};
