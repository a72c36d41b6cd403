pub mod display;
pub mod product;

pub use display::write_product_list;
pub use product::{Product, ProductList};
