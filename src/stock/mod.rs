//! Supplier availability listing.

pub mod parser;

pub use parser::StockParser;
