//! Books API
//!
//! Aggregates the NYT bestseller lists and the Google Books catalog behind a
//! small REST interface.

pub mod modules;

pub use modules::*;
