// crates/core/src/lib.rs
pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
