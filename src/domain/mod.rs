pub mod entity;
pub mod error;
pub mod validate;

pub use entity::{Company, Contact, Country};
pub use error::{Error, FieldFailure, Result};
