//! Record types shared by every analysis, plus the crate error types.

pub mod errors;
pub mod types;

pub use errors::{Error, Result, ResultExt, ValidationError};
pub use types::{Address, Dataset, Geo, JoinedPerson, Message, Person, RecordId};
