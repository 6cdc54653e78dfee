//! errcode
//!
//! Registers new error codes in an enum-style error definition file: picks the next free code
//! in a service/module band and inserts the entry after the band's highest code.

pub mod cli;
pub mod config;
pub mod definition;
pub mod error;
pub mod store;
pub mod workflow;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{CodeLabel, Config};
    pub use crate::definition::{CodeEntry, Definitions, NewEntry, Patch, PatchError, Prefix, Suffix};
    pub use crate::store::DefinitionFile;
    pub use crate::workflow::Session;
}
