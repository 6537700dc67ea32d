//! # redlite Core
//!
//! Core types for redlite: the error taxonomy, the closed set of value
//! kinds, the physical key codec and the transaction view traits every
//! storage binding implements.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main `redlite` crate instead.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod keys;
pub mod kind;
pub mod storage;

pub use error::{Error, Result};
pub use kind::ValueKind;
pub use storage::{ReadView, WriteView};
