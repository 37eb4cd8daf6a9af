//! Milight bridge command encoding.
//!
//! This crate contains the pure part of the bridge control: the wire protocol encoder,
//! easing curves and RGB to bridge color conversion. Nothing here performs I/O.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub use errors::{Error, Result};

pub mod color;
pub mod ease;
pub mod errors;
pub mod proto;
pub mod time;
