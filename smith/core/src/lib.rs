#![no_std]
#![forbid(unsafe_code)]

//! # Smith Core
//!
//! Vocabulary shared by the printer state machine, the print engine and the
//! host ports: the closed set of [`Event`]s the printer reacts to, their
//! numeric [`Signal`]s, and the [`StateId`] hierarchy.

#[cfg(feature = "std")]
extern crate std;

pub mod events;
pub mod states;

pub use events::*;
pub use states::*;

/// Smith core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Deepest nesting of the state hierarchy, counting the top state.
pub const MAX_STATE_DEPTH: usize = 4;
