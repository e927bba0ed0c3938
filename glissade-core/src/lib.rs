//! Runtime primitives shared by the glissade gesture components.
//!
//! ## Usage
//!
//! Wrap a controller in [`State`] for shared access, hand out [`WeakState`]
//! back-references to collaborators, and carry event sinks and interception
//! hooks as [`CallbackWith`] props.
#![deny(missing_docs, clippy::unwrap_used)]

mod callback;
mod state;

pub use callback::CallbackWith;
pub use state::{State, WeakState};
