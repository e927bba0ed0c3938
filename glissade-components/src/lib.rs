//! Headless gesture components for swipe-driven list UIs.
//!
//! # Usage
//!
//! The host rendering layer forwards normalized input (drag deltas, taps,
//! measured widths) and applies the offsets the controllers answer with; the
//! crate owns the gesture decisions.
//!
//! # Example
//!
//! ```
//! use glissade_components::swipe_cell::{SwipeCell, SwipeCellArgs, SwipePosition, SwipeSide};
//!
//! let cell = SwipeCell::new(
//!     SwipeCellArgs::default()
//!         .left_width(Some(80.0))
//!         .name("inbox-row".to_string()),
//! );
//!
//! cell.open(SwipeSide::Left);
//! assert_eq!(cell.offset(), 80.0);
//!
//! cell.close();
//! assert_eq!(cell.position(), SwipePosition::Closed);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod swipe_cell;
pub mod swipe_group;
pub mod swipe_item;
