//! Registration group shared by swipeable slides.
//!
//! ## Usage
//!
//! A parent carousel registers each slide to assign indices and drives the
//! group's active index; slides read the group to decide visibility and
//! placement.

use derive_setters::Setters;
use glissade_core::{State, WeakState};
use smallvec::SmallVec;

use crate::swipe_item::SwipeItemController;

/// Configuration arguments for [`SwipeGroup`].
#[derive(Clone, PartialEq, Default, Setters)]
pub struct SwipeGroupArgs {
    /// Render only the active slide and its immediate neighbors once each
    /// slide has completed its initial mount pass.
    pub lazy_render: bool,
    /// Whether slides travel along the vertical axis.
    pub vertical: bool,
    /// Size of each slide along the travel axis, in pixels.
    pub item_size: f32,
}

/// Parent collection that assigns slide indices and owns the culling policy.
///
/// Registration is explicit: slides are appended in registration order and
/// keep their index for the life of the group. Entries are held weakly, so a
/// dropped slide simply stops resolving through [`SwipeGroup::item`].
pub struct SwipeGroup {
    lazy_render: bool,
    vertical: bool,
    item_size: f32,
    active_index: usize,
    items: SmallVec<[WeakState<SwipeItemController>; 4]>,
}

impl SwipeGroup {
    /// Creates an empty group.
    pub fn new(args: SwipeGroupArgs) -> Self {
        Self {
            lazy_render: args.lazy_render,
            vertical: args.vertical,
            item_size: args.item_size.max(0.0),
            active_index: 0,
            items: SmallVec::new(),
        }
    }

    /// Registers a slide and returns its assigned index.
    pub fn register(&mut self, item: WeakState<SwipeItemController>) -> usize {
        let index = self.items.len();
        self.items.push(item);
        index
    }

    /// Looks up a registered slide that is still alive.
    pub fn item(&self, index: usize) -> Option<State<SwipeItemController>> {
        self.items.get(index).and_then(WeakState::upgrade)
    }

    /// Number of registered slides.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no slide has been registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sets the active slide, clamped to the registered range.
    pub fn set_active(&mut self, index: usize) {
        self.active_index = index.min(self.items.len().saturating_sub(1));
    }

    /// Currently active slide index.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Whether lazy rendering is enabled.
    pub fn lazy_render(&self) -> bool {
        self.lazy_render
    }

    /// Whether slides travel along the vertical axis.
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Size of each slide along the travel axis, in pixels.
    pub fn item_size(&self) -> f32 {
        self.item_size
    }
}

impl Default for SwipeGroup {
    fn default() -> Self {
        Self::new(SwipeGroupArgs::default())
    }
}
