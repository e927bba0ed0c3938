//! Visibility-culled slide for swipe groups.
//!
//! ## Usage
//!
//! Ask a slide whether it should render under its group's culling policy and
//! where the host should place it.

use glissade_core::State;

use crate::swipe_group::SwipeGroup;

/// Placement the host applies to a slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlidePlacement {
    /// Slide size along the travel axis, in pixels.
    pub main_axis_size: f32,
    /// Whether the travel axis is vertical.
    pub vertical: bool,
    /// Translation along the travel axis, in pixels.
    pub translate: f32,
}

/// State machine for a single slide in a [`SwipeGroup`].
///
/// A slide owns nothing beyond a parent-assigned translation and a one-shot
/// mounted flag; everything else is derived from the group.
pub struct SwipeItemController {
    index: usize,
    offset: f32,
    mounted: bool,
}

impl SwipeItemController {
    /// Registers a new slide with `group` and returns its shared handle.
    pub fn attach(group: &mut SwipeGroup) -> State<SwipeItemController> {
        let state = State::new(SwipeItemController {
            index: 0,
            offset: 0.0,
            mounted: false,
        });
        let index = group.register(state.downgrade());
        state.with_mut(|item| item.index = index);
        state
    }

    /// Index assigned by the owning group.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parent-assigned translation along the travel axis; zero until the
    /// parent moves the slide during wrap-around.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Assigns the translation used during wrap-around moves.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Marks the initial mount pass as complete.
    ///
    /// Lazy rendering waits for every slide to mount so the group's count is
    /// exact before the neighbor window applies.
    pub fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    /// Whether the initial mount pass completed.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the slide should render under the group's culling policy.
    ///
    /// Always true unless the group enables lazy rendering; then false until
    /// the slide has mounted, and thereafter true only for the active index
    /// and its two immediate neighbors, wrapping around at the ends.
    pub fn should_render(&self, group: &SwipeGroup) -> bool {
        if !group.lazy_render() {
            return true;
        }
        if !self.mounted {
            return false;
        }
        in_neighbor_window(self.index, group.active_index(), group.len())
    }

    /// Placement for the host to apply.
    pub fn placement(&self, group: &SwipeGroup) -> SlidePlacement {
        SlidePlacement {
            main_axis_size: group.item_size(),
            vertical: group.vertical(),
            translate: self.offset,
        }
    }
}

/// Whether `index` falls inside the wrap-around window around `active`.
fn in_neighbor_window(index: usize, active: usize, count: usize) -> bool {
    if count == 0 {
        return false;
    }
    let last = count - 1;
    let prev = if active == 0 { last } else { active - 1 };
    let next = if active == last { 0 } else { active + 1 };
    index == active || index == prev || index == next
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::swipe_group::SwipeGroupArgs;

    fn lazy_group_of(count: usize) -> (SwipeGroup, Vec<State<SwipeItemController>>) {
        let mut group = SwipeGroup::new(SwipeGroupArgs::default().lazy_render(true));
        let items = (0..count)
            .map(|_| SwipeItemController::attach(&mut group))
            .collect();
        (group, items)
    }

    fn rendered_indices(group: &SwipeGroup, items: &[State<SwipeItemController>]) -> Vec<usize> {
        items
            .iter()
            .filter(|item| item.with(|slide| slide.should_render(group)))
            .map(|item| item.with(SwipeItemController::index))
            .collect()
    }

    #[test]
    fn test_renders_everything_without_lazy_render() {
        let mut group = SwipeGroup::default();
        let item = SwipeItemController::attach(&mut group);
        assert!(item.with(|slide| slide.should_render(&group)));
    }

    #[test]
    fn test_lazy_render_waits_for_mount_pass() {
        let (group, items) = lazy_group_of(2);

        assert!(!items[0].with(|slide| slide.should_render(&group)));
        items[0].with_mut(SwipeItemController::mark_mounted);
        assert!(items[0].with(|slide| slide.should_render(&group)));
        assert!(items[0].with(SwipeItemController::is_mounted));
    }

    #[test]
    fn test_neighbor_window_culls_distant_slides() {
        let (mut group, items) = lazy_group_of(5);
        for item in &items {
            item.with_mut(SwipeItemController::mark_mounted);
        }

        group.set_active(2);
        assert_eq!(rendered_indices(&group, &items), vec![1, 2, 3]);
    }

    #[test]
    fn test_neighbor_window_wraps_at_the_ends() {
        let (mut group, items) = lazy_group_of(5);
        for item in &items {
            item.with_mut(SwipeItemController::mark_mounted);
        }

        group.set_active(0);
        assert_eq!(rendered_indices(&group, &items), vec![0, 1, 4]);

        group.set_active(4);
        assert_eq!(rendered_indices(&group, &items), vec![0, 3, 4]);
    }

    #[test]
    fn test_small_groups_render_all_mounted_slides() {
        let (group, items) = lazy_group_of(2);
        for item in &items {
            item.with_mut(SwipeItemController::mark_mounted);
        }
        assert_eq!(rendered_indices(&group, &items), vec![0, 1]);
    }

    #[test]
    fn test_placement_carries_axis_size_and_translate() {
        let mut group = SwipeGroup::new(
            SwipeGroupArgs::default()
                .vertical(true)
                .item_size(320.0),
        );
        let item = SwipeItemController::attach(&mut group);

        item.with_mut(|slide| slide.set_offset(-320.0));
        let placement = item.with(|slide| slide.placement(&group));
        assert_eq!(
            placement,
            SlidePlacement {
                main_axis_size: 320.0,
                vertical: true,
                translate: -320.0,
            }
        );
        assert_eq!(item.with(SwipeItemController::offset), -320.0);
    }
}
