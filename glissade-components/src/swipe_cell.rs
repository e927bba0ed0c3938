//! Swipe-to-reveal cell gesture controller.
//!
//! ## Usage
//!
//! Drive a list row that reveals hidden left/right action panels when dragged
//! horizontally, snaps open or closed on release, and gates every close
//! through an optional interception hook.

use std::sync::{Arc, Weak};

use derive_setters::Setters;
use glissade_core::{CallbackWith, State};
use tracing::{debug, trace};

/// Snap defaults for [`SwipeCell`].
pub struct SwipeCellDefaults;

impl SwipeCellDefaults {
    /// Fraction of a panel's resolved width a drag must cross for the cell to
    /// snap open instead of closing on release.
    pub const OPEN_THRESHOLD: f32 = 0.15;
}

/// Resting position of a swipe cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SwipePosition {
    /// The cell body covers both panels.
    #[default]
    Closed,
    /// The left panel is revealed.
    Left,
    /// The right panel is revealed.
    Right,
}

/// Side of the cell that can be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeSide {
    /// The left panel.
    Left,
    /// The right panel.
    Right,
}

/// Tap target identified by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapTarget {
    /// The plain cell body.
    Cell,
    /// The revealed left panel.
    LeftPanel,
    /// The revealed right panel.
    RightPanel,
}

/// Where a close request originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseSource {
    /// A tap on the cell body while a panel was open.
    Cell,
    /// A tap on the revealed left panel.
    Left,
    /// A tap on the revealed right panel.
    Right,
}

/// Payload emitted when the cell commits an open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenEvent {
    /// Identifier configured through [`SwipeCellArgs::name`].
    pub name: String,
    /// Side that opened.
    pub position: SwipeSide,
    /// Click context for tap-through opens; empty otherwise.
    pub detail: String,
}

/// Payload emitted when the cell commits a close.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseEvent {
    /// Identifier configured through [`SwipeCellArgs::name`].
    pub name: String,
    /// Close reason; `None` for a direct close with no originating tap.
    pub position: Option<CloseSource>,
}

/// Verdict returned by the close-interception hook.
///
/// Cancellation is a normal, expected outcome, not a fault; a hook that wants
/// to decide later takes a [`CloseToken`] from the context and returns
/// [`CloseDecision::Defer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDecision {
    /// Commit the close.
    Proceed,
    /// Keep the cell open; offset and position stay untouched.
    Cancel,
    /// Resolve later through a [`CloseToken`] taken from the context.
    Defer,
}

impl From<bool> for CloseDecision {
    fn from(proceed: bool) -> Self {
        if proceed { Self::Proceed } else { Self::Cancel }
    }
}

/// Configuration arguments for [`SwipeCell`].
#[derive(Clone, PartialEq, Setters)]
pub struct SwipeCellArgs {
    /// Width of the left panel in pixels; `None` resolves to the measured
    /// width pushed through [`SwipeCell::sync_panel_widths`].
    pub left_width: Option<f32>,
    /// Width of the right panel in pixels; `None` resolves to the measured
    /// width pushed through [`SwipeCell::sync_panel_widths`].
    pub right_width: Option<f32>,
    /// Suppresses all drag handling when true.
    pub disabled: bool,
    /// Opaque identifier echoed in emitted event payloads.
    pub name: String,
    /// Fraction of a panel's resolved width a drag must cross to snap open.
    pub open_threshold: f32,
    /// Hook consulted before any close of an open cell commits.
    #[setters(skip)]
    pub before_close: Option<CallbackWith<CloseContext, CloseDecision>>,
    /// Invoked when the cell commits an open.
    #[setters(skip)]
    pub on_open: CallbackWith<OpenEvent>,
    /// Invoked when the cell commits a close.
    #[setters(skip)]
    pub on_close: CallbackWith<CloseEvent>,
    /// Invoked for every tap outside an active drag session.
    #[setters(skip)]
    pub on_tap: CallbackWith<TapTarget>,
}

impl Default for SwipeCellArgs {
    fn default() -> Self {
        Self {
            left_width: None,
            right_width: None,
            disabled: false,
            name: String::new(),
            open_threshold: SwipeCellDefaults::OPEN_THRESHOLD,
            before_close: None,
            on_open: CallbackWith::default(),
            on_close: CallbackWith::default(),
            on_tap: CallbackWith::default(),
        }
    }
}

impl SwipeCellArgs {
    /// Set the close-interception hook.
    pub fn before_close<F>(mut self, before_close: F) -> Self
    where
        F: Fn(CloseContext) -> CloseDecision + Send + Sync + 'static,
    {
        self.before_close = Some(CallbackWith::new(before_close));
        self
    }

    /// Set the close-interception hook using a shared callback.
    pub fn before_close_shared(
        mut self,
        before_close: impl Into<CallbackWith<CloseContext, CloseDecision>>,
    ) -> Self {
        self.before_close = Some(before_close.into());
        self
    }

    /// Set the open event sink.
    pub fn on_open<F>(mut self, on_open: F) -> Self
    where
        F: Fn(OpenEvent) + Send + Sync + 'static,
    {
        self.on_open = CallbackWith::new(on_open);
        self
    }

    /// Set the open event sink using a shared callback.
    pub fn on_open_shared(mut self, on_open: impl Into<CallbackWith<OpenEvent>>) -> Self {
        self.on_open = on_open.into();
        self
    }

    /// Set the close event sink.
    pub fn on_close<F>(mut self, on_close: F) -> Self
    where
        F: Fn(CloseEvent) + Send + Sync + 'static,
    {
        self.on_close = CallbackWith::new(on_close);
        self
    }

    /// Set the close event sink using a shared callback.
    pub fn on_close_shared(mut self, on_close: impl Into<CallbackWith<CloseEvent>>) -> Self {
        self.on_close = on_close.into();
        self
    }

    /// Set the tap event sink.
    pub fn on_tap<F>(mut self, on_tap: F) -> Self
    where
        F: Fn(TapTarget) + Send + Sync + 'static,
    {
        self.on_tap = CallbackWith::new(on_tap);
        self
    }

    /// Set the tap event sink using a shared callback.
    pub fn on_tap_shared(mut self, on_tap: impl Into<CallbackWith<TapTarget>>) -> Self {
        self.on_tap = on_tap.into();
        self
    }
}

/// Resting state a drag session settles into when it ends.
enum DragRest {
    /// The drag crossed a panel's threshold; commit an open toward that side.
    Open(SwipeSide),
    /// The cell never left `Closed`; the offset was reset without an event.
    Settled,
    /// An open cell was dragged back below the threshold; the close must pass
    /// the interception gate.
    CloseGated,
}

/// State machine for a swipe cell.
///
/// Holds the authoritative offset/position pair. Methods here are pure state
/// transitions; hooks and event sinks are invoked by [`SwipeCell`] after the
/// lock has been released.
pub struct SwipeCellController {
    offset: f32,
    position: SwipePosition,
    dragging: bool,
    drag_origin: f32,
    left_width: Option<f32>,
    right_width: Option<f32>,
    measured_left: f32,
    measured_right: f32,
    disabled: bool,
    open_threshold: f32,
    next_close_attempt: u64,
    pending_close: Option<u64>,
}

impl SwipeCellController {
    fn new(args: &SwipeCellArgs) -> Self {
        Self {
            offset: 0.0,
            position: SwipePosition::Closed,
            dragging: false,
            drag_origin: 0.0,
            left_width: args.left_width,
            right_width: args.right_width,
            measured_left: 0.0,
            measured_right: 0.0,
            disabled: args.disabled,
            open_threshold: args.open_threshold.clamp(0.0, 1.0),
            next_close_attempt: 0,
            pending_close: None,
        }
    }

    /// Current horizontal translation of the cell body in pixels.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Resting position of the cell.
    pub fn position(&self) -> SwipePosition {
        self.position
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether a deferred close decision is outstanding.
    pub fn is_close_pending(&self) -> bool {
        self.pending_close.is_some()
    }

    /// Effective left panel width used for clamping and threshold math.
    pub fn resolved_left_width(&self) -> f32 {
        sanitize_width(self.left_width.unwrap_or(self.measured_left))
    }

    /// Effective right panel width used for clamping and threshold math.
    pub fn resolved_right_width(&self) -> f32 {
        sanitize_width(self.right_width.unwrap_or(self.measured_right))
    }

    fn sync_measured_widths(&mut self, left: f32, right: f32) {
        self.measured_left = sanitize_width(left);
        self.measured_right = sanitize_width(right);
    }

    fn begin_drag(&mut self) {
        if self.disabled {
            return;
        }
        self.dragging = true;
        self.drag_origin = self.offset;
    }

    fn drag_to(&mut self, dx: f32, dy: f32) {
        if !self.dragging {
            return;
        }
        // Vertical intent: let the containing list scroll instead.
        if dy.abs() > dx.abs() {
            return;
        }
        self.offset = clamp_offset(
            self.drag_origin + dx,
            self.resolved_left_width(),
            self.resolved_right_width(),
        );
    }

    fn end_drag(&mut self) -> Option<DragRest> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        let snap = snap_position(
            self.offset,
            self.resolved_left_width(),
            self.resolved_right_width(),
            self.open_threshold,
        );
        trace!(offset = self.offset, snap = ?snap, "drag released");
        let rest = match snap {
            SwipePosition::Left => DragRest::Open(SwipeSide::Left),
            SwipePosition::Right => DragRest::Open(SwipeSide::Right),
            SwipePosition::Closed => {
                if self.position == SwipePosition::Closed {
                    self.offset = 0.0;
                    DragRest::Settled
                } else {
                    DragRest::CloseGated
                }
            }
        };
        Some(rest)
    }

    fn commit_open(&mut self, side: SwipeSide) -> bool {
        let width = match side {
            SwipeSide::Left => self.resolved_left_width(),
            SwipeSide::Right => self.resolved_right_width(),
        };
        if width <= 0.0 {
            return false;
        }
        match side {
            SwipeSide::Left => {
                self.offset = width;
                self.position = SwipePosition::Left;
            }
            SwipeSide::Right => {
                self.offset = -width;
                self.position = SwipePosition::Right;
            }
        }
        true
    }

    fn commit_close(&mut self) -> bool {
        if self.position == SwipePosition::Closed {
            return false;
        }
        self.offset = 0.0;
        self.position = SwipePosition::Closed;
        self.pending_close = None;
        true
    }

    fn begin_close_attempt(&mut self) -> u64 {
        self.next_close_attempt += 1;
        let generation = self.next_close_attempt;
        self.pending_close = Some(generation);
        generation
    }

    fn clear_close_attempt(&mut self, generation: u64) {
        if self.pending_close == Some(generation) {
            self.pending_close = None;
        }
    }
}

/// Clamp a candidate drag offset to the revealable range.
fn clamp_offset(candidate: f32, left_width: f32, right_width: f32) -> f32 {
    candidate.clamp(-right_width, left_width)
}

/// Decide the resting position for an offset at drag end.
///
/// The threshold is a fraction of the relevant panel's full width, not of the
/// total drag distance: a drag that barely moves a wide panel still opens it,
/// while the same absolute drag on a narrow panel may not.
fn snap_position(offset: f32, left_width: f32, right_width: f32, threshold: f32) -> SwipePosition {
    if offset > 0.0 {
        if left_width > 0.0 && offset >= left_width * threshold {
            SwipePosition::Left
        } else {
            SwipePosition::Closed
        }
    } else if offset < 0.0 {
        if right_width > 0.0 && -offset >= right_width * threshold {
            SwipePosition::Right
        } else {
            SwipePosition::Closed
        }
    } else {
        SwipePosition::Closed
    }
}

fn sanitize_width(width: f32) -> f32 {
    width.max(0.0)
}

struct SwipeCellInner {
    state: State<SwipeCellController>,
    name: String,
    before_close: Option<CallbackWith<CloseContext, CloseDecision>>,
    on_open: CallbackWith<OpenEvent>,
    on_close: CallbackWith<CloseEvent>,
    on_tap: CallbackWith<TapTarget>,
}

fn commit_open(inner: &SwipeCellInner, side: SwipeSide, detail: String) {
    let committed = inner.state.with_mut(|cell| cell.commit_open(side));
    if !committed {
        trace!(side = ?side, "open toward zero-width panel ignored");
        return;
    }
    inner.on_open.call(OpenEvent {
        name: inner.name.clone(),
        position: side,
        detail,
    });
}

fn finish_close(inner: &SwipeCellInner, reason: Option<CloseSource>) {
    let closed = inner.state.with_mut(SwipeCellController::commit_close);
    if closed {
        inner.on_close.call(CloseEvent {
            name: inner.name.clone(),
            position: reason,
        });
    }
}

/// A swipe-to-reveal cell instance.
///
/// The host integrates by forwarding normalized drag deltas, host-identified
/// taps, and measured panel widths; the cell answers with its authoritative
/// offset/position pair and emits open/close events.
///
/// ## Examples
///
/// ```
/// use glissade_components::swipe_cell::{SwipeCell, SwipeCellArgs, SwipePosition};
///
/// let cell = SwipeCell::new(
///     SwipeCellArgs::default()
///         .left_width(Some(100.0))
///         .right_width(Some(100.0)),
/// );
///
/// cell.on_drag_start();
/// cell.on_drag_move(50.0, 0.0);
/// cell.on_drag_end();
/// assert_eq!(cell.position(), SwipePosition::Left);
/// assert_eq!(cell.offset(), 100.0);
///
/// cell.close();
/// assert_eq!(cell.position(), SwipePosition::Closed);
/// ```
pub struct SwipeCell {
    inner: Arc<SwipeCellInner>,
}

impl SwipeCell {
    /// Creates a cell from configuration arguments.
    pub fn new(args: SwipeCellArgs) -> Self {
        let controller = SwipeCellController::new(&args);
        Self {
            inner: Arc::new(SwipeCellInner {
                state: State::new(controller),
                name: args.name,
                before_close: args.before_close,
                on_open: args.on_open,
                on_close: args.on_close,
                on_tap: args.on_tap,
            }),
        }
    }

    /// Current horizontal translation of the cell body in pixels.
    pub fn offset(&self) -> f32 {
        self.inner.state.with(SwipeCellController::offset)
    }

    /// Current resting position.
    pub fn position(&self) -> SwipePosition {
        self.inner.state.with(SwipeCellController::position)
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.inner.state.with(SwipeCellController::is_dragging)
    }

    /// Whether a deferred close decision is outstanding.
    pub fn is_close_pending(&self) -> bool {
        self.inner.state.with(SwipeCellController::is_close_pending)
    }

    /// Identifier echoed in emitted event payloads.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Shared read access to the underlying controller state.
    pub fn controller(&self) -> State<SwipeCellController> {
        self.inner.state.clone()
    }

    /// Non-owning handle for imperative open/close from collaborators.
    pub fn handle(&self) -> SwipeCellHandle {
        SwipeCellHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Push measured panel widths from the host's layout pass.
    ///
    /// Configured widths always take precedence; for `None`-configured panels
    /// the latest measurement wins. A panel that measures zero is effectively
    /// non-openable on that side.
    pub fn sync_panel_widths(&self, left: f32, right: f32) {
        self.inner
            .state
            .with_mut(|cell| cell.sync_measured_widths(left, right));
    }

    /// Begin a drag session, recording the current offset as the drag origin.
    ///
    /// Does nothing when the cell is disabled.
    pub fn on_drag_start(&self) {
        self.inner.state.with_mut(SwipeCellController::begin_drag);
    }

    /// Continuous drag update. `dx`/`dy` are cumulative deltas from the drag
    /// start; moves with a dominant vertical component are ignored so the
    /// containing list can scroll.
    pub fn on_drag_move(&self, dx: f32, dy: f32) {
        self.inner.state.with_mut(|cell| cell.drag_to(dx, dy));
    }

    /// End the drag session and snap to the resting state.
    pub fn on_drag_end(&self) {
        let rest = self.inner.state.with_mut(SwipeCellController::end_drag);
        match rest {
            None | Some(DragRest::Settled) => {}
            Some(DragRest::Open(side)) => commit_open(&self.inner, side, String::new()),
            Some(DragRest::CloseGated) => self.request_close(None),
        }
    }

    /// Open toward a side, re-committing and re-emitting even if already open.
    pub fn open(&self, side: SwipeSide) {
        commit_open(&self.inner, side, String::new());
    }

    /// Open toward a side, carrying click context in the event payload.
    pub fn open_with_detail(&self, side: SwipeSide, detail: impl Into<String>) {
        commit_open(&self.inner, side, detail.into());
    }

    /// Request a close through the interception gate.
    ///
    /// A redundant close of an already-closed cell is a guaranteed no-op: no
    /// event is emitted and the hook is not invoked.
    pub fn close(&self) {
        self.request_close(None);
    }

    /// Route a host-identified tap.
    ///
    /// Taps during an active drag session are ignored. While a panel is open,
    /// a tap on the cell body or on that panel requests a close with the
    /// matching reason; while closed, taps perform no close call at all.
    pub fn on_tap(&self, tap: TapTarget) {
        if self.is_dragging() {
            return;
        }
        self.inner.on_tap.call(tap);
        let position = self.position();
        if position == SwipePosition::Closed {
            return;
        }
        let reason = match (tap, position) {
            (TapTarget::Cell, _) => CloseSource::Cell,
            (TapTarget::LeftPanel, SwipePosition::Left) => CloseSource::Left,
            (TapTarget::RightPanel, SwipePosition::Right) => CloseSource::Right,
            _ => {
                trace!(tap = ?tap, position = ?position, "tap on hidden panel ignored");
                return;
            }
        };
        self.request_close(Some(reason));
    }

    fn request_close(&self, reason: Option<CloseSource>) {
        if self.position() == SwipePosition::Closed {
            return;
        }
        let Some(hook) = self.inner.before_close.clone() else {
            finish_close(&self.inner, reason);
            return;
        };
        let generation = self
            .inner
            .state
            .with_mut(SwipeCellController::begin_close_attempt);
        let context = CloseContext {
            position: reason,
            name: self.inner.name.clone(),
            inner: Arc::downgrade(&self.inner),
            generation,
        };
        match hook.call(context) {
            CloseDecision::Proceed => {
                self.inner
                    .state
                    .with_mut(|cell| cell.clear_close_attempt(generation));
                finish_close(&self.inner, reason);
            }
            CloseDecision::Cancel => {
                debug!(reason = ?reason, "close cancelled by hook");
                self.inner
                    .state
                    .with_mut(|cell| cell.clear_close_attempt(generation));
            }
            CloseDecision::Defer => {
                trace!(reason = ?reason, "close deferred");
            }
        }
    }
}

/// Context handed to the close-interception hook.
#[derive(Clone)]
pub struct CloseContext {
    position: Option<CloseSource>,
    name: String,
    inner: Weak<SwipeCellInner>,
    generation: u64,
}

impl CloseContext {
    /// Close reason: the tapped region, or `None` for a direct close.
    pub fn position(&self) -> Option<CloseSource> {
        self.position
    }

    /// Identifier of the cell being closed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-owning handle to the cell for imperative re-entry.
    pub fn handle(&self) -> SwipeCellHandle {
        SwipeCellHandle {
            inner: self.inner.clone(),
        }
    }

    /// Take a token to resolve this close attempt later.
    ///
    /// Pair with [`CloseDecision::Defer`]; the cell stays open, with the
    /// attempt marked pending, until the token resolves or is dropped.
    pub fn defer(&self) -> CloseToken {
        CloseToken {
            inner: self.inner.clone(),
            generation: self.generation,
            position: self.position,
            resolved: false,
        }
    }
}

/// One-shot resolution handle for a deferred close decision.
///
/// Each close attempt gets its own token; outcomes are applied in resolution
/// order, and the last token to resolve with [`CloseToken::proceed`] wins as
/// long as the cell is still open. Dropping an unresolved token cancels its
/// attempt, so a hook that gives up never wedges the cell in a pending state.
pub struct CloseToken {
    inner: Weak<SwipeCellInner>,
    generation: u64,
    position: Option<CloseSource>,
    resolved: bool,
}

impl CloseToken {
    /// Commit the deferred close if the cell is still open.
    pub fn proceed(mut self) {
        self.resolved = true;
        if let Some(inner) = self.inner.upgrade() {
            inner
                .state
                .with_mut(|cell| cell.clear_close_attempt(self.generation));
            finish_close(&inner, self.position);
        }
    }

    /// Keep the cell open. Only this attempt's pending mark is cleared;
    /// newer attempts are unaffected.
    pub fn cancel(mut self) {
        self.resolved = true;
        if let Some(inner) = self.inner.upgrade() {
            inner
                .state
                .with_mut(|cell| cell.clear_close_attempt(self.generation));
        }
    }
}

impl Drop for CloseToken {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        if let Some(inner) = self.inner.upgrade() {
            debug!("deferred close token dropped unresolved; treating as cancel");
            inner
                .state
                .with_mut(|cell| cell.clear_close_attempt(self.generation));
        }
    }
}

/// Non-owning programmatic handle to a [`SwipeCell`].
///
/// Handed out through [`SwipeCell::handle`] and [`CloseContext::handle`]. All
/// methods become no-ops once the owning cell has been dropped, so late
/// hook resolutions never mutate a destroyed instance.
#[derive(Clone)]
pub struct SwipeCellHandle {
    inner: Weak<SwipeCellInner>,
}

impl SwipeCellHandle {
    /// Open toward a side; emits the open event.
    pub fn open(&self, side: SwipeSide) {
        if let Some(inner) = self.inner.upgrade() {
            commit_open(&inner, side, String::new());
        }
    }

    /// Close directly, bypassing the interception gate; emits the close
    /// event. This is the imperative re-entry path for hooks that close the
    /// cell themselves.
    pub fn close(&self) {
        if let Some(inner) = self.inner.upgrade() {
            finish_close(&inner, None);
        }
    }

    /// Current offset, or `None` once the cell is gone.
    pub fn offset(&self) -> Option<f32> {
        self.inner
            .upgrade()
            .map(|inner| inner.state.with(SwipeCellController::offset))
    }
}
