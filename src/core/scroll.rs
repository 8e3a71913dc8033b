//! Scroll physics shared by the tab strip and both pagers.
//!
//! [`SmoothScroll`] is an exponential ease-out: every frame the remaining
//! distance to the target shrinks by a fixed fraction, so motion starts fast
//! and visibly decelerates.  [`PagedScrollView`] layers paging on top of it
//! and reports the same notifications a native paging scroll view would
//! (did-scroll, did-end-decelerating, did-end-scrolling-animation).

use std::time::Duration;

/// Frame length the damping factor is calibrated against.
const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

/// Below this distance (in cells) the motion snaps onto its target.
const SNAP_DISTANCE: f64 = 0.05;

/// Release velocity (cells per second) above which a drag flicks to the
/// neighbouring page instead of snapping to the nearest one.
pub const FLICK_VELOCITY: f64 = 25.0;

/// Tolerance for "already resting on a page boundary".
const PAGE_EPSILON: f64 = 1e-6;

// ───────────────────────────────────────── smooth scroll ─────

/// Position animator with exponential ease-out.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Presented position.
    position: f64,
    /// Where the motion is heading.
    target: f64,
    /// Damping: `remaining *= (1 - speed)` per reference frame.
    /// Higher speed = faster settle.  Good range: 0.2–0.4.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Move instantly, cancelling any motion in flight.
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance by `dt` and return the new position.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        if !self.is_animating() {
            return self.position;
        }
        let frames = dt.as_secs_f64() / REFERENCE_FRAME_SECS;
        let keep = (1.0 - self.speed).powf(frames);
        self.position = self.target + (self.position - self.target) * keep;
        if (self.position - self.target).abs() < SNAP_DISTANCE {
            self.position = self.target;
        }
        self.position
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True until the position has landed exactly on the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }

    /// Rescale position and target, e.g. after a viewport resize.
    pub fn rescale(&mut self, ratio: f64) {
        self.position *= ratio;
        self.target *= ratio;
    }
}

// ───────────────────────────────────────── paged scroll view ─

/// What the scroll view is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A finger (mouse button) is down and moving the content.
    Dragging,
    /// Released with motion left; gliding onto a page boundary.
    Decelerating,
    /// Programmatic, animated scroll-to-page.
    Animating,
}

/// Notifications produced while the content moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollNotice {
    DidScroll,
    DidEndDecelerating,
    DidEndScrollingAnimation,
}

/// Horizontally paged scroll container with no bounce.
#[derive(Debug, Clone)]
pub struct PagedScrollView {
    offset: f64,
    page_width: f64,
    page_count: usize,
    /// Offset at the moment the current drag started.
    drag_origin: f64,
    phase: ScrollPhase,
    motion: SmoothScroll,
}

impl PagedScrollView {
    pub fn new(page_width: f64, page_count: usize) -> Self {
        Self {
            offset: 0.0,
            page_width: page_width.max(0.0),
            page_count,
            drag_origin: 0.0,
            phase: ScrollPhase::Idle,
            motion: SmoothScroll::new(0.25),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Largest reachable offset (content width minus one viewport).
    pub fn max_offset(&self) -> f64 {
        self.page_count.saturating_sub(1) as f64 * self.page_width
    }

    /// Page whose left edge is at or before `offset` (truncating division).
    pub fn page_at(&self, offset: f64) -> usize {
        if self.page_width <= 0.0 || self.page_count == 0 {
            return 0;
        }
        let page = (offset / self.page_width + PAGE_EPSILON).floor().max(0.0) as usize;
        page.min(self.page_count - 1)
    }

    /// Page currently resting under the left edge of the viewport.
    pub fn current_page(&self) -> usize {
        self.page_at(self.offset)
    }

    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
            self.motion.jump_to(max);
        }
    }

    /// Resize the viewport; offsets scale so the same page stays in view.
    pub fn set_page_width(&mut self, page_width: f64) {
        let page_width = page_width.max(0.0);
        if page_width == self.page_width {
            return;
        }
        if self.page_width > 0.0 {
            let ratio = page_width / self.page_width;
            self.offset *= ratio;
            self.drag_origin *= ratio;
            self.motion.rescale(ratio);
        }
        self.page_width = page_width;
    }

    /// Start tracking a drag from the current offset.  Callers land any
    /// glide first with [`PagedScrollView::finish_motion`].
    pub fn begin_drag(&mut self) {
        self.drag_origin = self.offset;
        self.motion.jump_to(self.offset);
        self.phase = ScrollPhase::Dragging;
    }

    /// Offset the active drag started from.
    pub fn drag_origin(&self) -> f64 {
        self.drag_origin
    }

    /// Move the content during a drag.  A single drag never travels more
    /// than one page away from its origin.  Returns `true` when the offset
    /// actually changed.
    pub fn drag_to(&mut self, offset: f64) -> bool {
        if self.phase != ScrollPhase::Dragging {
            return false;
        }
        let lo = (self.drag_origin - self.page_width).max(0.0);
        let hi = (self.drag_origin + self.page_width).min(self.max_offset()).max(lo);
        self.set_offset(offset.clamp(lo, hi))
    }

    /// Release the drag.  `velocity` is in cells per second, positive when
    /// the offset was increasing.  Returns `true` when the content will
    /// keep gliding (deceleration), `false` when it is already at rest.
    pub fn end_drag(&mut self, velocity: f64) -> bool {
        if self.phase != ScrollPhase::Dragging {
            return false;
        }
        if self.page_width <= 0.0 || self.page_count == 0 {
            self.phase = ScrollPhase::Idle;
            return false;
        }

        let raw = self.offset / self.page_width;
        let resting = if velocity >= FLICK_VELOCITY {
            raw.ceil()
        } else if velocity <= -FLICK_VELOCITY {
            raw.floor()
        } else {
            raw.round()
        };
        let origin_page = (self.drag_origin / self.page_width).round();
        let last_page = (self.page_count - 1) as f64;
        let resting = resting
            .clamp(origin_page - 1.0, origin_page + 1.0)
            .clamp(0.0, last_page);
        let rest_offset = resting * self.page_width;

        if (rest_offset - self.offset).abs() < PAGE_EPSILON {
            self.offset = rest_offset;
            self.phase = ScrollPhase::Idle;
            false
        } else {
            self.motion.jump_to(self.offset);
            self.motion.set_target(rest_offset);
            self.phase = ScrollPhase::Decelerating;
            true
        }
    }

    /// Scroll so `page` is left-aligned.  Animated scrolls report their end
    /// through [`ScrollNotice::DidEndScrollingAnimation`]; an unanimated
    /// scroll lands immediately and returns whether the offset changed.
    pub fn scroll_to_page(&mut self, page: usize, animated: bool) -> bool {
        let target = (page as f64 * self.page_width).min(self.max_offset());
        if animated {
            if target == self.offset {
                self.phase = ScrollPhase::Idle;
                return false;
            }
            self.motion.jump_to(self.offset);
            self.motion.set_target(target);
            self.phase = ScrollPhase::Animating;
            false
        } else {
            self.phase = ScrollPhase::Idle;
            self.motion.jump_to(target);
            self.set_offset(target)
        }
    }

    /// Advance any glide or animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<ScrollNotice> {
        let mut notices = Vec::new();
        let end = match self.phase {
            ScrollPhase::Decelerating => ScrollNotice::DidEndDecelerating,
            ScrollPhase::Animating => ScrollNotice::DidEndScrollingAnimation,
            ScrollPhase::Idle | ScrollPhase::Dragging => return notices,
        };
        let next = self.motion.tick(dt);
        if self.set_offset(next) {
            notices.push(ScrollNotice::DidScroll);
        }
        if !self.motion.is_animating() {
            self.phase = ScrollPhase::Idle;
            notices.push(end);
        }
        notices
    }

    /// Land any glide or animation on its target at once.  Produces the
    /// same notices the remaining ticks would have.
    pub fn finish_motion(&mut self) -> Vec<ScrollNotice> {
        let mut notices = Vec::new();
        let end = match self.phase {
            ScrollPhase::Decelerating => ScrollNotice::DidEndDecelerating,
            ScrollPhase::Animating => ScrollNotice::DidEndScrollingAnimation,
            ScrollPhase::Idle | ScrollPhase::Dragging => return notices,
        };
        let target = self.motion.target();
        self.motion.jump_to(target);
        if self.set_offset(target) {
            notices.push(ScrollNotice::DidScroll);
        }
        self.phase = ScrollPhase::Idle;
        notices.push(end);
        notices
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_idle(view: &mut PagedScrollView) -> Vec<ScrollNotice> {
        let mut all = Vec::new();
        for _ in 0..1000 {
            all.extend(view.tick(FRAME));
            if view.phase() == ScrollPhase::Idle {
                break;
            }
        }
        all
    }

    #[test]
    fn smooth_scroll_decelerates_onto_target() {
        let mut s = SmoothScroll::new(0.3);
        s.set_target(100.0);
        let first = s.tick(FRAME);
        let second = s.tick(FRAME);
        assert!(first > 0.0 && first < 100.0);
        // Each step covers less ground than the one before.
        assert!(second - first < first);
        for _ in 0..200 {
            s.tick(FRAME);
        }
        assert_eq!(s.position(), 100.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut s = SmoothScroll::new(0.3);
        s.set_target(10.0);
        assert_eq!(s.tick(Duration::ZERO), 0.0);
    }

    #[test]
    fn drag_is_limited_to_one_page_from_origin() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.begin_drag();
        view.drag_to(100.0);
        assert_eq!(view.offset(), 40.0);
        view.drag_to(-30.0);
        assert_eq!(view.offset(), 0.0);
    }

    #[test]
    fn release_without_velocity_snaps_to_nearest_page() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.begin_drag();
        view.drag_to(16.0);
        assert!(view.end_drag(0.0));
        let notices = run_until_idle(&mut view);
        assert_eq!(view.offset(), 0.0);
        assert_eq!(notices.last(), Some(&ScrollNotice::DidEndDecelerating));
    }

    #[test]
    fn flick_moves_to_neighbouring_page() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.begin_drag();
        view.drag_to(8.0);
        assert!(view.end_drag(FLICK_VELOCITY * 2.0));
        run_until_idle(&mut view);
        assert_eq!(view.offset(), 40.0);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn release_on_boundary_needs_no_deceleration() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.begin_drag();
        view.drag_to(40.0);
        assert!(!view.end_drag(0.0));
        assert_eq!(view.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn animated_scroll_reports_animation_end() {
        let mut view = PagedScrollView::new(40.0, 5);
        assert!(!view.scroll_to_page(3, true));
        assert_eq!(view.phase(), ScrollPhase::Animating);
        let notices = run_until_idle(&mut view);
        assert!(notices.contains(&ScrollNotice::DidScroll));
        assert_eq!(notices.last(), Some(&ScrollNotice::DidEndScrollingAnimation));
        assert_eq!(view.offset(), 120.0);
    }

    #[test]
    fn finishing_a_glide_lands_on_the_page_boundary() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.begin_drag();
        view.drag_to(28.0);
        assert!(view.end_drag(0.0));
        view.tick(FRAME);
        assert!(view.offset() > 28.0 && view.offset() < 40.0);

        let notices = view.finish_motion();
        assert_eq!(
            notices,
            vec![ScrollNotice::DidScroll, ScrollNotice::DidEndDecelerating]
        );
        assert_eq!(view.offset(), 40.0);
        assert_eq!(view.phase(), ScrollPhase::Idle);
        assert!(view.finish_motion().is_empty());
    }

    #[test]
    fn finishing_an_animation_reports_its_end() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.scroll_to_page(2, true);
        view.tick(FRAME);
        let notices = view.finish_motion();
        assert_eq!(notices.last(), Some(&ScrollNotice::DidEndScrollingAnimation));
        assert_eq!(view.offset(), 80.0);
    }

    #[test]
    fn unanimated_scroll_lands_immediately() {
        let mut view = PagedScrollView::new(40.0, 5);
        assert!(view.scroll_to_page(2, false));
        assert_eq!(view.offset(), 80.0);
        assert!(view.tick(FRAME).is_empty());
    }

    #[test]
    fn resize_keeps_the_same_page_in_view() {
        let mut view = PagedScrollView::new(40.0, 5);
        view.scroll_to_page(2, false);
        view.set_page_width(60.0);
        assert_eq!(view.offset(), 120.0);
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn empty_view_is_inert() {
        let mut view = PagedScrollView::new(40.0, 0);
        view.begin_drag();
        assert!(!view.drag_to(10.0));
        assert!(!view.end_drag(100.0));
        assert_eq!(view.page_at(500.0), 0);
    }
}
