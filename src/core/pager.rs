//! Paged content container hosting one [`PageContent`] per page.
//!
//! The pager turns raw scroll movement into the synchronisation protocol:
//! while a drag is in flight every offset change becomes a
//! `(source, target, progress)` event, and the begin/end visibility
//! transitions of the two pages involved are driven explicitly so hosted
//! content always knows whether it is on screen.
//!
//! Per gesture: `Idle → Dragging → (Decelerating) → Idle`.  Programmatic
//! selection goes `Idle → Animating → Idle` with delegate events
//! suppressed through the coordinator's [`GestureScope`].

use std::ops::Range;
use std::time::Duration;

use super::error::{check_index, Result};
use super::page::{AppearanceEvent, PageContent, Transition, Visibility};
use super::scroll::{PagedScrollView, ScrollNotice, ScrollPhase};

// ───────────────────────────────────────── gesture scope ─────

/// Gesture-scoped state shared between the pager and its coordinator.
///
/// While suppressed, scrolling caused by a programmatic page change is not
/// reinterpreted as a user drag.  The next drag releases it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureScope {
    suppress_delegate_events: bool,
}

impl GestureScope {
    pub fn is_suppressed(&self) -> bool {
        self.suppress_delegate_events
    }

    pub fn suppress(&mut self) {
        self.suppress_delegate_events = true;
    }

    pub fn release(&mut self) {
        self.suppress_delegate_events = false;
    }
}

// ───────────────────────────────────────── events ────────────

/// How a scroll came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// A drag ended on a different page than it started on.
    Switched,
    /// A drag snapped back to the page it started on.
    NotSwitched,
    /// An animated [`ContentPager::set_current_index`] finished.
    Programmatic,
}

/// Produced by the pager, consumed by the coordinator in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    ScrollProgress {
        source: usize,
        target: usize,
        progress: f64,
    },
    Appearance {
        page: usize,
        event: AppearanceEvent,
    },
    ScrollSettled {
        index: usize,
        outcome: SettleOutcome,
    },
}

// ───────────────────────────────────────── pager ─────────────

struct PageHost {
    content: Box<dyn PageContent>,
    visibility: Visibility,
    /// Set the first time the page's slot is displayed.
    attached: bool,
}

/// Transition pair begun on the first move of a drag.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    from: usize,
    to: usize,
}

pub struct ContentPager {
    pages: Vec<PageHost>,
    view: PagedScrollView,
    current_index: usize,
    /// Page the user is dragging toward, not yet committed.
    potential_index: usize,
    /// Offset at drag start; direction and progress are measured from here.
    start_offset: f64,
    /// The per-gesture appearance transition has already begun.
    appearance_processed: bool,
    pending: Option<PendingTransition>,
}

impl ContentPager {
    /// The first page starts out visible.
    pub fn new(pages: Vec<Box<dyn PageContent>>, page_width: f64) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, content)| PageHost {
                content,
                visibility: if i == 0 {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                },
                attached: false,
            })
            .collect();
        Self {
            pages,
            view: PagedScrollView::new(page_width, count),
            current_index: 0,
            potential_index: 0,
            start_offset: 0.0,
            appearance_processed: false,
            pending: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn potential_index(&self) -> usize {
        self.potential_index
    }

    pub fn offset(&self) -> f64 {
        self.view.offset()
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    pub fn page_width(&self) -> f64 {
        self.view.page_width()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.view.phase()
    }

    pub fn visibility(&self, page: usize) -> Option<Visibility> {
        self.pages.get(page).map(|p| p.visibility)
    }

    pub fn is_attached(&self, page: usize) -> bool {
        self.pages.get(page).is_some_and(|p| p.attached)
    }

    /// Pages whose slots intersect the viewport at the current offset.
    pub fn visible_pages(&self) -> Range<usize> {
        let w = self.view.page_width();
        if w <= 0.0 || self.pages.is_empty() {
            return 0..0;
        }
        let offset = self.view.offset();
        let first = (offset / w).floor().max(0.0) as usize;
        let end = ((offset + w) / w).ceil() as usize;
        first.min(self.pages.len())..end.min(self.pages.len())
    }

    /// Content for `page`, attaching it on first display.
    pub fn cell_for_page(&mut self, page: usize) -> Option<&mut dyn PageContent> {
        let host = self.pages.get_mut(page)?;
        if !host.attached {
            host.attached = true;
            host.content.did_attach();
            tracing::debug!(page, "page attached");
        }
        Some(host.content.as_mut())
    }

    pub fn set_page_width(&mut self, width: f64) {
        let old = self.view.page_width();
        if old > 0.0 && width > 0.0 {
            self.start_offset *= width / old;
        }
        self.view.set_page_width(width);
    }

    // ── gesture ────────────────────────────────────────────────

    /// A drag begins.  Anything still gliding from a previous gesture lands
    /// on the page it was heading for and settles there first.
    pub fn begin_drag(&mut self, scope: &mut GestureScope) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        if self.pages.is_empty() {
            return events;
        }
        let notices = self.view.finish_motion();
        self.apply_notices(notices, scope, &mut events);

        scope.release();
        self.view.begin_drag();
        self.start_offset = self.view.offset();
        self.appearance_processed = false;
        tracing::debug!(start = self.start_offset, "drag began");
        events
    }

    /// Move the content to `offset` while dragging.
    pub fn drag_to(&mut self, offset: f64, scope: &GestureScope) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        if self.view.drag_to(offset) {
            self.did_scroll(scope, &mut events);
        }
        events
    }

    /// Release the drag with `velocity` (cells per second, positive when the
    /// offset was increasing).  Settles at once when no glide is needed.
    pub fn end_drag(&mut self, velocity: f64, scope: &GestureScope) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        if self.view.phase() != ScrollPhase::Dragging {
            return events;
        }
        if !self.view.end_drag(velocity) {
            self.content_end_scroll(scope, &mut events);
        }
        events
    }

    /// Advance a glide or animation, emitting whatever it causes.
    pub fn tick(&mut self, dt: Duration, scope: &GestureScope) -> Vec<PagerEvent> {
        let mut events = Vec::new();
        let notices = self.view.tick(dt);
        self.apply_notices(notices, scope, &mut events);
        events
    }

    fn apply_notices(
        &mut self,
        notices: Vec<ScrollNotice>,
        scope: &GestureScope,
        events: &mut Vec<PagerEvent>,
    ) {
        for notice in notices {
            match notice {
                ScrollNotice::DidScroll => self.did_scroll(scope, events),
                ScrollNotice::DidEndDecelerating => self.content_end_scroll(scope, events),
                ScrollNotice::DidEndScrollingAnimation => self.end_scrolling_animation(events),
            }
        }
    }

    /// Programmatically move from page `from` to page `to` (animated).
    ///
    /// Both indices must be in range; nothing is clamped.  Delegate events
    /// are suppressed until the next drag so the resulting scroll is not
    /// mistaken for user input.
    pub fn set_current_index(
        &mut self,
        from: usize,
        to: usize,
        scope: &mut GestureScope,
    ) -> Result<Vec<PagerEvent>> {
        let count = self.pages.len();
        check_index("ContentPager", from, count)?;
        check_index("ContentPager", to, count)?;

        scope.suppress();
        let mut events = Vec::new();

        if let Some(pending) = self.pending.take() {
            self.revert(pending, &mut events);
        }
        self.appearance_processed = false;

        if from != to {
            self.switch_directly(from, to, &mut events);
        }
        self.current_index = to;
        self.potential_index = to;
        self.view.scroll_to_page(to, true);

        tracing::debug!(from, to, "page selected");
        Ok(events)
    }

    // ── scroll-view callbacks ──────────────────────────────────

    fn did_scroll(&mut self, scope: &GestureScope, events: &mut Vec<PagerEvent>) {
        let offset = self.view.offset();
        let width = self.view.page_width();
        if offset == self.start_offset || scope.is_suppressed() || width <= 0.0 {
            return;
        }
        let Some(last) = self.pages.len().checked_sub(1) else {
            return;
        };

        self.current_index = self.view.page_at(self.start_offset);
        let (target, distance) = if offset > self.start_offset {
            ((self.current_index + 1).min(last), offset - self.start_offset)
        } else {
            (self.current_index.saturating_sub(1), self.start_offset - offset)
        };
        let progress = (distance / width).min(1.0);
        self.potential_index = target;

        events.push(PagerEvent::ScrollProgress {
            source: self.current_index,
            target,
            progress,
        });

        if !self.appearance_processed && target != self.current_index {
            self.appearance_processed = true;
            let from = self.current_index;
            self.apply(from, Transition::Begin { appearing: false }, events);
            self.apply(target, Transition::Begin { appearing: true }, events);
            self.pending = Some(PendingTransition { from, to: target });
        }
    }

    /// Drag released without glide, or glide finished.
    fn content_end_scroll(&mut self, scope: &GestureScope, events: &mut Vec<PagerEvent>) {
        self.appearance_processed = false;
        if scope.is_suppressed() {
            return;
        }

        let settled = self.view.current_page();
        let from = self.current_index;
        let outcome = match self.pending.take() {
            Some(pending) if pending.to == settled => {
                self.apply(pending.from, Transition::End, events);
                self.apply(pending.to, Transition::End, events);
                SettleOutcome::Switched
            }
            Some(pending) => {
                self.revert(pending, events);
                if settled == pending.from {
                    SettleOutcome::NotSwitched
                } else {
                    self.switch_directly(pending.from, settled, events);
                    SettleOutcome::Switched
                }
            }
            None if settled != from => {
                self.switch_directly(from, settled, events);
                SettleOutcome::Switched
            }
            None => SettleOutcome::NotSwitched,
        };

        self.current_index = settled;
        self.potential_index = settled;
        tracing::debug!(index = settled, ?outcome, "scroll settled");
        events.push(PagerEvent::ScrollSettled {
            index: settled,
            outcome,
        });
    }

    fn end_scrolling_animation(&mut self, events: &mut Vec<PagerEvent>) {
        self.appearance_processed = false;
        events.push(PagerEvent::ScrollSettled {
            index: self.current_index,
            outcome: SettleOutcome::Programmatic,
        });
    }

    // ── visibility ─────────────────────────────────────────────

    /// Undo a half-started pair: the target goes back to hidden, the origin
    /// back to visible.
    fn revert(&mut self, pending: PendingTransition, events: &mut Vec<PagerEvent>) {
        self.apply(pending.to, Transition::Begin { appearing: false }, events);
        self.apply(pending.from, Transition::Begin { appearing: true }, events);
        self.apply(pending.to, Transition::End, events);
        self.apply(pending.from, Transition::End, events);
    }

    /// Full hide/show pair with nothing in between.
    fn switch_directly(&mut self, from: usize, to: usize, events: &mut Vec<PagerEvent>) {
        if from == to {
            return;
        }
        self.apply(to, Transition::Begin { appearing: true }, events);
        self.apply(from, Transition::Begin { appearing: false }, events);
        self.apply(from, Transition::End, events);
        self.apply(to, Transition::End, events);
    }

    fn apply(&mut self, page: usize, transition: Transition, events: &mut Vec<PagerEvent>) {
        let Some(host) = self.pages.get_mut(page) else {
            return;
        };
        match host.visibility.apply(transition) {
            Some((next, event)) => {
                tracing::debug!(page, from = ?host.visibility, to = ?next, "page visibility");
                host.visibility = next;
                host.content.on_appearance(event);
                events.push(PagerEvent::Appearance { page, event });
            }
            None => {
                tracing::warn!(page, state = ?host.visibility, ?transition, "ignored visibility transition");
            }
        }
    }
}
