//! Tab strip ⇄ content pager wiring.
//!
//! Drag progress from the pager drives continuous interpolation in the
//! strip; taps in the strip drive a programmatic page change in the pager.
//! The coordinator owns the [`GestureScope`], so scrolling it triggers
//! itself is never read back as a user gesture.

use std::time::Duration;

use super::error::{check_index, PagerError, Result};
use super::page::{AppearanceEvent, PageContent};
use super::pager::{ContentPager, GestureScope, PagerEvent};
use super::tab_strip::{TabStrip, TitleStyle};

/// Receives the coordinator's event stream.
///
/// Only scroll progress is mandatory; the remaining notifications default
/// to no-ops.
pub trait PagerObserver {
    fn on_scroll_progress(&mut self, source: usize, target: usize, progress: f64);

    fn on_scroll_settled(&mut self, _index: usize) {}

    fn on_tab_tapped(&mut self, _from: usize, _to: usize) {}

    fn on_appearance(&mut self, _page: usize, _event: AppearanceEvent) {}
}

/// Title strip plus full-page content pager.
pub struct PageCoordinator {
    strip: TabStrip,
    pager: ContentPager,
    scope: GestureScope,
    observers: Vec<Box<dyn PagerObserver>>,
}

impl PageCoordinator {
    /// One title per page; `width` is the shared viewport width.
    pub fn new<S: Into<String>>(
        titles: Vec<S>,
        pages: Vec<Box<dyn PageContent>>,
        style: TitleStyle,
        width: f64,
    ) -> Result<Self> {
        if titles.len() != pages.len() {
            return Err(PagerError::TitleCountMismatch {
                titles: titles.len(),
                pages: pages.len(),
            });
        }
        Ok(Self {
            strip: TabStrip::new(titles, style, width),
            pager: ContentPager::new(pages, width),
            scope: GestureScope::default(),
            observers: Vec::new(),
        })
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    /// Mutable strip access, e.g. for [`TabStrip::register_tap_handler`].
    pub fn strip_mut(&mut self) -> &mut TabStrip {
        &mut self.strip
    }

    pub fn pager(&self) -> &ContentPager {
        &self.pager
    }

    /// Mutable pager access for rendering (pages attach on first paint).
    pub fn pager_mut(&mut self) -> &mut ContentPager {
        &mut self.pager
    }

    pub fn scope(&self) -> GestureScope {
        self.scope
    }

    pub fn register_observer(&mut self, observer: impl PagerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn resize(&mut self, width: f64) {
        self.strip.set_viewport_width(width);
        self.pager.set_page_width(width);
    }

    /// Jump to `index`: the strip moves at once, the content animates.
    pub fn select_page(&mut self, index: usize) -> Result<()> {
        check_index("PageCoordinator", index, self.pager.page_count())?;
        let source = self.strip.current_index();
        self.strip.set_progress(1.0, source, index)?;
        self.strip.center_on_current();

        let from = self.pager.current_index();
        let events = self.pager.set_current_index(from, index, &mut self.scope)?;
        self.dispatch(events)
    }

    /// A tab label was tapped.
    pub fn tap_tab(&mut self, index: usize) -> Result<()> {
        let tapped = self.strip.tap(index)?;
        for observer in &mut self.observers {
            observer.on_tab_tapped(tapped.from, tapped.to);
        }
        // The page actually leaving the screen is the pager's, which can lag
        // the strip while a drag is still in flight.
        let from = self.pager.current_index();
        let events = self
            .pager
            .set_current_index(from, tapped.to, &mut self.scope)?;
        self.dispatch(events)
    }

    /// Tap at column `x` of the strip viewport.  Returns the tapped tab.
    pub fn tap_at(&mut self, x: f64) -> Result<Option<usize>> {
        let Some(index) = self.strip.label_at(x) else {
            return Ok(None);
        };
        self.tap_tab(index)?;
        Ok(Some(index))
    }

    pub fn begin_drag(&mut self) -> Result<()> {
        let events = self.pager.begin_drag(&mut self.scope);
        self.dispatch(events)
    }

    pub fn drag_to(&mut self, offset: f64) -> Result<()> {
        let events = self.pager.drag_to(offset, &self.scope);
        self.dispatch(events)
    }

    pub fn end_drag(&mut self, velocity: f64) -> Result<()> {
        let events = self.pager.end_drag(velocity, &self.scope);
        self.dispatch(events)
    }

    pub fn tick(&mut self, dt: Duration) -> Result<()> {
        self.strip.tick(dt);
        let events = self.pager.tick(dt, &self.scope);
        self.dispatch(events)
    }

    pub fn is_animating(&self) -> bool {
        self.strip.is_animating() || self.pager.phase() != super::scroll::ScrollPhase::Idle
    }

    fn dispatch(&mut self, events: Vec<PagerEvent>) -> Result<()> {
        for event in events {
            match event {
                PagerEvent::ScrollProgress {
                    source,
                    target,
                    progress,
                } => {
                    self.strip.set_progress(progress, source, target)?;
                    for observer in &mut self.observers {
                        observer.on_scroll_progress(source, target, progress);
                    }
                }
                PagerEvent::Appearance { page, event } => {
                    for observer in &mut self.observers {
                        observer.on_appearance(page, event);
                    }
                }
                PagerEvent::ScrollSettled { index, .. } => {
                    // A selection can land mid-glide, so every settle
                    // clears whatever blend the gesture left behind.
                    self.strip.settle(index)?;
                    for observer in &mut self.observers {
                        observer.on_scroll_settled(index);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::page::Visibility;
    use crate::core::pager::tests::{tracked_pages, WIDTH};
    use crate::core::scroll::ScrollPhase;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Progress(usize, usize, f64),
        Settled(usize),
        Tapped(usize, usize),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Seen>>>);

    impl PagerObserver for Recorder {
        fn on_scroll_progress(&mut self, source: usize, target: usize, progress: f64) {
            self.0.borrow_mut().push(Seen::Progress(source, target, progress));
        }

        fn on_scroll_settled(&mut self, index: usize) {
            self.0.borrow_mut().push(Seen::Settled(index));
        }

        fn on_tab_tapped(&mut self, from: usize, to: usize) {
            self.0.borrow_mut().push(Seen::Tapped(from, to));
        }
    }

    fn coordinator(n: usize) -> (PageCoordinator, Recorder) {
        let (pages, _) = tracked_pages(n);
        let titles: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let style = TitleStyle {
            show_underline: true,
            scale_enabled: true,
            ..TitleStyle::default()
        };
        let mut c = PageCoordinator::new(titles, pages, style, WIDTH).unwrap();
        let recorder = Recorder::default();
        c.register_observer(recorder.clone());
        (c, recorder)
    }

    fn run(c: &mut PageCoordinator) {
        for _ in 0..1000 {
            c.tick(FRAME).unwrap();
            if !c.is_animating() {
                break;
            }
        }
    }

    #[test]
    fn title_count_must_match_page_count() {
        let (pages, _) = tracked_pages(3);
        let err = PageCoordinator::new(vec!["a", "b"], pages, TitleStyle::default(), WIDTH)
            .err()
            .unwrap();
        assert_eq!(err, PagerError::TitleCountMismatch { titles: 2, pages: 3 });
    }

    #[test]
    fn drag_progress_reaches_the_strip() {
        let (mut c, seen) = coordinator(4);
        c.begin_drag().unwrap();
        c.drag_to(20.0).unwrap();

        assert_eq!(seen.0.borrow()[0], Seen::Progress(0, 1, 0.5));
        assert_eq!(c.strip().current_index(), 1);
        assert_eq!(c.strip().underline().x, 5.0);
    }

    #[test]
    fn snap_back_restores_the_strip() {
        let (mut c, seen) = coordinator(4);
        c.begin_drag().unwrap();
        c.drag_to(8.0).unwrap();
        c.end_drag(0.0).unwrap();
        run(&mut c);

        assert_eq!(c.pager().current_index(), 0);
        assert_eq!(c.strip().current_index(), 0);
        let style = c.strip().style().clone();
        assert_eq!(c.strip().labels()[0].color, style.selected_color);
        assert_eq!(c.strip().labels()[1].color, style.normal_color);
        assert_eq!(seen.0.borrow().last(), Some(&Seen::Settled(0)));
    }

    #[test]
    fn full_swipe_moves_both_sides() {
        let (mut c, _) = coordinator(4);
        c.begin_drag().unwrap();
        c.drag_to(30.0).unwrap();
        c.end_drag(50.0).unwrap();
        run(&mut c);

        assert_eq!(c.pager().current_index(), 1);
        assert_eq!(c.strip().current_index(), 1);
        assert_eq!(c.strip().underline().x, 10.0);
    }

    #[test]
    fn tap_scrolls_content_without_feedback() {
        let (mut c, seen) = coordinator(4);
        c.tap_tab(3).unwrap();
        assert!(c.scope().is_suppressed());
        run(&mut c);

        assert_eq!(c.pager().offset(), 3.0 * WIDTH);
        assert_eq!(c.pager().visibility(3), Some(Visibility::Visible));
        assert_eq!(c.pager().visibility(0), Some(Visibility::Hidden));
        assert_eq!(c.strip().current_index(), 3);

        let seen = seen.0.borrow();
        assert_eq!(seen.first(), Some(&Seen::Tapped(0, 3)));
        // The animated scroll never echoes back as drag progress.
        assert!(!seen.iter().any(|s| matches!(s, Seen::Progress(..))));
        assert_eq!(seen.last(), Some(&Seen::Settled(3)));
    }

    #[test]
    fn tap_by_column_hits_the_label_under_it() {
        let (mut c, _) = coordinator(4);
        assert_eq!(c.tap_at(25.0).unwrap(), Some(2));
        assert_eq!(c.strip().current_index(), 2);
    }

    #[test]
    fn select_page_moves_strip_immediately_and_content_animated() {
        let (mut c, _) = coordinator(5);
        c.select_page(4).unwrap();
        assert_eq!(c.strip().current_index(), 4);
        assert_eq!(c.strip().underline().x, 4.0 * WIDTH / 5.0);
        assert_eq!(c.pager().phase(), ScrollPhase::Animating);
        run(&mut c);
        assert_eq!(c.pager().current_index(), 4);
        assert_eq!(c.pager().offset(), 4.0 * WIDTH);
    }

    #[test]
    fn select_page_rejects_bad_indices() {
        let (mut c, _) = coordinator(5);
        assert!(matches!(
            c.select_page(5),
            Err(PagerError::IndexOutOfRange { index: 5, count: 5, .. })
        ));
        assert_eq!(c.strip().current_index(), 0);
        assert_eq!(c.pager().phase(), ScrollPhase::Idle);
    }

    #[test]
    fn drag_after_tap_is_live_again() {
        let (mut c, seen) = coordinator(4);
        c.tap_tab(1).unwrap();
        run(&mut c);
        seen.0.borrow_mut().clear();

        c.begin_drag().unwrap();
        c.drag_to(WIDTH + 10.0).unwrap();
        assert_eq!(seen.0.borrow()[0], Seen::Progress(1, 2, 0.25));
    }

    fn selected_labels(c: &PageCoordinator) -> Vec<usize> {
        let selected = c.strip().style().selected_color;
        c.strip()
            .labels()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.color == selected)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn selecting_during_a_glide_leaves_one_label_selected() {
        let (mut c, _) = coordinator(4);
        c.begin_drag().unwrap();
        c.drag_to(0.4 * WIDTH).unwrap();
        c.end_drag(0.0).unwrap();
        c.tick(FRAME).unwrap();
        assert_eq!(c.pager().phase(), ScrollPhase::Decelerating);

        c.select_page(2).unwrap();
        run(&mut c);

        assert_eq!(c.strip().current_index(), 2);
        assert_eq!(selected_labels(&c), vec![2]);
        let normal = c.strip().style().normal_color;
        for i in [0, 1, 3] {
            assert_eq!(c.strip().labels()[i].color, normal);
            assert_eq!(c.strip().labels()[i].scale, 1.0);
        }
        assert_eq!(c.pager().visibility(2), Some(Visibility::Visible));
    }

    #[test]
    fn regrabbing_a_glide_lands_strip_and_pager_together() {
        let (mut c, seen) = coordinator(4);
        c.begin_drag().unwrap();
        c.drag_to(0.7 * WIDTH).unwrap();
        c.end_drag(0.0).unwrap();
        for _ in 0..6 {
            c.tick(FRAME).unwrap();
        }

        c.begin_drag().unwrap();
        assert_eq!(c.pager().current_index(), 1);
        assert_eq!(c.strip().current_index(), 1);
        assert_eq!(selected_labels(&c), vec![1]);
        assert!(seen.0.borrow().contains(&Seen::Settled(1)));

        seen.0.borrow_mut().clear();
        c.drag_to(1.5 * WIDTH).unwrap();
        assert_eq!(seen.0.borrow()[0], Seen::Progress(1, 2, 0.5));
    }

    #[test]
    fn strip_tap_handlers_fire_through_the_coordinator() {
        let (mut c, _) = coordinator(3);
        let taps = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&taps);
        c.strip_mut()
            .register_tap_handler(move |t| sink.borrow_mut().push(t.to));
        c.tap_tab(2).unwrap();
        assert_eq!(*taps.borrow(), vec![2]);
    }
}
