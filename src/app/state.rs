//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tab_pager::ui::layout::AppLayout;
use tab_pager::{GridCoordinator, PageCoordinator};

use super::demo::{demo_pages, ActivityLog, ActivityObserver, GlyphGrid, GRID_TITLES};
use crate::config::AppConfig;

/// Which demo is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoKind {
    #[default]
    Pages,
    Grid,
}

impl DemoKind {
    pub fn toggled(self) -> Self {
        match self {
            DemoKind::Pages => DemoKind::Grid,
            DemoKind::Grid => DemoKind::Pages,
        }
    }
}

/// Samples older than this do not count towards release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Turns mouse columns into content offsets and measures the release
/// velocity of a drag.
#[derive(Debug, Clone)]
pub struct DragTracker {
    start_column: f64,
    origin: f64,
    /// Recent `(column, time)` samples, oldest first.
    samples: Vec<(f64, Instant)>,
}

impl DragTracker {
    pub fn begin(column: f64, origin: f64, now: Instant) -> Self {
        Self {
            start_column: column,
            origin,
            samples: vec![(column, now)],
        }
    }

    /// Content offset for the pointer at `column`.  Moving the pointer left
    /// scrolls the content right.
    pub fn offset_for(&self, column: f64) -> f64 {
        self.origin + (self.start_column - column)
    }

    pub fn record(&mut self, column: f64, now: Instant) {
        self.samples.push((column, now));
        self.samples
            .retain(|&(_, t)| now.saturating_duration_since(t) <= VELOCITY_WINDOW);
    }

    /// Offset velocity in cells per second at release.  Zero when the
    /// pointer rested before letting go.
    pub fn release_velocity(&self, now: Instant) -> f64 {
        let recent: Vec<_> = self
            .samples
            .iter()
            .filter(|&&(_, t)| now.saturating_duration_since(t) <= VELOCITY_WINDOW)
            .collect();
        let (Some(&&(first_col, first_t)), Some(&&(last_col, last_t))) =
            (recent.first(), recent.last())
        else {
            return 0.0;
        };
        let dt = last_t.saturating_duration_since(first_t).as_secs_f64();
        if dt <= 0.0 {
            return 0.0;
        }
        (first_col - last_col) / dt
    }
}

/// Top-level application state.
pub struct AppState {
    pub demo: DemoKind,
    pub pages: PageCoordinator,
    pub grid: GridCoordinator,
    /// Active mouse drag on the content area.
    pub drag: Option<DragTracker>,
    /// Lifecycle messages written by the hosted pages.
    pub activity: ActivityLog,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Screen regions from the last draw, used for mouse hit-testing.
    pub title_area: Rect,
    pub content_area: Rect,
    pub last_tick: Instant,
}

impl AppState {
    pub fn new(titles: Vec<String>, config: AppConfig) -> tab_pager::Result<Self> {
        let activity = ActivityLog::default();
        let pages = demo_pages(&titles, &activity);
        let mut pages = PageCoordinator::new(titles, pages, config.style.clone(), 0.0)?;
        pages.register_observer(ActivityObserver::new(&activity));

        let mut grid = GridCoordinator::new(
            GRID_TITLES.to_vec(),
            config.style.clone(),
            config.grid,
            config.title_position,
            0.0,
            0.0,
        )?;
        grid.register_data_source(GlyphGrid::default())?;
        grid.register_observer(ActivityObserver::new(&activity));

        Ok(Self {
            demo: DemoKind::default(),
            pages,
            grid,
            drag: None,
            activity,
            config,
            should_quit: false,
            title_area: Rect::default(),
            content_area: Rect::default(),
            last_tick: Instant::now(),
        })
    }

    /// Screen layout for the active demo.
    pub fn layout(&self, area: Rect) -> AppLayout {
        match self.demo {
            DemoKind::Pages => AppLayout::from_area(
                area,
                self.config.style.height,
                self.config.title_position,
                false,
            ),
            DemoKind::Grid => AppLayout::from_area(
                area,
                self.config.style.height,
                self.grid.title_position(),
                true,
            ),
        }
    }

    /// Record the regions of the latest frame and resize the coordinators
    /// when they changed.
    pub fn sync_layout(&mut self, layout: &AppLayout) {
        self.title_area = layout.title_area;
        if layout.content_area != self.content_area {
            self.content_area = layout.content_area;
            let width = f64::from(layout.content_area.width);
            let height = f64::from(layout.content_area.height);
            match self.demo {
                DemoKind::Pages => self.pages.resize(width),
                DemoKind::Grid => self.grid.resize(width, height),
            }
        }
    }

    pub fn switch_demo(&mut self) {
        self.demo = self.demo.toggled();
        self.drag = None;
        // Force a resize of the newly shown demo on the next draw.
        self.content_area = Rect::default();
        tracing::debug!(demo = ?self.demo, "switched demo");
    }

    /// Newest activity line, for the status bar.
    pub fn latest_activity(&self) -> Option<String> {
        self.activity.borrow().back().cloned()
    }

    pub fn is_animating(&self) -> bool {
        match self.demo {
            DemoKind::Pages => self.pages.is_animating(),
            DemoKind::Grid => self.grid.is_animating(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_offset_moves_against_the_pointer() {
        let t0 = Instant::now();
        let drag = DragTracker::begin(30.0, 80.0, t0);
        assert_eq!(drag.offset_for(20.0), 90.0);
        assert_eq!(drag.offset_for(35.0), 75.0);
    }

    #[test]
    fn quick_flick_has_velocity() {
        let t0 = Instant::now();
        let mut drag = DragTracker::begin(30.0, 0.0, t0);
        drag.record(25.0, t0 + Duration::from_millis(20));
        drag.record(20.0, t0 + Duration::from_millis(40));
        let v = drag.release_velocity(t0 + Duration::from_millis(50));
        assert!((v - 250.0).abs() < 1e-9, "velocity {v}");
    }

    #[test]
    fn resting_pointer_has_no_velocity() {
        let t0 = Instant::now();
        let mut drag = DragTracker::begin(30.0, 0.0, t0);
        drag.record(20.0, t0 + Duration::from_millis(20));
        assert_eq!(drag.release_velocity(t0 + Duration::from_millis(500)), 0.0);
    }

    #[test]
    fn state_builds_both_demos() {
        let titles = vec!["a".to_string(), "b".to_string()];
        let mut state = AppState::new(titles, AppConfig::default()).unwrap();
        let layout = state.layout(Rect::new(0, 0, 40, 20));
        state.sync_layout(&layout);
        assert_eq!(state.pages.pager().page_width(), 40.0);

        state.switch_demo();
        let layout = state.layout(Rect::new(0, 0, 40, 20));
        assert!(layout.dots_area.is_some());
        state.sync_layout(&layout);
        assert_eq!(state.grid.page_width(), 40.0);
        assert_eq!(state.grid.page_control().number_of_pages, 2);
    }
}
