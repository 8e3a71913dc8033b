//! Grid-paginated variant: a title strip over sectioned grid pages with a
//! page-control dot row.
//!
//! Unlike [`PageCoordinator`](super::coordinator::PageCoordinator) the strip
//! does not follow the drag continuously.  It jumps when the content comes
//! to rest in a different section, and the dots always describe the pages
//! of the section currently on screen.

use std::time::Duration;

use super::color::Rgb;
use super::coordinator::PagerObserver;
use super::error::{PagerError, Result};
use super::geometry::RectF;
use super::grid_layout::{GridConfig, IndexPath, LayoutAttributes, PagedGridLayout};
use super::pager::GestureScope;
use super::scroll::{PagedScrollView, ScrollNotice, ScrollPhase};
use super::tab_strip::{TabStrip, TitleStyle};

/// Supplies sections, item counts, and cells.
pub trait GridDataSource {
    fn section_count(&self) -> usize;

    fn item_count(&self, section: usize) -> usize;

    /// Build the cell shown at `index`.
    fn cell(&self, index: IndexPath) -> GridCell;
}

/// What one grid cell displays.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub label: String,
    pub color: Rgb,
}

/// Dot indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageControl {
    pub number_of_pages: usize,
    pub current_page: usize,
}

/// Which edge the title strip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePosition {
    #[default]
    Top,
    Bottom,
}

pub struct GridCoordinator {
    strip: TabStrip,
    layout: PagedGridLayout,
    view: PagedScrollView,
    scope: GestureScope,
    source: Option<Box<dyn GridDataSource>>,
    title_position: TitlePosition,
    page_height: f64,
    /// Last item recorded at rest; only replaced when the section changes.
    source_index: IndexPath,
    page_control: PageControl,
    observers: Vec<Box<dyn PagerObserver>>,
}

impl GridCoordinator {
    pub fn new<S: Into<String>>(
        titles: Vec<S>,
        style: TitleStyle,
        grid: GridConfig,
        title_position: TitlePosition,
        page_width: f64,
        page_height: f64,
    ) -> Result<Self> {
        Ok(Self {
            strip: TabStrip::new(titles, style, page_width),
            layout: PagedGridLayout::new(grid)?,
            view: PagedScrollView::new(page_width, 0),
            scope: GestureScope::default(),
            source: None,
            title_position,
            page_height,
            source_index: IndexPath::default(),
            page_control: PageControl::default(),
            observers: Vec::new(),
        })
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn layout(&self) -> &PagedGridLayout {
        &self.layout
    }

    pub fn page_control(&self) -> PageControl {
        self.page_control
    }

    pub fn title_position(&self) -> TitlePosition {
        self.title_position
    }

    pub fn offset(&self) -> f64 {
        self.view.offset()
    }

    pub fn page_width(&self) -> f64 {
        self.view.page_width()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.view.phase()
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page()
    }

    pub fn source_index(&self) -> IndexPath {
        self.source_index
    }

    pub fn scope(&self) -> GestureScope {
        self.scope
    }

    pub fn register_observer(&mut self, observer: impl PagerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Install the data source and lay everything out.  The source must
    /// provide exactly one section per title.
    pub fn register_data_source(&mut self, source: impl GridDataSource + 'static) -> Result<()> {
        let sections = source.section_count();
        if sections != self.strip.label_count() {
            return Err(PagerError::TitleCountMismatch {
                titles: self.strip.label_count(),
                pages: sections,
            });
        }
        self.source = Some(Box::new(source));
        self.reload();
        Ok(())
    }

    /// Re-query the data source and recompute the whole layout.
    pub fn reload(&mut self) {
        let Some(source) = self.source.as_deref() else {
            return;
        };
        let items: Vec<usize> = (0..source.section_count())
            .map(|s| source.item_count(s))
            .collect();

        self.layout
            .prepare(self.view.page_width(), self.page_height, &items);
        self.view.set_page_count(self.layout.total_pages());

        let first = items.first().copied().unwrap_or(0);
        self.page_control.number_of_pages = self.layout.config().pages_for(first);
    }

    pub fn resize(&mut self, page_width: f64, page_height: f64) {
        self.strip.set_viewport_width(page_width);
        self.view.set_page_width(page_width);
        self.page_height = page_height;
        self.reload();
    }

    /// Cells intersecting the viewport, with frames in content coordinates.
    pub fn visible_cells(&self) -> Vec<(LayoutAttributes, GridCell)> {
        let Some(source) = self.source.as_deref() else {
            return Vec::new();
        };
        let viewport = RectF::new(
            self.view.offset(),
            0.0,
            self.view.page_width(),
            self.page_height,
        );
        self.layout
            .attributes_in(viewport)
            .map(|a| (*a, source.cell(a.index_path)))
            .collect()
    }

    // ── gestures ───────────────────────────────────────────────

    pub fn begin_drag(&mut self) -> Result<()> {
        let notices = self.view.finish_motion();
        self.apply_notices(notices)?;
        self.scope.release();
        self.view.begin_drag();
        Ok(())
    }

    pub fn drag_to(&mut self, offset: f64) {
        self.view.drag_to(offset);
    }

    pub fn drag_origin(&self) -> f64 {
        self.view.drag_origin()
    }

    pub fn end_drag(&mut self, velocity: f64) -> Result<()> {
        if self.view.phase() != ScrollPhase::Dragging {
            return Ok(());
        }
        if !self.view.end_drag(velocity) {
            self.end_scroll()?;
        }
        Ok(())
    }

    /// Animated move to a global page (keyboard navigation).
    pub fn scroll_to_page(&mut self, page: usize) {
        self.scope.release();
        self.view.scroll_to_page(page, true);
    }

    /// Jump to the first page of the tapped section.
    pub fn tap_tab(&mut self, index: usize) -> Result<()> {
        let tapped = self.strip.tap(index)?;
        for observer in &mut self.observers {
            observer.on_tab_tapped(tapped.from, tapped.to);
        }
        self.scope.suppress();
        if let Some(page) = self.layout.section_page_start(index) {
            self.view.scroll_to_page(page, false);
        }
        self.end_scroll()
    }

    pub fn tap_at(&mut self, x: f64) -> Result<Option<usize>> {
        let Some(index) = self.strip.label_at(x) else {
            return Ok(None);
        };
        self.tap_tab(index)?;
        Ok(Some(index))
    }

    pub fn tick(&mut self, dt: Duration) -> Result<()> {
        self.strip.tick(dt);
        let notices = self.view.tick(dt);
        self.apply_notices(notices)
    }

    fn apply_notices(&mut self, notices: Vec<ScrollNotice>) -> Result<()> {
        for notice in notices {
            match notice {
                ScrollNotice::DidScroll => {}
                ScrollNotice::DidEndDecelerating | ScrollNotice::DidEndScrollingAnimation => {
                    self.end_scroll()?
                }
            }
        }
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.strip.is_animating() || self.view.phase() != ScrollPhase::Idle
    }

    /// Content came to rest: resync the dots, and the strip when the
    /// section changed.
    fn end_scroll(&mut self) -> Result<()> {
        let insets = self.layout.config().insets;
        let hit_x = self.view.offset() + insets.left + 0.5;
        let hit_y = insets.top + 0.5;
        let Some(index) = self.layout.item_at(hit_x, hit_y) else {
            return Ok(());
        };

        let previous = self.source_index.section;
        if previous != index.section {
            let items = self.layout.items_in_section(index.section);
            self.page_control.number_of_pages = self.layout.config().pages_for(items);
            if !self.scope.is_suppressed() {
                self.strip.set_progress(1.0, previous, index.section)?;
                self.strip.center_on_current();
            }
            tracing::debug!(from = previous, to = index.section, "grid section changed");
            self.source_index = index;
        }
        // A tapped section with no items lands on a neighbour.
        if self.scope.is_suppressed() && self.strip.current_index() != index.section {
            self.strip.settle(index.section)?;
        }

        self.page_control.current_page = index.item / self.layout.config().items_per_page();

        let page = self.view.current_page();
        for observer in &mut self.observers {
            observer.on_scroll_settled(page);
        }
        Ok(())
    }
}
