//! Paged grid placement: `cols × rows` cells per page, one run of pages per
//! section, sections laid out left to right.
//!
//! The layout is recomputed from scratch by [`PagedGridLayout::prepare`]
//! whenever the section/item counts or the viewport change.  Nothing is
//! updated incrementally.

use super::error::{PagerError, Result};
use super::geometry::{Insets, RectF};

/// Address of an item: `item` within `section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Computed placement of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    pub index_path: IndexPath,
    /// Global page (across all sections) the item lands on.
    pub page: usize,
    /// Frame in content coordinates.
    pub frame: RectF,
}

/// Static grid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub insets: Insets,
    /// Horizontal gap between neighbouring items.
    pub inter_item_spacing: f64,
    /// Vertical gap between rows.
    pub line_spacing: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 4,
            rows: 2,
            insets: Insets::uniform(1.0),
            inter_item_spacing: 1.0,
            line_spacing: 1.0,
        }
    }
}

impl GridConfig {
    pub fn items_per_page(&self) -> usize {
        self.cols * self.rows
    }

    /// Pages needed for `items` items.  An empty section needs no page.
    pub fn pages_for(&self, items: usize) -> usize {
        items.div_ceil(self.items_per_page())
    }
}

#[derive(Debug, Clone)]
pub struct PagedGridLayout {
    config: GridConfig,
    page_width: f64,
    page_height: f64,
    item_width: f64,
    item_height: f64,
    section_items: Vec<usize>,
    section_pages: Vec<usize>,
    /// First global page of each section.
    section_starts: Vec<usize>,
    total_pages: usize,
    attrs: Vec<LayoutAttributes>,
}

impl PagedGridLayout {
    pub fn new(config: GridConfig) -> Result<Self> {
        if config.cols == 0 || config.rows == 0 {
            return Err(PagerError::InvalidGrid {
                cols: config.cols,
                rows: config.rows,
            });
        }
        Ok(Self {
            config,
            page_width: 0.0,
            page_height: 0.0,
            item_width: 0.0,
            item_height: 0.0,
            section_items: Vec::new(),
            section_pages: Vec::new(),
            section_starts: Vec::new(),
            total_pages: 0,
            attrs: Vec::new(),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Recompute every attribute for a `page_width × page_height` viewport.
    pub fn prepare(&mut self, page_width: f64, page_height: f64, section_items: &[usize]) {
        let GridConfig {
            cols,
            rows,
            insets,
            inter_item_spacing,
            line_spacing,
        } = self.config;
        let per_page = self.config.items_per_page();

        self.page_width = page_width;
        self.page_height = page_height;
        self.item_width = ((page_width - insets.left - insets.right
            - (cols - 1) as f64 * inter_item_spacing)
            / cols as f64)
            .max(0.0);
        self.item_height = ((page_height - insets.top - insets.bottom
            - (rows - 1) as f64 * line_spacing)
            / rows as f64)
            .max(0.0);

        self.section_items = section_items.to_vec();
        self.section_pages.clear();
        self.section_starts.clear();
        self.attrs.clear();

        let mut pages_before = 0;
        for (section, &count) in section_items.iter().enumerate() {
            self.section_starts.push(pages_before);
            for item in 0..count {
                let page = pages_before + item / per_page;
                let slot = item % per_page;
                let col = slot % cols;
                let row = slot / cols;
                let x = page as f64 * page_width
                    + insets.left
                    + col as f64 * (self.item_width + inter_item_spacing);
                let y = insets.top + row as f64 * (self.item_height + line_spacing);
                self.attrs.push(LayoutAttributes {
                    index_path: IndexPath::new(section, item),
                    page,
                    frame: RectF::new(x, y, self.item_width, self.item_height),
                });
            }
            let pages = self.config.pages_for(count);
            self.section_pages.push(pages);
            pages_before += pages;
        }
        self.total_pages = pages_before;

        tracing::debug!(
            sections = section_items.len(),
            pages = self.total_pages,
            items = self.attrs.len(),
            "grid layout prepared"
        );
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Σ(pages per section) × page width.
    pub fn content_width(&self) -> f64 {
        self.total_pages as f64 * self.page_width
    }

    pub fn content_height(&self) -> f64 {
        self.page_height
    }

    pub fn item_size(&self) -> (f64, f64) {
        (self.item_width, self.item_height)
    }

    pub fn section_count(&self) -> usize {
        self.section_items.len()
    }

    pub fn items_in_section(&self, section: usize) -> usize {
        self.section_items.get(section).copied().unwrap_or(0)
    }

    pub fn pages_in_section(&self, section: usize) -> usize {
        self.section_pages.get(section).copied().unwrap_or(0)
    }

    /// First global page of `section`.
    pub fn section_page_start(&self, section: usize) -> Option<usize> {
        self.section_starts.get(section).copied()
    }

    pub fn attributes(&self) -> &[LayoutAttributes] {
        &self.attrs
    }

    /// Attributes whose frames intersect `rect` (content coordinates).
    pub fn attributes_in(&self, rect: RectF) -> impl Iterator<Item = &LayoutAttributes> + '_ {
        self.attrs.iter().filter(move |a| a.frame.intersects(&rect))
    }

    /// Item whose frame contains the content point `(x, y)`.
    pub fn item_at(&self, x: f64, y: f64) -> Option<IndexPath> {
        self.attrs
            .iter()
            .find(|a| a.frame.contains(x, y))
            .map(|a| a.index_path)
    }
}
