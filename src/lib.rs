//! A swipeable, paginated tab view for terminal UIs.
//!
//! A [`TabStrip`] of titles sits above (or below) a horizontally paging
//! [`ContentPager`].  The [`PageCoordinator`] keeps the two in lockstep
//! while the content is dragged, tapped, or moved programmatically, and the
//! [`GridCoordinator`] does the same for sectioned grid pages.

pub mod core;
pub mod ui;

pub use crate::core::color::Rgb;
pub use crate::core::coordinator::{PageCoordinator, PagerObserver};
pub use crate::core::error::{PagerError, Result};
pub use crate::core::grid_layout::{GridConfig, IndexPath, PagedGridLayout};
pub use crate::core::grid_pager::{GridCell, GridCoordinator, GridDataSource, PageControl, TitlePosition};
pub use crate::core::page::{AppearanceEvent, PageContent, Visibility};
pub use crate::core::pager::ContentPager;
pub use crate::core::tab_strip::{TabStrip, TitleStyle};
