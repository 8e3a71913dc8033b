//! Core state machines – colour blending, paging scroll physics, the tab
//! strip, the content pager, and the coordinators that keep them in sync.
//!
//! Nothing here touches the terminal.  Pages draw into a ratatui
//! [`Buffer`](ratatui::buffer::Buffer) handed to them by the widgets in
//! [`crate::ui`].

pub mod color;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod grid_layout;
pub mod grid_pager;
pub mod page;
pub mod pager;
pub mod scroll;
pub mod tab_strip;
