//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state machines and turns them into cells on
//! the terminal.  No input handling happens here.

pub mod grid;
pub mod layout;
pub mod page_control;
pub mod pager;
pub mod tab_strip;
pub mod theme;
