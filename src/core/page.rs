//! Hosted page content and its visibility lifecycle.
//!
//! Every page moves through four states.  The pager drives transitions
//! explicitly with begin/end calls; the table in [`Visibility::apply`] is
//! the only place that decides what a call means.
//!
//! ```text
//!            begin(appear)            end
//!   Hidden ───────────────▶ Appearing ─────▶ Visible
//!     ▲                      │    ▲            │
//!     │ end     begin(hide)  ▼    │ begin(appear)
//!     └──────────────── Disappearing ◀─────────┘
//!                                   begin(hide)
//! ```

use ratatui::{buffer::Buffer, layout::Rect};

/// Where a page is in its show/hide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Appearing,
    Visible,
    Disappearing,
}

/// A lifecycle call issued by the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Begin becoming visible (`appearing = true`) or hidden.
    Begin { appearing: bool },
    /// Finish whatever transition is in progress.
    End,
}

/// Notification delivered to the page content for every accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceEvent {
    WillAppear,
    DidAppear,
    WillDisappear,
    DidDisappear,
}

impl Visibility {
    /// Transition table.  `None` means the call makes no sense in the
    /// current state and must be ignored.
    pub fn apply(self, transition: Transition) -> Option<(Visibility, AppearanceEvent)> {
        use AppearanceEvent::*;
        use Transition::*;
        use Visibility::*;

        match (self, transition) {
            (Hidden, Begin { appearing: true }) => Some((Appearing, WillAppear)),
            (Visible, Begin { appearing: false }) => Some((Disappearing, WillDisappear)),
            // Reversals of a transition that has not finished yet.
            (Appearing, Begin { appearing: false }) => Some((Disappearing, WillDisappear)),
            (Disappearing, Begin { appearing: true }) => Some((Appearing, WillAppear)),
            (Appearing, End) => Some((Visible, DidAppear)),
            (Disappearing, End) => Some((Hidden, DidDisappear)),
            _ => None,
        }
    }

    /// True while the page occupies (part of) the screen or is about to.
    pub fn is_on_screen(self) -> bool {
        !matches!(self, Visibility::Hidden)
    }
}

/// Content hosted by one page of a [`ContentPager`](super::pager::ContentPager).
///
/// Only [`render`](Self::render) is required; the lifecycle hooks default
/// to doing nothing.
pub trait PageContent {
    /// Paint the page into `area`.  The area always has the full page size,
    /// even when only part of it ends up on screen.
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Called once, the first time the page's slot is displayed.
    fn did_attach(&mut self) {}

    /// Called for every accepted visibility transition.
    fn on_appearance(&mut self, _event: AppearanceEvent) {}
}
