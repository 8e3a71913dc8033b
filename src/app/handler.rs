//! Input handling: maps key/mouse events to coordinator calls.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;

use super::state::{AppState, DemoKind, DragTracker};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Ok(());
    }

    let Some(action) = state.config.match_key(key) else {
        return Ok(());
    };
    match action {
        Action::NextPage => step_page(state, 1)?,
        Action::PrevPage => step_page(state, -1)?,
        Action::SwitchDemo => state.switch_demo(),
        Action::Quit => state.should_quit = true,
    }
    Ok(())
}

fn step_page(state: &mut AppState, delta: isize) -> Result<()> {
    match state.demo {
        DemoKind::Pages => {
            let count = state.pages.pager().page_count();
            let current = state.pages.pager().current_index();
            if let Some(next) = current.checked_add_signed(delta).filter(|&n| n < count) {
                state.pages.select_page(next)?;
            }
        }
        DemoKind::Grid => {
            let count = state.grid.layout().total_pages();
            let current = state.grid.current_page();
            if let Some(next) = current.checked_add_signed(delta).filter(|&n| n < count) {
                state.grid.scroll_to_page(next);
            }
        }
    }
    Ok(())
}

/// Process a mouse event: clicks on the strip tap a title, drags on the
/// content swipe pages.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Result<()> {
    let now = Instant::now();
    let column = f64::from(mouse.column);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(state.title_area, mouse.column, mouse.row) {
                // Hit-test the middle of the clicked cell.
                let x = column - f64::from(state.title_area.x) + 0.5;
                match state.demo {
                    DemoKind::Pages => state.pages.tap_at(x)?,
                    DemoKind::Grid => state.grid.tap_at(x)?,
                };
                return Ok(());
            }
            if !point_in_rect(state.content_area, mouse.column, mouse.row) {
                return Ok(());
            }
            let origin = match state.demo {
                DemoKind::Pages => {
                    state.pages.begin_drag()?;
                    state.pages.pager().offset()
                }
                DemoKind::Grid => {
                    state.grid.begin_drag()?;
                    state.grid.drag_origin()
                }
            };
            state.drag = Some(DragTracker::begin(column, origin, now));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag.as_mut() else {
                return Ok(());
            };
            drag.record(column, now);
            let offset = drag.offset_for(column);
            match state.demo {
                DemoKind::Pages => state.pages.drag_to(offset)?,
                DemoKind::Grid => state.grid.drag_to(offset),
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = state.drag.take() else {
                return Ok(());
            };
            let velocity = drag.release_velocity(now);
            tracing::debug!(velocity, "drag released");
            match state.demo {
                DemoKind::Pages => state.pages.end_drag(velocity)?,
                DemoKind::Grid => state.grid.end_drag(velocity)?,
            }
        }
        _ => {}
    }
    Ok(())
}

/// Advance animations to `now`.
pub fn handle_tick(state: &mut AppState, now: Instant) -> Result<()> {
    let dt = now.saturating_duration_since(state.last_tick);
    state.last_tick = now;
    match state.demo {
        DemoKind::Pages => state.pages.tick(dt)?,
        DemoKind::Grid => state.grid.tick(dt)?,
    }
    Ok(())
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        let titles = ["One", "Two", "Three", "Four"].map(String::from).to_vec();
        let mut state = AppState::new(titles, AppConfig::default()).unwrap();
        let layout = state.layout(Rect::new(0, 0, 40, 20));
        state.sync_layout(&layout);
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn settle(state: &mut AppState) {
        for _ in 0..1000 {
            let now = state.last_tick + Duration::from_millis(16);
            handle_tick(state, now).unwrap();
            if !state.is_animating() {
                break;
            }
        }
    }

    #[test]
    fn arrow_keys_select_pages() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Right)).unwrap();
        assert_eq!(s.pages.strip().current_index(), 1);
        settle(&mut s);
        assert_eq!(s.pages.pager().current_index(), 1);

        handle_key(&mut s, press(KeyCode::Left)).unwrap();
        settle(&mut s);
        assert_eq!(s.pages.pager().current_index(), 0);

        // Already on the first page.
        handle_key(&mut s, press(KeyCode::Left)).unwrap();
        assert!(!s.is_animating());
    }

    #[test]
    fn clicking_a_title_taps_it() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 25, 0)).unwrap();
        assert_eq!(s.pages.strip().current_index(), 2);
        settle(&mut s);
        assert_eq!(s.pages.pager().current_index(), 2);
        assert_eq!(s.pages.pager().offset(), 80.0);
    }

    #[test]
    fn dragging_the_content_swipes() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 35, 5)).unwrap();
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5)).unwrap();
        assert_eq!(s.pages.pager().offset(), 25.0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)).unwrap();
        settle(&mut s);
        assert_eq!(s.pages.pager().current_index(), 1);
        assert_eq!(s.pages.strip().current_index(), 1);
        assert!(s.drag.is_none());
    }

    #[test]
    fn drag_outside_content_is_ignored() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 10, 19)).unwrap();
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 0, 19)).unwrap();
        assert!(s.drag.is_none());
        assert_eq!(s.pages.pager().offset(), 0.0);
    }

    #[test]
    fn tab_switches_to_the_grid() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Tab)).unwrap();
        assert_eq!(s.demo, DemoKind::Grid);
        let layout = s.layout(Rect::new(0, 0, 40, 20));
        s.sync_layout(&layout);

        handle_key(&mut s, press(KeyCode::Right)).unwrap();
        settle(&mut s);
        assert_eq!(s.grid.current_page(), 1);
        assert_eq!(s.grid.page_control().current_page, 1);
    }

    #[test]
    fn quit_binding_stops_the_loop() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q'))).unwrap();
        assert!(s.should_quit);
    }
}
