//! Title strip model: label geometry, selection, and the continuous visual
//! state rendered while the content is being dragged.

use std::time::Duration;

use unicode_width::UnicodeWidthStr;

use super::color::{interpolate, lerp, Rgb};
use super::error::{check_index, Result};
use super::scroll::SmoothScroll;

/// How long a tap takes to slide the underline and rescale the labels.
pub const TAP_ANIMATION: Duration = Duration::from_millis(150);

// ───────────────────────────────────────── style ─────────────

/// Appearance of the title strip.  Built once by the owner and never
/// mutated after the strip is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    /// Rows reserved for the strip (label row plus underline).
    pub height: u16,
    pub normal_color: Rgb,
    pub selected_color: Rgb,
    /// Bold labels.  The terminal's only font knob.
    pub bold: bool,
    /// Size labels by their text and let the strip scroll horizontally.
    /// When off, labels split the viewport evenly.
    pub scroll_enabled: bool,
    /// Gap between labels when scrolling is enabled.
    pub item_margin: f64,
    pub show_underline: bool,
    pub underline_height: u16,
    pub underline_color: Rgb,
    pub scale_enabled: bool,
    /// Scale of the selected label (unselected labels are 1.0).
    pub scale_factor: f64,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            height: 2,
            normal_color: Rgb::new(170.0, 170.0, 170.0),
            selected_color: Rgb::new(255.0, 0.0, 0.0),
            bold: false,
            scroll_enabled: false,
            item_margin: 4.0,
            show_underline: false,
            underline_height: 1,
            underline_color: Rgb::new(128.0, 0.0, 128.0),
            scale_enabled: false,
            scale_factor: 1.3,
        }
    }
}

// ───────────────────────────────────────── labels ────────────

/// One tab label and its current visual state.
#[derive(Debug, Clone, PartialEq)]
pub struct TabLabel {
    pub text: String,
    /// Index of the label in the strip.
    pub tag: usize,
    /// Left edge in strip content coordinates.
    pub x: f64,
    pub width: f64,
    pub color: Rgb,
    pub scale: f64,
}

impl TabLabel {
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width * 0.5
    }

    fn underline(&self) -> Underline {
        Underline {
            x: self.x,
            width: self.width,
        }
    }
}

/// Horizontal extent of the selection underline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Underline {
    pub x: f64,
    pub width: f64,
}

impl Underline {
    fn lerp(self, to: Underline, progress: f64) -> Underline {
        Underline {
            x: lerp(self.x, to.x, progress),
            width: lerp(self.width, to.width, progress),
        }
    }
}

/// A label was tapped; `from` was the settled tab at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTapped {
    pub from: usize,
    pub to: usize,
}

/// Underline slide + rescale that follows a tap.
#[derive(Debug, Clone, Copy)]
struct TapAnimation {
    from: usize,
    to: usize,
    elapsed: Duration,
    start_underline: Underline,
    start_from_scale: f64,
    start_to_scale: f64,
}

// ───────────────────────────────────────── strip ─────────────

pub struct TabStrip {
    style: TitleStyle,
    labels: Vec<TabLabel>,
    current_index: usize,
    underline: Underline,
    viewport_width: f64,
    content_width: f64,
    /// Horizontal scroll of the label row (only moves when scrolling is enabled).
    scroll: SmoothScroll,
    tap_animation: Option<TapAnimation>,
    tap_handlers: Vec<Box<dyn FnMut(TabTapped)>>,
}

impl TabStrip {
    pub fn new<I, S>(titles: I, style: TitleStyle, viewport_width: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = titles
            .into_iter()
            .enumerate()
            .map(|(tag, text)| TabLabel {
                text: text.into(),
                tag,
                x: 0.0,
                width: 0.0,
                color: style.normal_color,
                scale: 1.0,
            })
            .collect();

        let mut strip = Self {
            style,
            labels,
            current_index: 0,
            underline: Underline::default(),
            viewport_width: viewport_width.max(0.0),
            content_width: 0.0,
            scroll: SmoothScroll::new(0.3),
            tap_animation: None,
            tap_handlers: Vec::new(),
        };
        strip.layout_labels();
        if !strip.labels.is_empty() {
            strip.select_fully(0);
        }
        strip
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn style(&self) -> &TitleStyle {
        &self.style
    }

    pub fn labels(&self) -> &[TabLabel] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// The tab the strip currently considers settled (or being dragged to).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn underline(&self) -> Underline {
        self.underline
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Presented horizontal scroll of the label row.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.position()
    }

    /// Where the label row is scrolling to.
    pub fn target_scroll_offset(&self) -> f64 {
        self.scroll.target()
    }

    pub fn is_animating(&self) -> bool {
        self.tap_animation.is_some() || self.scroll.is_animating()
    }

    // ── public operations ──────────────────────────────────────

    /// Register a callback invoked with every tap, before the strip updates
    /// its own `current_index`.
    pub fn register_tap_handler(&mut self, handler: impl FnMut(TabTapped) + 'static) {
        self.tap_handlers.push(Box::new(handler));
    }

    /// Render the state between `source` and `target` at `progress`.
    ///
    /// The source label fades selected → normal and the target label
    /// normal → selected; underline and scale move linearly between the two
    /// label geometries.  The result depends only on the arguments, so
    /// calling this repeatedly during a drag never accumulates drift.
    pub fn set_progress(&mut self, progress: f64, source: usize, target: usize) -> Result<()> {
        let count = self.labels.len();
        check_index("TabStrip", source, count)?;
        check_index("TabStrip", target, count)?;

        self.tap_animation = None;
        let progress = progress.clamp(0.0, 1.0);
        // Labels outside the pair may still carry a previous target's blend.
        self.reset_labels_except(source, target);

        if source == target {
            self.select_fully(target);
            self.current_index = target;
            return Ok(());
        }

        let (normal, selected) = (self.style.normal_color, self.style.selected_color);
        self.labels[source].color = interpolate(selected, normal, progress);
        self.labels[target].color = interpolate(normal, selected, progress);

        self.underline = self.labels[source]
            .underline()
            .lerp(self.labels[target].underline(), progress);

        if self.style.scale_enabled {
            let factor = self.style.scale_factor;
            self.labels[source].scale = lerp(factor, 1.0, progress);
            self.labels[target].scale = lerp(1.0, factor, progress);
        }

        self.current_index = target;
        Ok(())
    }

    /// Snap every label to the state of a finished selection of `index`
    /// and recenter.  Used once the content has come to rest.
    pub fn settle(&mut self, index: usize) -> Result<()> {
        check_index("TabStrip", index, self.labels.len())?;
        self.tap_animation = None;
        for label in &mut self.labels {
            label.color = self.style.normal_color;
            label.scale = 1.0;
        }
        self.select_fully(index);
        self.current_index = index;
        self.center_on_current();
        Ok(())
    }

    /// Handle a tap on label `index`.
    ///
    /// Colours switch immediately; scale and underline animate over
    /// [`TAP_ANIMATION`].  Registered handlers are told `(from, to)`.
    pub fn tap(&mut self, index: usize) -> Result<TabTapped> {
        check_index("TabStrip", index, self.labels.len())?;

        let from = self.current_index;
        let tapped = TabTapped { from, to: index };

        self.reset_labels_except(from, index);
        self.labels[from].color = self.style.normal_color;
        self.labels[index].color = self.style.selected_color;

        for handler in &mut self.tap_handlers {
            handler(tapped);
        }

        self.current_index = index;
        self.center_on_current();

        if from != index {
            self.tap_animation = Some(TapAnimation {
                from,
                to: index,
                elapsed: Duration::ZERO,
                start_underline: self.underline,
                start_from_scale: self.labels[from].scale,
                start_to_scale: self.labels[index].scale,
            });
        }

        tracing::debug!(from, to = index, "tab tapped");
        Ok(tapped)
    }

    /// Label under column `x` of the viewport, accounting for strip scroll.
    pub fn label_at(&self, x: f64) -> Option<usize> {
        let x = x + self.scroll_offset();
        self.labels.iter().position(|l| x >= l.x && x < l.max_x())
    }

    /// Scroll the label row so the current label is centred, clamped to the
    /// content bounds.  No-op unless scrolling is enabled.
    pub fn center_on_current(&mut self) {
        if let Some(offset) = self.centered_offset() {
            self.scroll.set_target(offset);
        }
    }

    /// Relayout for a new viewport width.  Any in-flight interpolation is
    /// dropped in favour of the settled selection.
    pub fn set_viewport_width(&mut self, width: f64) {
        let width = width.max(0.0);
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        self.layout_labels();
        if self.labels.is_empty() {
            return;
        }
        self.tap_animation = None;
        self.underline = self.labels[self.current_index].underline();
        let offset = self.centered_offset().unwrap_or(0.0);
        self.scroll.jump_to(offset);
    }

    /// Advance the tap animation and the label-row scroll.
    pub fn tick(&mut self, dt: Duration) {
        self.scroll.tick(dt);

        let Some(mut anim) = self.tap_animation else {
            return;
        };
        anim.elapsed += dt;
        let t = (anim.elapsed.as_secs_f64() / TAP_ANIMATION.as_secs_f64()).min(1.0);

        let target = self.labels[anim.to].underline();
        self.underline = anim.start_underline.lerp(target, t);
        if self.style.scale_enabled {
            self.labels[anim.from].scale = lerp(anim.start_from_scale, 1.0, t);
            self.labels[anim.to].scale = lerp(anim.start_to_scale, self.style.scale_factor, t);
        }

        self.tap_animation = if t < 1.0 { Some(anim) } else { None };
    }

    // ── internals ──────────────────────────────────────────────

    fn layout_labels(&mut self) {
        let count = self.labels.len();
        if count == 0 {
            self.content_width = self.viewport_width;
            return;
        }

        let margin = self.style.item_margin;
        if self.style.scroll_enabled {
            let mut x = margin * 0.5;
            for label in &mut self.labels {
                label.width = label.text.width() as f64;
                label.x = x;
                x = label.max_x() + margin;
            }
            let last = self.labels[count - 1].max_x();
            self.content_width = (last + margin * 0.5).max(self.viewport_width);
        } else {
            let width = self.viewport_width / count as f64;
            for (i, label) in self.labels.iter_mut().enumerate() {
                label.width = width;
                label.x = i as f64 * width;
            }
            self.content_width = self.viewport_width;
        }
    }

    fn reset_labels_except(&mut self, a: usize, b: usize) {
        for label in &mut self.labels {
            if label.tag != a && label.tag != b {
                label.color = self.style.normal_color;
                label.scale = 1.0;
            }
        }
    }

    fn select_fully(&mut self, index: usize) {
        let label = &mut self.labels[index];
        label.color = self.style.selected_color;
        if self.style.scale_enabled {
            label.scale = self.style.scale_factor;
        }
        self.underline = label.underline();
    }

    fn centered_offset(&self) -> Option<f64> {
        if !self.style.scroll_enabled {
            return None;
        }
        let label = self.labels.get(self.current_index)?;
        let max = (self.content_width - self.viewport_width).max(0.0);
        Some((label.center_x() - self.viewport_width * 0.5).clamp(0.0, max))
    }
}
