//! Debug settings and the on-screen tweak panel.
//!
//! The panel tree is rebuilt every frame from the current parameters. Widget
//! callbacks only queue [`PanelEvent`]s; the app applies them after the UI pass.

use std::cell::RefCell;
use std::rc::Rc;

use chrono_tz::Tz;

use chronarc_ui::prelude::*;

use crate::scenario::SceneParams;
use crate::time::{parse_timezone, TimeError};

/// Fragment that turns the panel on at startup.
pub const DEBUG_FRAGMENT: &str = "#debug";

/// Timezones offered by the panel.
pub const TIMEZONES: [&str; 4] = ["UTC", "Europe/Paris", "America/New_York", "Asia/Tokyo"];

pub const LINE_WIDTH_RANGE: (f32, f32) = (1.0, 10.0);
pub const SPEED_RANGE: (f32, f32) = (-2.0, 2.0);
pub const SPEED_STEP: f32 = 0.25;

const PANEL_WIDTH: f32 = 240.0;
const PANEL_MARGIN: f32 = 12.0;
const LABEL_SIZE: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// This channel's 8-bit sRGB value in `color`.
    pub fn get(self, color: Color) -> u8 {
        color.to_srgb_u8()[self.index()]
    }

    /// `color` with this channel replaced; alpha is kept.
    pub fn set(self, color: Color, value: u8) -> Color {
        let mut rgba = color.to_srgb_u8();
        rgba[self.index()] = value;
        Color::from_srgb_u8(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

/// A single edit made through the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    LineWidth(f32),
    Speed(f32),
    Channel(Channel, u8),
    Animate(bool),
    Timezone(String),
}

// ── DebugPanel ────────────────────────────────────────────────────────────

/// Builds the panel tree and collects the edits made through it.
#[derive(Debug, Default)]
pub struct DebugPanel {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel tree for this frame, pinned to the top-right corner.
    ///
    /// Labels are only shown with a font; the controls work without one.
    pub fn build(&self, params: &SceneParams, timezone: Tz, font: Option<FontId>) -> Element {
        let mut column = Column::new().spacing(6.0);

        column = labelled(column, font, "line width".to_string());
        column = column.child(
            Slider::new()
                .min(LINE_WIDTH_RANGE.0)
                .max(LINE_WIDTH_RANGE.1)
                .value(params.line_width)
                .on_change(self.sink(PanelEvent::LineWidth)),
        );

        column = labelled(column, font, format!("speed {:+.2}", params.speed));
        column = column.child(
            Slider::new()
                .min(SPEED_RANGE.0)
                .max(SPEED_RANGE.1)
                .step(SPEED_STEP)
                .value(params.speed)
                .on_change(self.sink(PanelEvent::Speed)),
        );

        column = labelled(column, font, format!("color {}", params.color.to_hex()));
        for channel in Channel::ALL {
            column = column.child(
                Slider::new()
                    .min(0.0)
                    .max(255.0)
                    .step(1.0)
                    .value(channel.get(params.color) as f32)
                    .fill_color(channel.set(Color::BLACK, 255))
                    .on_change(self.sink(move |v: f32| {
                        PanelEvent::Channel(channel, v.round().clamp(0.0, 255.0) as u8)
                    })),
            );
        }

        column = column.child(
            Checkbox::new()
                .label("animate")
                .font(font)
                .checked(params.animate)
                .on_change(self.sink(PanelEvent::Animate)),
        );

        column = labelled(column, font, "timezone".to_string());
        column = column.child(
            RadioGroup::new()
                .options(TIMEZONES.iter().map(|tz| RadioOption::new(*tz, *tz)))
                .selected(timezone.name())
                .font(font)
                .on_change(self.sink(PanelEvent::Timezone)),
        );

        let panel = Container::new()
            .width(PANEL_WIDTH)
            .padding_all(12.0)
            .background(Color::from_straight(0.05, 0.05, 0.08, 0.85))
            .border(Border::new(1.0, Color::from_straight(0.3, 0.35, 0.45, 1.0)))
            .corner_radius(8.0)
            .child(column);

        Anchored::top_right(panel, PANEL_MARGIN).into()
    }

    /// Drains the edits queued since the last call.
    pub fn take_events(&self) -> Vec<PanelEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn sink<T>(&self, map: impl Fn(T) -> PanelEvent + 'static) -> impl FnMut(T) + 'static {
        let events = Rc::clone(&self.events);
        move |v| events.borrow_mut().push(map(v))
    }
}

fn labelled(column: Column, font: Option<FontId>, label: String) -> Column {
    match font {
        Some(font) => column.child(Text::new(label, font, LABEL_SIZE, Color::from_straight(0.85, 0.85, 0.9, 1.0))),
        None => column,
    }
}

// ── Debug ─────────────────────────────────────────────────────────────────

/// Debug state: panel visibility and the selected timezone.
#[derive(Debug)]
pub struct Debug {
    active: bool,
    timezone: Tz,
    panel: Option<DebugPanel>,
}

impl Debug {
    /// Inactive, UTC.
    pub fn new() -> Self {
        Self { active: false, timezone: Tz::UTC, panel: None }
    }

    /// Active iff `fragment` is exactly `#debug`.
    pub fn from_fragment(fragment: &str) -> Self {
        let mut debug = Self::new();
        debug.set_active(fragment == DEBUG_FRAGMENT);
        debug
    }

    /// Shows or hides the panel, creating it on first activation.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active && self.panel.is_none() {
            log::debug!("creating debug panel");
            self.panel = Some(DebugPanel::new());
        }
    }

    pub fn toggle(&mut self) {
        self.set_active(!self.active);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The panel while active.
    pub fn panel(&self) -> Option<&DebugPanel> {
        self.panel.as_ref().filter(|_| self.active)
    }

    /// Whether the panel was ever created; it survives deactivation.
    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    /// Drains queued panel edits, active or not.
    pub fn take_panel_events(&self) -> Vec<PanelEvent> {
        self.panel.as_ref().map(DebugPanel::take_events).unwrap_or_default()
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    pub fn select_timezone(&mut self, tz: Tz) {
        if tz != self.timezone {
            log::info!("timezone: {} -> {}", self.timezone.name(), tz.name());
            self.timezone = tz;
        }
    }

    /// Selects an IANA timezone by name. Unknown names keep the current one.
    pub fn set_timezone(&mut self, name: &str) -> Result<(), TimeError> {
        match parse_timezone(name) {
            Ok(tz) => {
                self.select_timezone(tz);
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                Err(e)
            }
        }
    }
}

impl Default for Debug {
    fn default() -> Self {
        Self::new()
    }
}
