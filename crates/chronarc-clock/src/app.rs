use chronarc_engine::coords::Viewport;
use chronarc_engine::core::AppControl;
use chronarc_engine::input::Key;
use chronarc_engine::paint::Color;
use chronarc_engine::text::FontId;
use chronarc_ui::prelude::{Element, UiApp, UiFrame};

use crate::debug::{Debug, PanelEvent};
use crate::scenario::Scenario;

/// The clock as a UI application: scene every frame, debug panel on top.
pub struct ClockApp {
    scenario: Scenario,
    debug: Debug,
    font: Option<FontId>,
    size: Viewport,
}

impl ClockApp {
    pub fn new(scenario: Scenario, debug: Debug, font: Option<FontId>) -> Self {
        Self { scenario, debug, font, size: Viewport::default() }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn debug(&self) -> &Debug {
        &self.debug
    }

    fn apply(&mut self, event: PanelEvent) {
        let params = &mut self.scenario.params;
        match event {
            PanelEvent::LineWidth(w) => params.line_width = w,
            PanelEvent::Speed(s) => params.speed = s,
            PanelEvent::Channel(channel, v) => params.color = channel.set(params.color, v),
            PanelEvent::Animate(on) => params.animate = on,
            PanelEvent::Timezone(name) => {
                self.debug.set_timezone(&name).ok();
            }
        }
    }
}

impl UiApp for ClockApp {
    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    fn on_key(&mut self, key: Key) -> AppControl {
        match key {
            Key::Escape => return AppControl::Exit,
            Key::Space => {
                let params = &mut self.scenario.params;
                params.animate = !params.animate;
                log::debug!("animate: {}", params.animate);
            }
            Key::Char('d') => self.debug.toggle(),
            _ => {}
        }
        AppControl::Continue
    }

    fn frame(&mut self, frame: &mut UiFrame<'_>) -> Option<Element> {
        if frame.viewport != self.size {
            self.size = frame.viewport;
            self.scenario.resize(frame.viewport.width, frame.viewport.height);
        }

        let now = self.scenario.clock_time(self.debug.timezone());
        self.scenario.draw_update(frame.draw_list, frame.fonts, frame.time.dt, now);

        self.debug
            .panel()
            .map(|panel| panel.build(&self.scenario.params, self.debug.timezone(), self.font))
    }

    fn after_ui(&mut self) {
        for event in self.debug.take_panel_events() {
            self.apply(event);
        }
    }
}
