use std::collections::HashMap;

use anyhow::Result;
use winit::dpi::LogicalSize;

use chronarc_engine::coords::{Vec2, Viewport};
use chronarc_engine::core::{App as EngineApp, AppControl, FrameCtx};
use chronarc_engine::device::GpuInit;
use chronarc_engine::input::{Key, MouseButton};
use chronarc_engine::paint::Color;
use chronarc_engine::render::SceneRenderer;
use chronarc_engine::scene::DrawList;
use chronarc_engine::text::{FontId, FontSystem};
use chronarc_engine::time::FrameTime;
use chronarc_engine::window::{Runtime, RuntimeConfig};

use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// Name-keyed map of loaded font handles.
///
/// Passed to the builder closure in [`Application::run`] so the application
/// can retrieve [`FontId`] values by name.
#[derive(Debug, Clone, Default)]
pub struct FontMap(pub(crate) HashMap<String, FontId>);

impl FontMap {
    /// Returns the font registered under `name`, or `None` if the name was
    /// not registered or the font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── UiApp ─────────────────────────────────────────────────────────────────

/// Per-frame recording surface handed to [`UiApp::frame`].
pub struct UiFrame<'a> {
    /// Cleared at the start of the frame; overlay widgets are appended after.
    pub draw_list: &'a mut DrawList,
    pub fonts: &'a FontSystem,
    /// Window size in logical pixels.
    pub viewport: Viewport,
    pub time: FrameTime,
}

/// Application contract for [`Application::run`].
pub trait UiApp: 'static {
    /// Surface clear color.
    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    /// Called for every key that went down this frame, before [`frame`](Self::frame).
    fn on_key(&mut self, _key: Key) -> AppControl {
        AppControl::Continue
    }

    /// Records this frame's shapes and returns the overlay widget tree, if any.
    fn frame(&mut self, frame: &mut UiFrame<'_>) -> Option<Element>;

    /// Called once the overlay has received this frame's pointer events.
    fn after_ui(&mut self) {}
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("chronarc")
///     .size(1280.0, 720.0)
///     .font("body", bytes)
///     .run(|fonts: &FontMap| Clock::new(fonts.get("body")))?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    fonts: Vec<(String, Vec<u8>)>,
    gpu_init: GpuInit,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "chronarc".to_string(),
            width: 1280.0,
            height: 720.0,
            fonts: Vec::new(),
            gpu_init: GpuInit::default(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Registers a named font; retrieve it with [`FontMap::get`].
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    pub fn gpu_init(mut self, gpu_init: GpuInit) -> Self {
        self.gpu_init = gpu_init;
        self
    }

    /// Loads the fonts, builds the app with `build` and runs the event loop
    /// until the window closes or the app asks to exit.
    pub fn run<A, F>(self, build: F) -> Result<()>
    where
        A: UiApp,
        F: FnOnce(&FontMap) -> A,
    {
        let mut scene = UiScene::new();
        let font_map = load_fonts(&mut scene, &self.fonts);
        let app = build(&font_map);

        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState { app, scene, renderer: SceneRenderer::new() };
        Runtime::run(config, self.gpu_init, state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn load_fonts(scene: &mut UiScene, fonts: &[(String, Vec<u8>)]) -> FontMap {
    let mut map = HashMap::new();
    for (name, bytes) in fonts {
        match scene.load_font(bytes) {
            Ok(id) => {
                map.insert(name.clone(), id);
            }
            Err(e) => log::warn!("failed to load font '{name}': {e}"),
        }
    }
    FontMap(map)
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Implements the engine `App`; owns the scene and the renderers.
struct UiAppState<A: UiApp> {
    app: A,
    scene: UiScene,
    renderer: SceneRenderer,
}

impl<A: UiApp> EngineApp for UiAppState<A> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for key in ctx.input_frame.keys_pressed.iter().copied() {
            if self.app.on_key(key) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        let viewport = ctx.window.logical_size();
        let (mx, my) = ctx.input.pointer_pos.unwrap_or((-1.0, -1.0));
        let ui_input = UiInput {
            mouse_pos: Vec2::new(mx, my),
            mouse_pressed: ctx.input.button_down(MouseButton::Left),
            mouse_went_down: ctx.input_frame.buttons_pressed.contains(&MouseButton::Left),
            mouse_clicked: ctx.input_frame.buttons_released.contains(&MouseButton::Left),
        };

        // ── record ────────────────────────────────────────────────────────
        self.scene.begin_frame();
        let overlay = {
            let mut frame = UiFrame {
                draw_list: &mut self.scene.draw_list,
                fonts: &self.scene.font_system,
                viewport,
                time: ctx.time,
            };
            self.app.frame(&mut frame)
        };
        self.scene.frame(overlay, viewport.size(), &ui_input);
        self.app.after_ui();

        // ── render ────────────────────────────────────────────────────────
        let clear = self.app.clear_color();
        let draw_list = &mut self.scene.draw_list;
        let fonts = &self.scene.font_system;
        let renderer = &mut self.renderer;

        ctx.render(clear, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }
}
