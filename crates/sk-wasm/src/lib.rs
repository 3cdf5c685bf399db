//! WASM bridge for Sketch: exposes the Rust drawing surface to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer
//! and touch events in client coordinates; translation into canvas pixels,
//! stroke rendering, history and generation bookkeeping all happen here.

mod render2d;
mod svg;

use render2d::Canvas2dSurface;
use sk_core::config::SurfaceConfig;
use sk_core::model::BrushKind;
use sk_core::viewport::{CanvasViewport, ClientRect};
use sk_editor::DrawingSurface;
use sk_editor::generate::GenerationSession;
use sk_editor::input::{InputEvent, primary_button_down};
use sk_editor::shortcuts::{ShortcutAction, ShortcutMap};
use sk_render::drawing_bounds;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// Holds the drawing surface, the client → canvas viewport, and the
/// generation session. All interaction from the page goes through this
/// struct.
#[wasm_bindgen]
pub struct SketchCanvas {
    surface: DrawingSurface,
    viewport: CanvasViewport,
    generation: GenerationSession,
}

#[wasm_bindgen]
impl SketchCanvas {
    /// Create a controller for a canvas displayed at `width × height` CSS
    /// pixels. `config_json` may be empty or a partial `SurfaceConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: &str) -> Result<SketchCanvas, JsError> {
        // Set up panic hook and logger for better messages in console
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = SurfaceConfig::from_json(config_json)?;
        let viewport = CanvasViewport::for_display(width, height, config.scale_factor);
        log::info!(
            "sketch canvas {}x{} (backing {}x{})",
            width,
            height,
            viewport.canvas_width,
            viewport.canvas_height
        );

        Ok(Self {
            surface: DrawingSurface::new(config),
            viewport,
            generation: GenerationSession::new(),
        })
    }

    /// Backing-store width; assign to `canvas.width`.
    pub fn canvas_width(&self) -> f64 {
        self.viewport.canvas_width as f64
    }

    /// Backing-store height; assign to `canvas.height`.
    pub fn canvas_height(&self) -> f64 {
        self.viewport.canvas_height as f64
    }

    /// Update the canvas element's `getBoundingClientRect()`.
    pub fn set_bounding_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.viewport.set_rect(ClientRect {
            left,
            top,
            width,
            height,
        });
    }

    /// Resize the display. Resizing a canvas wipes it, so the history is
    /// replayed onto the new backing store. A stroke in progress is
    /// dropped since its painted part cannot be restored.
    pub fn resize(&mut self, ctx: &CanvasRenderingContext2d, width: f32, height: f32) {
        self.viewport =
            CanvasViewport::for_display(width, height, self.surface.config().scale_factor);
        self.surface.abandon_stroke();
        let mut target = self.target(ctx);
        self.surface.repaint(&mut target);
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Handle pointer down / touch start. Returns true if a stroke began.
    pub fn handle_pointer_down(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        client_x: f32,
        client_y: f32,
        force: Option<f32>,
    ) -> bool {
        let p = self.viewport.to_canvas(client_x, client_y);
        self.dispatch(ctx, InputEvent::from_pointer_down(p.x, p.y, force))
    }

    /// Handle the pointer entering the canvas. Starts a stroke when the
    /// primary button is still held.
    pub fn handle_pointer_enter(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        client_x: f32,
        client_y: f32,
        force: Option<f32>,
        buttons: u16,
    ) -> bool {
        if !primary_button_down(buttons) {
            return false;
        }
        self.handle_pointer_down(ctx, client_x, client_y, force)
    }

    /// Handle pointer move / touch move. Returns true if anything was
    /// painted.
    pub fn handle_pointer_move(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        client_x: f32,
        client_y: f32,
        force: Option<f32>,
    ) -> bool {
        let p = self.viewport.to_canvas(client_x, client_y);
        self.dispatch(ctx, InputEvent::from_pointer_move(p.x, p.y, force))
    }

    /// Handle pointer up / touch end. Returns true if a stroke ended.
    pub fn handle_pointer_up(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        client_x: f32,
        client_y: f32,
    ) -> bool {
        let p = self.viewport.to_canvas(client_x, client_y);
        self.dispatch(ctx, InputEvent::from_pointer_up(p.x, p.y))
    }

    /// Handle touch cancel / pointer leaving the canvas.
    pub fn handle_cancel(&mut self, ctx: &CanvasRenderingContext2d) -> bool {
        self.dispatch(ctx, InputEvent::Cancel)
    }

    pub fn is_drawing(&self) -> bool {
        self.surface.is_drawing()
    }

    // ─── Edit ────────────────────────────────────────────────────────────

    /// Undo the last stroke.
    pub fn undo(&mut self, ctx: &CanvasRenderingContext2d) -> bool {
        let mut target = self.target(ctx);
        self.surface.undo(&mut target)
    }

    /// Redo the last undone stroke.
    pub fn redo(&mut self, ctx: &CanvasRenderingContext2d) -> bool {
        let mut target = self.target(ctx);
        self.surface.redo(&mut target)
    }

    /// Wipe the canvas, the history, and the last generated result.
    pub fn clear(&mut self, ctx: &CanvasRenderingContext2d) {
        let mut target = self.target(ctx);
        self.surface.clear(&mut target);
        self.generation.reset_result();
    }

    /// Replay the whole history onto the canvas.
    pub fn repaint(&mut self, ctx: &CanvasRenderingContext2d) {
        let mut target = self.target(ctx);
        self.surface.repaint(&mut target);
    }

    pub fn is_blank(&self) -> bool {
        self.surface.is_blank()
    }

    pub fn can_undo(&self) -> bool {
        self.surface.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.surface.can_redo()
    }

    pub fn stroke_count(&self) -> usize {
        self.surface.strokes().len()
    }

    /// Handle a key event. Returns the name of the triggered action, or an
    /// empty string. `"save"` is returned for the host to capture and
    /// submit the canvas.
    pub fn handle_key(
        &mut self,
        ctx: &CanvasRenderingContext2d,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return String::new();
        };
        match action {
            ShortcutAction::Undo => {
                self.undo(ctx);
            }
            ShortcutAction::Redo => {
                self.redo(ctx);
            }
            ShortcutAction::Clear => self.clear(ctx),
            ShortcutAction::BrushPen => {
                self.surface.set_brush(BrushKind::Pen);
            }
            ShortcutAction::BrushBristle => {
                self.surface.set_brush(BrushKind::Bristle);
            }
            ShortcutAction::Save => {}
        }
        action.name().to_string()
    }

    // ─── Brush settings ──────────────────────────────────────────────────

    /// Set the stroke color from a hex string. Returns false (and keeps
    /// the current color) if it does not parse.
    pub fn set_color(&mut self, hex: &str) -> bool {
        self.surface.set_color_hex(hex)
    }

    pub fn get_color(&self) -> String {
        self.surface.color().to_hex()
    }

    /// Switch brush by name (`"pen"` or `"bristle"`).
    pub fn set_brush(&mut self, name: &str) -> bool {
        match BrushKind::from_name(name) {
            Some(kind) => self.surface.set_brush(kind),
            None => {
                log::warn!("unknown brush `{name}`");
                false
            }
        }
    }

    pub fn get_brush_name(&self) -> String {
        self.surface.brush_kind().name().to_string()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Export the drawing as an SVG document.
    pub fn export_svg(&self, crop: bool) -> String {
        svg::render_svg(
            self.surface.strokes(),
            self.canvas_width(),
            self.canvas_height(),
            crop,
        )
    }

    /// Canvas-space bounds of everything drawn, as JSON
    /// `{"x":..,"y":..,"width":..,"height":..}`, or `null` when blank.
    pub fn get_drawing_bounds(&self) -> String {
        match drawing_bounds(self.surface.strokes()) {
            Some(r) => serde_json::json!({
                "x": r.x0,
                "y": r.y0,
                "width": r.width(),
                "height": r.height(),
            })
            .to_string(),
            None => "null".to_string(),
        }
    }

    /// The committed stroke history as JSON.
    pub fn get_history_json(&self) -> String {
        serde_json::to_string(self.surface.strokes()).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Image generation ────────────────────────────────────────────────

    /// Validate a submission and mark it in flight. `image_data_url` is the
    /// canvas capture; it is ignored while the canvas is blank.
    ///
    /// Returns JSON `{"ok":true,"request":{...}}` for the host to send, or
    /// `{"ok":false,"error":"..."}`.
    pub fn begin_generation(&mut self, prompt: &str, image_data_url: &str) -> String {
        let image = (!self.surface.is_blank()).then_some(image_data_url);
        match self.generation.begin(prompt, image) {
            Ok(request) => serde_json::json!({ "ok": true, "request": request }).to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// Hand back the service's response body. Returns JSON
    /// `{"ok":true,"url":"..."}` or `{"ok":false,"error":"..."}`.
    pub fn finish_generation(&mut self, response_json: &str) -> String {
        match self.generation.complete(response_json) {
            Ok(url) => serde_json::json!({ "ok": true, "url": url }).to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// Report a transport failure for the in-flight request.
    pub fn fail_generation(&mut self, message: &str) {
        self.generation.fail(message);
    }

    pub fn is_generating(&self) -> bool {
        self.generation.state() == sk_editor::generate::GenerationState::Pending
    }

    /// URL of the latest generated image, or empty string.
    pub fn result_url(&self) -> String {
        self.generation.result_url().unwrap_or_default().to_string()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl SketchCanvas {
    fn target<'a>(&self, ctx: &'a CanvasRenderingContext2d) -> Canvas2dSurface<'a> {
        Canvas2dSurface::new(ctx, self.canvas_width(), self.canvas_height())
    }

    fn dispatch(&mut self, ctx: &CanvasRenderingContext2d, event: InputEvent) -> bool {
        let mut target = self.target(ctx);
        self.surface.handle(&event, &mut target)
    }
}

fn error_json(e: &dyn std::error::Error) -> String {
    serde_json::json!({ "ok": false, "error": e.to_string() }).to_string()
}

// ─── Panic hook and logger for WASM debugging ────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sketch WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Forwards `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());
        let msg = JsValue::from_str(&msg);
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        // Already installed on a second canvas; keep the first.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

/// Raise or lower console verbosity (`"error"` … `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}
