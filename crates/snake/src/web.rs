//! Browser host: `localStorage`, `setInterval`, canvas drawing and DOM wiring.
//!
//! Expects the page markup the portfolio ships: a `#snakeWidget` container
//! holding a `#snakeToggle` button, a `#snakeCanvas` canvas and optional
//! score, high-score, restart, pause and overlay elements.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent, Window};

use crate::cell::CellKind;
use crate::config::{clamp_pixel_ratio, GameConfig};
use crate::error::StorageError;
use crate::game::SnakeGame;
use crate::input::Input;
use crate::snapshot::Snapshot;
use crate::storage::Storage;
use crate::widget::{Timer, Widget};

const WIDGET_ID: &str = "snakeWidget";
const TOGGLE_ID: &str = "snakeToggle";
const CANVAS_ID: &str = "snakeCanvas";
const SCORE_ID: &str = "snakeScore";
const HIGH_ID: &str = "snakeHigh";
const RESTART_ID: &str = "snakeRestart";
const PAUSE_ID: &str = "snakePause";
const OVERLAY_ID: &str = "snakeOverlay";

const GRID_STROKE: &str = "rgba(255,255,255,0.05)";
const FOOD_FILL: &str = "#ff6b6b";
const HEAD_FILL: &str = "#fff";
const BODY_FILL: &str = "#4f8cff";

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// `window.localStorage`. Missing or blocked storage reports every call as unavailable.
#[derive(Debug)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        Self {
            inner: window.local_storage().ok().flatten(),
        }
    }

    fn store(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(js_message(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store()?
            .set_item(key, value)
            .map_err(|_| StorageError::Rejected { key: key.to_owned() })
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `setInterval` driving a single tick closure that is installed after construction.
#[derive(Debug)]
pub struct IntervalTimer {
    window: Window,
    callback: TickSlot,
}

impl Timer for IntervalTimer {
    type Handle = i32;

    fn schedule_repeating(&mut self, interval_ms: u32) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        let timeout = i32::try_from(interval_ms).unwrap_or(i32::MAX);
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|err| log::warn!("setInterval failed: {}", js_message(&err)))
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_interval_with_handle(handle);
    }
}

struct View {
    root: Element,
    toggle: Element,
    ctx: CanvasRenderingContext2d,
    score: Option<Element>,
    high: Option<Element>,
    overlay: Option<Element>,
}

impl View {
    fn mount(document: &Document, window: &Window, config: &GameConfig) -> Result<Self, JsValue> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
        };
        let root = find(WIDGET_ID)?;
        let toggle = find(TOGGLE_ID)?;
        let canvas: HtmlCanvasElement = find(CANVAS_ID)?.dyn_into()?;

        let dpr = clamp_pixel_ratio(window.device_pixel_ratio());
        let backing = (f64::from(config.logical_size) * dpr).round() as u32;
        canvas.set_width(backing);
        canvas.set_height(backing);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.scale(dpr, dpr)?;

        Ok(Self {
            root,
            toggle,
            ctx,
            score: document.get_element_by_id(SCORE_ID),
            high: document.get_element_by_id(HIGH_ID),
            overlay: document.get_element_by_id(OVERLAY_ID),
        })
    }

    fn sync_panel(&self, open: bool) {
        if let Err(err) = self.root.class_list().toggle_with_force("open", open) {
            log::warn!("panel class toggle failed: {}", js_message(&err));
        }
        let expanded = if open { "true" } else { "false" };
        if let Err(err) = self.toggle.set_attribute("aria-expanded", expanded) {
            log::warn!("aria-expanded update failed: {}", js_message(&err));
        }
    }

    fn draw(&self, snap: &Snapshot<'_>) {
        let size = f64::from(snap.logical_size);
        let cell = f64::from(snap.cell_size);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, size, size);

        ctx.set_stroke_style_str(GRID_STROKE);
        ctx.set_line_width(1.0);
        for i in 0..=snap.grid.cols {
            let x = f64::from(i) * cell + 0.5;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, size);
            ctx.stroke();
        }
        for j in 0..=snap.grid.rows {
            let y = f64::from(j) * cell + 0.5;
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(size, y);
            ctx.stroke();
        }

        for (pos, kind) in snap.cells() {
            let fill = match kind {
                CellKind::Food => FOOD_FILL,
                CellKind::Head => HEAD_FILL,
                CellKind::Body => BODY_FILL,
                CellKind::Empty => continue,
            };
            let rect = snap.cell_rect(pos, kind);
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        }

        if let Some(el) = &self.score {
            el.set_text_content(Some(&snap.score_label()));
        }
        if let Some(el) = &self.high {
            el.set_text_content(Some(&snap.high_score_label()));
        }
        if let Some(el) = &self.overlay {
            if let Err(err) = el.class_list().toggle_with_force("show", snap.overlay_visible()) {
                log::warn!("overlay class toggle failed: {}", js_message(&err));
            }
        }
    }
}

type WebWidget = Widget<LocalStorage, IntervalTimer>;

struct Shared {
    widget: WebWidget,
    view: View,
}

impl Shared {
    fn render(&self) {
        self.view.sync_panel(self.widget.is_open());
        self.view.draw(&self.widget.game().snapshot());
    }
}

/// Handle returned to the page script. Dropping it leaves the widget running.
#[wasm_bindgen]
pub struct SnakeWidget {
    shared: Rc<RefCell<Shared>>,
}

impl std::fmt::Debug for SnakeWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnakeWidget").finish_non_exhaustive()
    }
}

#[wasm_bindgen]
impl SnakeWidget {
    pub fn open(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.widget.open();
        shared.render();
    }

    pub fn close(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.widget.close();
        shared.render();
    }

    pub fn restart(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.widget.restart();
        shared.render();
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.shared.borrow().widget.game().score()
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.shared.borrow().widget.game().high_score()
    }
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn on_click(
    document: &Document,
    id: &str,
    shared: &Rc<RefCell<Shared>>,
    action: fn(&mut WebWidget),
) -> Result<(), JsValue> {
    let Some(el) = document.get_element_by_id(id) else {
        return Ok(());
    };
    let shared = Rc::clone(shared);
    listen(&el, "click", move |_: web_sys::MouseEvent| {
        let mut shared = shared.borrow_mut();
        action(&mut shared.widget);
        shared.render();
    })
}

/// Wire the widget into the page. The game starts the first time the panel opens.
///
/// # Errors
///
/// Fails if there is no window or document, a required element is missing, or
/// the canvas has no 2d context.
#[wasm_bindgen]
pub fn mount() -> Result<SnakeWidget, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = GameConfig::default();
    let view = View::mount(&document, &window, &config)?;

    let storage = LocalStorage::new(&window);
    let rng = XorShiftRng::seed_from_u64(random_seed());
    let game = SnakeGame::new(config, storage, rng).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let slot: TickSlot = Rc::new(RefCell::new(None));
    let timer = IntervalTimer {
        window: window.clone(),
        callback: Rc::clone(&slot),
    };
    let shared = Rc::new(RefCell::new(Shared {
        widget: Widget::new(game, timer),
        view,
    }));

    let tick_target = Rc::clone(&shared);
    *slot.borrow_mut() = Some(Closure::new(move || {
        let mut shared = tick_target.borrow_mut();
        shared.widget.tick();
        shared.render();
    }));

    on_click(&document, TOGGLE_ID, &shared, WebWidget::toggle_open)?;
    on_click(&document, RESTART_ID, &shared, |w| {
        w.handle_input(Input::Restart);
    })?;
    on_click(&document, PAUSE_ID, &shared, |w| {
        w.handle_input(Input::TogglePause);
    })?;

    let key_target = Rc::clone(&shared);
    listen(&window, "keydown", move |event: KeyboardEvent| {
        let Some(input) = Input::from_key(&event.key()) else {
            return;
        };
        let mut shared = key_target.borrow_mut();
        if shared.widget.handle_input(input) {
            event.prevent_default();
        }
        shared.render();
    })?;

    log::debug!("snake widget mounted");
    Ok(SnakeWidget { shared })
}

/// Forwards `log` records to the browser console.
#[derive(Debug)]
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Module entry point: installs the console logger and, if enabled, the panic hook.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
