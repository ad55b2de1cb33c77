//! Browser binding: `GridView`, exported to JavaScript.
//!
//! Builds the DOM for one grid inside a host element:
//! - three canvases (column header, row header, content), one per layer
//! - two scrollbar tracks with thumbs, plus the corner filler
//!
//! and wires pointer, wheel, keyboard and window-resize listeners to the
//! `GridEngine`. Pointer release is listened for on the document so drags
//! end even when the pointer leaves the grid. Auto-scroll runs on
//! `requestAnimationFrame` and is cancelled on every release.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlCanvasElement, HtmlDivElement, HtmlElement,
    KeyboardEvent, PointerEvent, WheelEvent,
};

use super::clipboard::copy_to_clipboard;
use super::{EventOutcome, GridEngine, KeyOutcome, ScrollbarAxis, ThumbState};
use crate::error::GridError;
use crate::render::{CanvasSurface, Layers};
use crate::types::GridConfig;

const RELEASE_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

/// Scrollbar DOM elements.
struct ScrollbarDom {
    v_track: HtmlDivElement,
    v_thumb: HtmlDivElement,
    h_track: HtmlDivElement,
    h_thumb: HtmlDivElement,
    corner: HtmlDivElement,
}

/// Shared state that can be accessed by event handlers
pub(crate) struct SharedState {
    engine: GridEngine<CanvasSurface>,
    container: HtmlElement,
    canvases: [HtmlCanvasElement; 3],
    scrollbars: ScrollbarDom,
    captured_pointer: Option<i32>,
    raf_id: Option<i32>,
    raf_closure: Option<Closure<dyn FnMut()>>,
}

/// The grid view exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    state: Rc<RefCell<SharedState>>,
    // Listener closures live as long as the view; `Drop` detaches them
    pointer_down_closure: Closure<dyn FnMut(PointerEvent)>,
    pointer_move_closure: Closure<dyn FnMut(PointerEvent)>,
    /// Registered on the document for both `pointerup` and `pointercancel`
    pointer_release_closure: Closure<dyn FnMut(PointerEvent)>,
    wheel_closure: Closure<dyn FnMut(WheelEvent)>,
    key_closure: Closure<dyn FnMut(KeyboardEvent)>,
    resize_closure: Closure<dyn FnMut(web_sys::Event)>,
}

fn document() -> Result<Document, GridError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GridError::Render("No document available".to_string()))
}

fn create_div(document: &Document) -> Result<HtmlDivElement, GridError> {
    document
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
        .ok_or_else(|| GridError::Render("Failed to create div".to_string()))
}

fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, GridError> {
    document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| GridError::Render("Failed to create canvas".to_string()))
}

/// Absolutely position an element inside the container.
fn place(el: &HtmlElement, left: f64, top: f64, width: Option<f64>, height: Option<f64>) {
    let style = el.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("left", &format!("{}px", left));
    let _ = style.set_property("top", &format!("{}px", top));
    if let Some(w) = width {
        let _ = style.set_property("width", &format!("{}px", w));
    }
    if let Some(h) = height {
        let _ = style.set_property("height", &format!("{}px", h));
    }
}

fn detach<T: ?Sized + WasmClosure>(target: &EventTarget, event: &str, closure: &Closure<T>) {
    let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
}

/// Pointer position relative to the container.
fn local_point(container: &HtmlElement, client_x: i32, client_y: i32) -> (f64, f64) {
    let rect = container.get_bounding_client_rect();
    (
        f64::from(client_x) - rect.left(),
        f64::from(client_y) - rect.top(),
    )
}

impl SharedState {
    /// Position canvases and scrollbar tracks from the current config and
    /// viewport.
    fn layout_dom(&self) {
        let config = self.engine.config();
        let hw = config.header_width;
        let hh = config.header_height;
        let sb = config.scrollbar_size;
        let content = self.engine.content_rect();

        let [col_header, row_header, content_canvas] = &self.canvases;
        place(col_header, hw, 0.0, None, None);
        place(row_header, 0.0, hh, None, None);
        place(content_canvas, hw, hh, None, None);

        let bars = &self.scrollbars;
        place(&bars.v_track, content.right(), hh, Some(sb), Some(content.h));
        place(&bars.h_track, hw, content.bottom(), Some(content.w), Some(sb));
        place(&bars.corner, content.right(), content.bottom(), Some(sb), Some(sb));
    }

    /// Mirror the engine's scrollbar state into the DOM.
    fn sync_scrollbars(&self) {
        let sync = self.engine.scrollbars();
        let colors = &self.engine.config().colors;

        let apply = |track: &HtmlDivElement, thumb: &HtmlDivElement, bar: &ScrollbarAxis, vertical: bool| {
            let track_style = track.style();
            let Some(metrics) = bar.thumb() else {
                let _ = track_style.set_property("display", "none");
                return;
            };
            let _ = track_style.set_property("display", "block");
            let thumb_style = thumb.style();
            let (pos_prop, len_prop) = if vertical { ("top", "height") } else { ("left", "width") };
            let _ = thumb_style.set_property(pos_prop, &format!("{}px", metrics.position));
            let _ = thumb_style.set_property(len_prop, &format!("{}px", metrics.length));
            let color = match bar.state() {
                ThumbState::Idle => &colors.scrollbar_thumb,
                ThumbState::Hover => &colors.scrollbar_thumb_hover,
                ThumbState::Dragging => &colors.scrollbar_thumb_active,
            };
            let _ = thumb_style.set_property("background", color);
        };

        let bars = &self.scrollbars;
        apply(&bars.v_track, &bars.v_thumb, &sync.vertical, true);
        apply(&bars.h_track, &bars.h_thumb, &sync.horizontal, false);
        let corner = if sync.corner_visible() { "block" } else { "none" };
        let _ = bars.corner.style().set_property("display", corner);
    }

    fn stop_auto_scroll(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn release_pointer(&mut self) {
        if let Some(id) = self.captured_pointer.take() {
            let _ = self.container.release_pointer_capture(id);
        }
    }
}

impl GridView {
    fn build_scrollbars(document: &Document, config: &GridConfig) -> Result<ScrollbarDom, GridError> {
        let bars = ScrollbarDom {
            v_track: create_div(document)?,
            v_thumb: create_div(document)?,
            h_track: create_div(document)?,
            h_thumb: create_div(document)?,
            corner: create_div(document)?,
        };
        let sb = config.scrollbar_size;
        for track in [&bars.v_track, &bars.h_track, &bars.corner] {
            let style = track.style();
            let _ = style.set_property("background", &config.colors.scrollbar_track);
            let _ = style.set_property("box-sizing", "border-box");
        }
        for (thumb, vertical) in [(&bars.v_thumb, true), (&bars.h_thumb, false)] {
            let style = thumb.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("border-radius", &format!("{}px", sb / 2.0));
            let _ = style.set_property("background", &config.colors.scrollbar_thumb);
            let _ = style.set_property("pointer-events", "none");
            let (cross_pos, cross_len) = if vertical { ("left", "width") } else { ("top", "height") };
            let _ = style.set_property(cross_pos, "3px");
            let _ = style.set_property(cross_len, &format!("{}px", (sb - 6.0).max(1.0)));
        }
        let _ = bars.v_track.append_child(&bars.v_thumb);
        let _ = bars.h_track.append_child(&bars.h_thumb);
        Ok(bars)
    }

    /// Kick off the per-frame auto-scroll loop if it is not running yet.
    fn start_auto_scroll(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.raf_id.is_some() {
            return;
        }
        if s.raf_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridView::auto_scroll_frame(&state);
                }
            }) as Box<dyn FnMut()>);
            s.raf_closure = Some(closure);
        }
        let Some(callback) = s.raf_closure.as_ref() else {
            return;
        };
        let id = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok();
        s.raf_id = id;
    }

    fn auto_scroll_frame(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        s.raf_id = None;
        let keep_going = s.engine.auto_scroll_tick();
        s.sync_scrollbars();
        if !keep_going {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = s.raf_closure.as_ref() {
            let id = window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok();
            s.raf_id = id;
        }
    }

    fn handle_outcome(state: &Rc<RefCell<SharedState>>, outcome: EventOutcome, pointer_id: i32) {
        if outcome.capture_pointer {
            let mut s = state.borrow_mut();
            if s.container.set_pointer_capture(pointer_id).is_ok() {
                s.captured_pointer = Some(pointer_id);
            }
        }
        if outcome.start_auto_scroll {
            Self::start_auto_scroll(state);
        }
        state.borrow().sync_scrollbars();
    }

    fn internal_pointer_up(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        s.engine.pointer_up();
        s.stop_auto_scroll();
        s.release_pointer();
        s.sync_scrollbars();
    }

    fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        let width = f64::from(s.container.client_width());
        let height = f64::from(s.container.client_height());
        s.engine.resize(width, height);
        s.layout_dom();
        s.sync_scrollbars();
    }

    fn create(container: HtmlElement, config: GridConfig) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let document = document()?;
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());

        // Ensure the container has position for absolute children
        let container_style = container.style();
        if container_style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = container_style.set_property("position", "relative");
        }
        let _ = container_style.set_property("overflow", "hidden");
        let _ = container_style.set_property("touch-action", "none");
        let _ = container_style.set_property("user-select", "none");
        let _ = container.set_attribute("tabindex", "0");

        let canvases = [
            create_canvas(&document)?,
            create_canvas(&document)?,
            create_canvas(&document)?,
        ];
        for canvas in &canvases {
            let _ = container.append_child(canvas);
        }
        let scrollbars = Self::build_scrollbars(&document, &config)?;
        let _ = container.append_child(&scrollbars.v_track);
        let _ = container.append_child(&scrollbars.h_track);
        let _ = container.append_child(&scrollbars.corner);

        let [col_header, row_header, content] = &canvases;
        let layers = Layers {
            col_header: CanvasSurface::new(col_header.clone(), dpr)?,
            row_header: CanvasSurface::new(row_header.clone(), dpr)?,
            content: CanvasSurface::new(content.clone(), dpr)?,
        };

        let width = f64::from(container.client_width());
        let height = f64::from(container.client_height());
        let engine = GridEngine::new(config, layers, width, height);
        tracing::debug!(target: "gridview::web", width, height, dpr, "grid view created");

        let state = Rc::new(RefCell::new(SharedState {
            engine,
            container: container.clone(),
            canvases,
            scrollbars,
            captured_pointer: None,
            raf_id: None,
            raf_closure: None,
        }));
        {
            let s = state.borrow();
            s.layout_dom();
            s.sync_scrollbars();
        }

        // Pointer down
        let pointer_down_closure = {
            let state = state.clone();
            let container_ref = container.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                if event.button() != 0 {
                    return;
                }
                let (x, y) = local_point(&container_ref, event.client_x(), event.client_y());
                let _ = container_ref.focus();
                let outcome = state.borrow_mut().engine.pointer_down(x, y);
                if outcome.capture_pointer || outcome.rendered {
                    event.prevent_default();
                }
                Self::handle_outcome(&state, outcome, event.pointer_id());
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .ok();
            closure
        };

        // Pointer move (drags + cursor affordance)
        let pointer_move_closure = {
            let state = state.clone();
            let container_ref = container.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                let (x, y) = local_point(&container_ref, event.client_x(), event.client_y());
                let (outcome, cursor) = {
                    let mut s = state.borrow_mut();
                    let outcome = s.engine.pointer_move(x, y);
                    (outcome, s.engine.cursor_at(x, y))
                };
                let _ = container_ref.style().set_property("cursor", cursor.as_css());
                Self::handle_outcome(&state, outcome, event.pointer_id());
            }) as Box<dyn FnMut(PointerEvent)>);
            container
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
                .ok();
            closure
        };

        // Pointer up/cancel on the document, so release outside the grid still ends drags
        let pointer_release_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: PointerEvent| {
                Self::internal_pointer_up(&state);
            }) as Box<dyn FnMut(PointerEvent)>);
            for event_name in RELEASE_EVENTS {
                document
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                    .ok();
            }
            closure
        };

        // Wheel (non-passive so page scroll can be suppressed)
        let wheel_closure = {
            let state = state.clone();
            let container_ref = container.clone();
            let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
                event.prevent_default();
                let (x, y) = local_point(&container_ref, event.client_x(), event.client_y());
                let mut s = state.borrow_mut();
                if s.engine.wheel(x, y, event.delta_x(), event.delta_y()) {
                    s.sync_scrollbars();
                }
            }) as Box<dyn FnMut(WheelEvent)>);
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            container
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "wheel",
                    closure.as_ref().unchecked_ref(),
                    &options,
                )
                .ok();
            closure
        };

        // Keyboard: navigation + Ctrl/Cmd+C
        let key_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let modifier = event.ctrl_key() || event.meta_key();
                let outcome = state
                    .borrow_mut()
                    .engine
                    .key_down(&event.key(), event.shift_key(), modifier);
                match outcome {
                    KeyOutcome::Ignored => return,
                    KeyOutcome::Handled => {}
                    KeyOutcome::Copy(text) => copy_to_clipboard(&text),
                }
                event.prevent_default();
                state.borrow().sync_scrollbars();
            }) as Box<dyn FnMut(KeyboardEvent)>);
            container
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            closure
        };

        // Window resize
        let resize_closure = {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                Self::internal_resize(&state);
            }) as Box<dyn FnMut(web_sys::Event)>);
            if let Some(window) = web_sys::window() {
                window
                    .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                    .ok();
            }
            closure
        };

        Ok(GridView {
            state,
            pointer_down_closure,
            pointer_move_closure,
            pointer_release_closure,
            wheel_closure,
            key_closure,
            resize_closure,
        })
    }
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid with the default configuration inside `container`.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> Result<GridView, JsValue> {
        Self::create(container, GridConfig::default())
    }

    /// Create a grid with a configuration object (camelCase keys; missing
    /// keys take their defaults).
    #[wasm_bindgen(js_name = "newWithConfig")]
    pub fn new_with_config(container: HtmlElement, config: JsValue) -> Result<GridView, JsValue> {
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::create(container, config)
    }

    /// Redraw all layers
    #[wasm_bindgen]
    pub fn render(&self) {
        self.state.borrow_mut().engine.render();
    }

    /// Re-measure the container (call after layout changes)
    #[wasm_bindgen]
    pub fn resize(&self) {
        Self::internal_resize(&self.state);
    }

    /// Replace the grid data with a JSON array of records. Returns the
    /// number of data rows written.
    #[wasm_bindgen(js_name = "loadJson")]
    pub fn load_json(&self, json: &str) -> Result<u32, JsValue> {
        let summary = self.state.borrow_mut().engine.load_json(json)?;
        Ok(summary.rows)
    }

    /// Clear data, sizes, selection and scroll
    #[wasm_bindgen(js_name = "clearData")]
    pub fn clear_data(&self) {
        let mut s = self.state.borrow_mut();
        s.stop_auto_scroll();
        s.release_pointer();
        s.engine.clear_data();
        s.sync_scrollbars();
    }

    #[wasm_bindgen(js_name = "getCellData")]
    pub fn get_cell_data(&self, row: u32, col: u32) -> String {
        self.state.borrow().engine.get_cell_data(row, col).to_string()
    }

    #[wasm_bindgen(js_name = "setCellData")]
    pub fn set_cell_data(&self, row: u32, col: u32, value: String) {
        self.state.borrow_mut().engine.set_cell_data(row, col, value);
    }

    #[wasm_bindgen(js_name = "scrollToCell")]
    pub fn scroll_to_cell(&self, row: u32, col: u32) {
        let mut s = self.state.borrow_mut();
        s.engine.scroll_to_cell(row, col);
        s.sync_scrollbars();
    }

    #[wasm_bindgen(js_name = "selectCell")]
    pub fn select_cell(&self, row: u32, col: u32) {
        self.state.borrow_mut().engine.select_cell(row, col);
    }

    #[wasm_bindgen(js_name = "selectRow")]
    pub fn select_row(&self, row: u32) {
        self.state.borrow_mut().engine.select_row(row);
    }

    #[wasm_bindgen(js_name = "selectColumn")]
    pub fn select_column(&self, col: u32) {
        self.state.borrow_mut().engine.select_column(col);
    }

    /// Select by reference, e.g. "B3" or "A1:C4"
    #[wasm_bindgen(js_name = "selectRef")]
    pub fn select_ref(&self, reference: &str) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.engine.select_ref(reference)?;
        s.sync_scrollbars();
        Ok(())
    }

    /// Selected range as TSV
    #[wasm_bindgen(js_name = "getSelectedText")]
    pub fn get_selected_text(&self) -> Option<String> {
        self.state.borrow().engine.copy_selection()
    }

    #[wasm_bindgen(js_name = "totalRows")]
    pub fn total_rows(&self) -> u32 {
        self.state.borrow().engine.total_rows()
    }

    #[wasm_bindgen(js_name = "totalCols")]
    pub fn total_cols(&self) -> u32 {
        self.state.borrow().engine.total_cols()
    }

    #[wasm_bindgen(js_name = "widthOf")]
    pub fn width_of(&self, col: u32) -> f64 {
        self.state.borrow().engine.width_of(col)
    }

    #[wasm_bindgen(js_name = "heightOf")]
    pub fn height_of(&self, row: u32) -> f64 {
        self.state.borrow().engine.height_of(row)
    }

    #[wasm_bindgen(js_name = "visibleRows")]
    pub fn visible_rows(&self) -> u32 {
        self.state.borrow().engine.visible_rows()
    }

    #[wasm_bindgen(js_name = "visibleCols")]
    pub fn visible_cols(&self) -> u32 {
        self.state.borrow().engine.visible_cols()
    }
}

impl Drop for GridView {
    /// Detach every listener and remove the elements this view appended, so
    /// the host container is left as it was found.
    fn drop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.stop_auto_scroll();
        s.raf_closure = None;
        s.release_pointer();

        let container: &EventTarget = &s.container;
        detach(container, "pointerdown", &self.pointer_down_closure);
        detach(container, "pointermove", &self.pointer_move_closure);
        detach(container, "wheel", &self.wheel_closure);
        detach(container, "keydown", &self.key_closure);
        if let Ok(document) = document() {
            for event_name in RELEASE_EVENTS {
                detach(&document, event_name, &self.pointer_release_closure);
            }
        }
        if let Some(window) = web_sys::window() {
            detach(&window, "resize", &self.resize_closure);
        }

        for canvas in &s.canvases {
            canvas.remove();
        }
        let bars = &s.scrollbars;
        for el in [&bars.v_track, &bars.h_track, &bars.corner] {
            el.remove();
        }
        tracing::debug!(target: "gridview::web", "grid view detached");
    }
}
