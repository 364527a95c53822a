//! DOM scaffolding for the dashboard: header, panels, map container and their listeners.

use protocol::PositionRecord;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement};

use crate::shell::{
    APP_TITLE, HISTORY_PLACEHOLDER, LIVE_TOGGLE_LABEL, POSITIONS_PLACEHOLDER, position_label,
};

pub const APP_ROOT_ID: &str = "app";
pub const MAP_CONTAINER_ID: &str = "map";

/// Event listener removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// `setInterval` registration cleared on drop.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(tick);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// Callbacks the view forwards user input to.
pub struct Handlers {
    pub toggle_live: fn(),
    pub history_search: fn(String),
    pub select_route: fn(String),
    pub positions_search: fn(String),
    pub focus_position: fn(String),
}

/// Elements built inside `#app`. Dropping the view detaches listeners and empties the root.
pub struct DashboardView {
    document: Document,
    root: Element,
    toggle: Element,
    history_list: Element,
    positions_list: Element,
    _listeners: Vec<Listener>,
}

fn element(
    document: &Document,
    tag: &str,
    id: Option<&str>,
    class: Option<&str>,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if let Some(id) = id {
        el.set_id(id);
    }
    if let Some(class) = class {
        el.set_class_name(class);
    }
    Ok(el)
}

fn search_box(document: &Document, placeholder: &str) -> Result<Element, JsValue> {
    let input = element(document, "input", None, Some("search"))?;
    input.set_attribute("type", "text")?;
    input.set_attribute("placeholder", placeholder)?;
    Ok(input)
}

fn input_value(ev: &Event) -> Option<String> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    Some(input.value())
}

/// Nearest ancestor of the event target (inclusive) carrying `attr`, and its value.
fn closest_attr(ev: &Event, attr: &str) -> Option<String> {
    let target = ev.target()?.dyn_into::<Element>().ok()?;
    let hit = target.closest(&format!("[{attr}]")).ok()??;
    hit.get_attribute(attr)
}

impl DashboardView {
    pub fn mount(document: &Document, handlers: Handlers) -> Result<Self, JsValue> {
        let root = document
            .get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("missing #app element"))?;
        root.set_inner_html("");

        let header = element(document, "header", Some("app-header"), None)?;
        let title = element(document, "h1", Some("header-title"), None)?;
        title.set_text_content(Some(APP_TITLE));
        let controls = element(document, "div", Some("header-controls"), None)?;
        let toggle = element(document, "button", None, Some("header-button"))?;
        toggle.set_text_content(Some(LIVE_TOGGLE_LABEL));
        controls.append_child(&toggle)?;
        header.append_child(&title)?;
        header.append_child(&controls)?;

        let history = element(document, "div", Some("history"), None)?;
        let history_title = element(document, "h2", None, None)?;
        history_title.set_text_content(Some("Historial"));
        let history_search = search_box(document, HISTORY_PLACEHOLDER)?;
        let history_list = element(document, "div", Some("history-list"), None)?;
        history.append_child(&history_title)?;
        history.append_child(&history_search)?;
        history.append_child(&history_list)?;

        let map = element(document, "div", Some(MAP_CONTAINER_ID), None)?;

        let info = element(document, "div", Some("info-panel"), None)?;
        let info_title = element(document, "h2", None, None)?;
        info_title.set_text_content(Some("Localizaciones"));
        let positions_search = search_box(document, POSITIONS_PLACEHOLDER)?;
        let positions_list = element(document, "div", Some("info-content"), None)?;
        info.append_child(&info_title)?;
        info.append_child(&positions_search)?;
        info.append_child(&positions_list)?;

        let container = element(document, "div", None, Some("app-container"))?;
        for child in [&header, &history, &map, &info] {
            container.append_child(child)?;
        }
        root.append_child(&container)?;

        let Handlers {
            toggle_live,
            history_search: on_history_search,
            select_route,
            positions_search: on_positions_search,
            focus_position,
        } = handlers;

        let listeners = vec![
            Listener::new(&toggle, "click", move |_| toggle_live())?,
            Listener::new(&history_search, "input", move |ev| {
                if let Some(term) = input_value(&ev) {
                    on_history_search(term);
                }
            })?,
            Listener::new(&history_list, "click", move |ev| {
                if let Some(name) = closest_attr(&ev, "data-route") {
                    select_route(name);
                }
            })?,
            Listener::new(&positions_search, "input", move |ev| {
                if let Some(term) = input_value(&ev) {
                    on_positions_search(term);
                }
            })?,
            Listener::new(&positions_list, "click", move |ev| {
                if let Some(id) = closest_attr(&ev, "data-message-id") {
                    focus_position(id);
                }
            })?,
        ];

        Ok(Self {
            document: document.clone(),
            root,
            toggle,
            history_list,
            positions_list,
            _listeners: listeners,
        })
    }

    pub fn render_history(&self, names: &[&str], selected: Option<&str>) -> Result<(), JsValue> {
        self.history_list.set_inner_html("");
        for name in names {
            let class = if selected == Some(*name) {
                "route-button selected"
            } else {
                "route-button"
            };
            let button = element(&self.document, "button", None, Some(class))?;
            button.set_attribute("data-route", name)?;
            button.set_text_content(Some(name));
            self.history_list.append_child(&button)?;
        }
        Ok(())
    }

    pub fn render_positions(&self, records: &[&PositionRecord]) -> Result<(), JsValue> {
        self.positions_list.set_inner_html("");
        for record in records {
            let row = element(&self.document, "div", None, Some("position-entry"))?;
            row.set_attribute("data-message-id", &record.message_id)?;
            row.set_text_content(Some(&position_label(record)));
            self.positions_list.append_child(&row)?;
        }
        Ok(())
    }

    pub fn set_live(&self, on: bool) {
        let class = if on { "header-button active" } else { "header-button" };
        self.toggle.set_class_name(class);
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.root.set_inner_html("");
    }
}
