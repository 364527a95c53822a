use console_error_panic_hook::set_once;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

use foundation::Coordinate;
use surface::MapSurfaceController;

mod api;
mod dom;
pub mod leaflet;
pub mod resolver;
pub mod shell;

use dom::{DashboardView, Handlers, Interval, MAP_CONTAINER_ID};
use leaflet::LeafletBackend;
use resolver::{ResolverKind, RouteResolver};
use shell::{LIVE_POLL_MS, ShellState};

struct Dashboard {
    shell: ShellState,
    base: Option<String>,
    resolver: Rc<dyn RouteResolver>,
    // Field order is drop order: stop polling, then release the map, then empty the DOM.
    live_timer: Option<Interval>,
    map: MapSurfaceController<LeafletBackend>,
    view: DashboardView,
}

thread_local! {
    static DASHBOARD: RefCell<Option<Dashboard>> = const { RefCell::new(None) };
}

fn with_dashboard<R>(f: impl FnOnce(&mut Dashboard) -> R) -> Option<R> {
    DASHBOARD.with(|d| d.borrow_mut().as_mut().map(f))
}

fn log(msg: &str) {
    console::log_1(&JsValue::from_str(msg));
}

fn report(context: &str, err: &JsValue) {
    console::error_2(&JsValue::from_str(context), err);
}

#[wasm_bindgen(start)]
pub fn start() {
    set_once();
}

/// Builds the dashboard inside `#app` and mounts the map into `#map`.
///
/// `resolver` picks how selected routes become coordinates: `"http"` (default) asks the
/// backend's `/track/{name}`, `"none"` resolves nothing. Calling it while mounted does nothing.
#[wasm_bindgen]
pub fn mount_dashboard(resolver: Option<String>) -> Result<(), JsValue> {
    if DASHBOARD.with(|d| d.borrow().is_some()) {
        return Ok(());
    }

    let kind = ResolverKind::parse(resolver.as_deref().unwrap_or_default())
        .ok_or_else(|| JsValue::from_str("unknown resolver; expected \"http\" or \"none\""))?;
    let base = api::backend_base_url();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let view = DashboardView::mount(
        &document,
        Handlers {
            toggle_live,
            history_search,
            select_route,
            positions_search,
            focus_position,
        },
    )?;

    let shell = ShellState::default();
    let mut map = MapSurfaceController::new(LeafletBackend::new());
    map.initialize(MAP_CONTAINER_ID);
    map.show_area(shell.geofence().ring());

    DASHBOARD.with(|d| {
        *d.borrow_mut() = Some(Dashboard {
            shell,
            resolver: Rc::from(kind.build(base.clone())),
            base: base.clone(),
            live_timer: None,
            map,
            view,
        });
    });
    log("route monitor mounted");

    load_history(base.clone());
    load_positions(base);
    Ok(())
}

/// Stops live polling, releases the map and empties `#app`.
#[wasm_bindgen]
pub fn unmount_dashboard() {
    let taken = DASHBOARD.with(|d| d.borrow_mut().take());
    if taken.is_some() {
        drop(taken);
        log("route monitor unmounted");
    }
}

#[wasm_bindgen]
pub fn is_live_mode() -> bool {
    with_dashboard(|d| d.shell.live_mode()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn selected_route() -> Option<String> {
    with_dashboard(|d| d.shell.selected_route().map(str::to_string)).flatten()
}

fn load_history(base: Option<String>) {
    spawn_local(async move {
        match api::fetch_history(base.as_deref()).await {
            Ok(names) => {
                with_dashboard(|d| {
                    d.shell.set_history(names);
                    render_history(d);
                });
            }
            Err(e) => report("history fetch failed:", &e),
        }
    });
}

fn load_positions(base: Option<String>) {
    spawn_local(async move {
        match api::fetch_positions(base.as_deref()).await {
            Ok(records) => {
                with_dashboard(|d| {
                    d.shell.set_positions(records);
                    render_positions(d);
                });
            }
            Err(e) => report("positions fetch failed:", &e),
        }
    });
}

fn render_history(d: &Dashboard) {
    let visible = d.shell.visible_history();
    if let Err(e) = d.view.render_history(&visible, d.shell.selected_route()) {
        report("history render failed:", &e);
    }
}

fn render_positions(d: &Dashboard) {
    if let Err(e) = d.view.render_positions(&d.shell.visible_positions()) {
        report("positions render failed:", &e);
    }
}

fn history_search(term: String) {
    with_dashboard(|d| {
        d.shell.set_history_search(term);
        render_history(d);
    });
}

fn positions_search(term: String) {
    with_dashboard(|d| {
        d.shell.set_positions_search(term);
        render_positions(d);
    });
}

fn select_route(name: String) {
    let pending = with_dashboard(|d| {
        let ticket = d.shell.select_route(name.clone());
        render_history(d);
        (ticket, d.resolver.resolve(&name))
    });
    let Some((ticket, resolving)) = pending else {
        return;
    };

    spawn_local(async move {
        let route = resolving.await;
        with_dashboard(|d| {
            d.shell.apply_route(&mut d.map, ticket, route.as_deref());
        });
    });
}

fn focus_position(message_id: String) {
    with_dashboard(|d| d.shell.focus_position(&mut d.map, &message_id));
}

fn toggle_live() {
    with_dashboard(|d| {
        let on = d.shell.toggle_live_mode();
        d.live_timer = if on {
            match Interval::start(LIVE_POLL_MS, poll_live) {
                Ok(timer) => Some(timer),
                Err(e) => {
                    report("live polling not started:", &e);
                    None
                }
            }
        } else {
            None
        };
        d.view.set_live(on);
        log(if on { "live mode on" } else { "live mode off" });
    });
}

fn poll_live() {
    let Some(base) = with_dashboard(|d| d.base.clone()) else {
        return;
    };
    spawn_local(async move {
        match api::fetch_live_position(base.as_deref()).await {
            Ok(position) => apply_live_position(position),
            Err(e) => report("live position fetch failed:", &e),
        }
    });
}

fn apply_live_position(position: Coordinate) {
    let alert = with_dashboard(|d| d.shell.apply_live_position(&mut d.map, position)).flatten();

    // Raised outside the borrow: `alert` blocks and other callbacks may run after it.
    if let (Some(msg), Some(window)) = (alert, web_sys::window()) {
        let _ = window.alert_with_message(&msg);
    }
}
