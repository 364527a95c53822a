//! Dashboard state that does not touch the DOM.
//!
//! The wasm entry points own one `ShellState` and re-render from it after every event.

use foundation::{Coordinate, Geofence, GeofenceWatch};
use protocol::{PositionRecord, filter_history, filter_positions};
use surface::{FOCUS_ZOOM, MapBackend, MapSurfaceController};

pub const APP_TITLE: &str = "Monitor de Rutas Logísticas";
pub const LIVE_TOGGLE_LABEL: &str = "⏯️ Simulación";
pub const HISTORY_PLACEHOLDER: &str = "Buscar";
pub const POSITIONS_PLACEHOLDER: &str = "Buscar por ID, calle, ciudad o estado";
/// Poll period of `/live-route` while live mode is on.
pub const LIVE_POLL_MS: i32 = 2_000;

/// Ticket handed out per route selection. Resolutions for an older ticket are dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection(u64);

#[derive(Debug, Clone)]
pub struct ShellState {
    live_mode: bool,
    selected_route: Option<String>,
    selection_seq: u64,
    history: Vec<String>,
    history_search: String,
    positions: Vec<PositionRecord>,
    positions_search: String,
    geofence: GeofenceWatch,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(Geofence::puerto_montt())
    }
}

impl ShellState {
    pub fn new(fence: Geofence) -> Self {
        Self {
            live_mode: false,
            selected_route: None,
            selection_seq: 0,
            history: Vec::new(),
            history_search: String::new(),
            positions: Vec::new(),
            positions_search: String::new(),
            geofence: GeofenceWatch::new(fence),
        }
    }

    pub fn live_mode(&self) -> bool {
        self.live_mode
    }

    /// Flips live mode and returns the new value.
    pub fn toggle_live_mode(&mut self) -> bool {
        self.live_mode = !self.live_mode;
        self.live_mode
    }

    pub fn selected_route(&self) -> Option<&str> {
        self.selected_route.as_deref()
    }

    pub fn select_route(&mut self, name: impl Into<String>) -> Selection {
        self.selected_route = Some(name.into());
        self.selection_seq += 1;
        Selection(self.selection_seq)
    }

    /// True while `ticket` belongs to the most recent selection.
    pub fn is_current(&self, ticket: Selection) -> bool {
        ticket.0 == self.selection_seq
    }

    pub fn set_history(&mut self, names: Vec<String>) {
        self.history = names;
    }

    pub fn set_history_search(&mut self, term: impl Into<String>) {
        self.history_search = term.into();
    }

    pub fn visible_history(&self) -> Vec<&str> {
        filter_history(&self.history, &self.history_search)
    }

    pub fn set_positions(&mut self, records: Vec<PositionRecord>) {
        self.positions = records;
    }

    pub fn set_positions_search(&mut self, term: impl Into<String>) {
        self.positions_search = term.into();
    }

    pub fn visible_positions(&self) -> Vec<&PositionRecord> {
        filter_positions(&self.positions, &self.positions_search)
    }

    pub fn position_by_id(&self, message_id: &str) -> Option<&PositionRecord> {
        self.positions.iter().find(|r| r.message_id == message_id)
    }

    /// Records a live position. Returns `true` when the vehicle just left the fence.
    pub fn observe_live(&mut self, position: Coordinate) -> bool {
        self.geofence.observe(position)
    }

    pub fn geofence(&self) -> &Geofence {
        self.geofence.fence()
    }

    /// Syncs a resolved route unless a newer selection was made meanwhile.
    ///
    /// Returns whether `route` reached the map.
    pub fn apply_route<B: MapBackend>(
        &self,
        map: &mut MapSurfaceController<B>,
        ticket: Selection,
        route: Option<&[Coordinate]>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        map.sync_route(route);
        true
    }

    /// Centers the map on a logged position. Unknown ids are ignored.
    pub fn focus_position<B: MapBackend>(
        &self,
        map: &mut MapSurfaceController<B>,
        message_id: &str,
    ) -> bool {
        let Some(record) = self.position_by_id(message_id) else {
            return false;
        };
        map.focus(record.coordinate(), FOCUS_ZOOM);
        true
    }

    /// Follows a live position while live mode is on.
    ///
    /// Returns the alert text when this position took the vehicle out of the fence.
    pub fn apply_live_position<B: MapBackend>(
        &mut self,
        map: &mut MapSurfaceController<B>,
        position: Coordinate,
    ) -> Option<String> {
        // A response can land after live mode was switched off.
        if !self.live_mode {
            return None;
        }
        map.follow(position);
        self.observe_live(position).then(|| exit_alert(self.geofence.fence().name()))
    }
}

/// Alert text raised when the vehicle leaves `fence`.
pub fn exit_alert(fence: &str) -> String {
    format!("¡El camión ha salido de {fence}!")
}

/// One-line label for a position entry in the info panel.
pub fn position_label(record: &PositionRecord) -> String {
    let status = &record.position_status;
    let place = [
        status.street.as_deref(),
        status.city.as_deref(),
        status.state.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ");
    if place.is_empty() {
        format!("#{}", record.message_id)
    } else {
        format!("#{} · {place}", record.message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{RouteResolver, UnresolvedRoutes};
    use pretty_assertions::assert_eq;
    use protocol::PositionStatus;
    use std::task::{Context, Poll, Waker};
    use surface::headless::HeadlessBackend;

    fn record(id: &str, street: &str, city: &str) -> PositionRecord {
        PositionRecord {
            message_id: id.to_string(),
            position_status: PositionStatus {
                latitude: -41.47,
                longitude: -72.94,
                street: Some(street.to_string()),
                city: Some(city.to_string()),
                state: None,
                extra: Default::default(),
            },
        }
    }

    #[test]
    fn live_mode_toggles() {
        let mut s = ShellState::default();
        assert!(!s.live_mode());
        assert!(s.toggle_live_mode());
        assert!(!s.toggle_live_mode());
    }

    #[test]
    fn history_filter_is_case_insensitive() {
        let mut s = ShellState::default();
        s.set_history(vec![
            "RUTA 5, QUELLÓN - ALAMEDA, SANTIAGO".to_string(),
            "AVENIDA DIEGO PORTALES, PUERTO MONTT - RUTA 5, LLANQUIHUE".to_string(),
        ]);
        assert_eq!(s.visible_history().len(), 2);
        s.set_history_search("puerto");
        assert_eq!(
            s.visible_history(),
            vec!["AVENIDA DIEGO PORTALES, PUERTO MONTT - RUTA 5, LLANQUIHUE"]
        );
        s.set_history_search("");
        assert_eq!(s.visible_history().len(), 2);
    }

    #[test]
    fn history_is_replaced_wholesale() {
        let mut s = ShellState::default();
        s.set_history(vec!["a".to_string(), "b".to_string()]);
        s.set_history(vec!["c".to_string()]);
        assert_eq!(s.visible_history(), vec!["c"]);
    }

    #[test]
    fn stale_selection_is_detected() {
        let mut s = ShellState::default();
        let first = s.select_route("A");
        let second = s.select_route("B");
        assert!(!s.is_current(first));
        assert!(s.is_current(second));
        assert_eq!(s.selected_route(), Some("B"));
    }

    #[test]
    fn positions_filter_and_lookup() {
        let mut s = ShellState::default();
        s.set_positions(vec![
            record("1", "RUTA 5", "PUERTO MONTT"),
            record("2", "ALAMEDA", "SANTIAGO"),
        ]);
        s.set_positions_search("  santiago ");
        let ids: Vec<_> = s
            .visible_positions()
            .iter()
            .map(|r| r.message_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2"]);
        assert!(s.position_by_id("1").is_some());
        assert!(s.position_by_id("9").is_none());
    }

    #[test]
    fn alert_fires_once_per_exit() {
        let mut s = ShellState::default();
        let inside = Coordinate::new(-41.4682, -72.9441);
        let outside = Coordinate::new(-40.57, -73.13);
        assert!(!s.observe_live(inside));
        assert!(s.observe_live(outside));
        assert!(!s.observe_live(outside));
        assert!(!s.observe_live(inside));
        assert!(s.observe_live(outside));
    }

    fn mounted_map() -> MapSurfaceController<HeadlessBackend> {
        let mut map = MapSurfaceController::new(HeadlessBackend::new());
        map.initialize("map");
        map
    }

    fn resolve_now(resolver: &dyn RouteResolver, name: &str) -> Option<Vec<Coordinate>> {
        let mut fut = resolver.resolve(name);
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(route) => route,
            Poll::Pending => panic!("resolver did not complete synchronously"),
        }
    }

    #[test]
    fn stub_selection_keeps_drawn_route() {
        let mut s = ShellState::default();
        let mut map = mounted_map();
        let drawn = [Coordinate::new(-41.46, -72.94), Coordinate::new(-41.47, -72.95)];
        let first = s.select_route("RUTA 5, LOS LAGOS - 2 C. LAS HILANDERAS, PUERTO MONTT");
        assert!(s.apply_route(&mut map, first, Some(&drawn)));
        let before = map.backend().live_surfaces().next().unwrap().clone();

        let name = "RUTA 5, OSORNO - RUTA 5, LOS LAGOS";
        let ticket = s.select_route(name);
        let route = resolve_now(&UnresolvedRoutes, name);
        assert!(s.apply_route(&mut map, ticket, route.as_deref()));

        assert_eq!(s.selected_route(), Some(name));
        let after = map.backend().live_surfaces().next().unwrap();
        assert_eq!(&before, after);
        assert_eq!(map.state().unwrap().path_len, 2);
    }

    #[test]
    fn late_resolution_for_old_selection_is_dropped() {
        let mut s = ShellState::default();
        let mut map = mounted_map();
        let old = s.select_route("A");
        let new = s.select_route("B");

        let b_route = [Coordinate::new(-40.57, -73.13), Coordinate::new(-40.29, -73.07)];
        assert!(s.apply_route(&mut map, new, Some(&b_route)));
        let a_route = [Coordinate::new(-33.45, -70.66)];
        assert!(!s.apply_route(&mut map, old, Some(&a_route)));

        let surface = map.backend().live_surfaces().next().unwrap();
        assert_eq!(surface.groups[0].polylines, vec![b_route.to_vec()]);
        assert_eq!(surface.markers[0].position, b_route[0]);
    }

    #[test]
    fn focus_uses_position_coordinates() {
        let mut s = ShellState::default();
        let mut map = mounted_map();
        s.set_positions(vec![record("7", "RUTA 5", "OSORNO")]);

        assert!(s.focus_position(&mut map, "7"));
        assert!(!s.focus_position(&mut map, "8"));
        let surface = map.backend().live_surfaces().next().unwrap();
        assert_eq!(surface.center, Coordinate::new(-41.47, -72.94));
        assert_eq!(surface.zoom, FOCUS_ZOOM);
    }

    #[test]
    fn live_positions_follow_only_in_live_mode() {
        let mut s = ShellState::default();
        let mut map = mounted_map();
        let inside = Coordinate::new(-41.4682, -72.9441);
        let outside = Coordinate::new(-40.57, -73.13);

        assert_eq!(s.apply_live_position(&mut map, outside), None);
        assert_eq!(map.state().unwrap().marker_position, inside);

        s.toggle_live_mode();
        assert_eq!(s.apply_live_position(&mut map, inside), None);
        assert_eq!(
            s.apply_live_position(&mut map, outside).as_deref(),
            Some("¡El camión ha salido de Puerto Montt!")
        );
        assert_eq!(s.apply_live_position(&mut map, outside), None);
        assert_eq!(map.state().unwrap().marker_position, outside);
    }

    #[test]
    fn labels_skip_missing_parts() {
        let mut r = record("7", "RUTA 5", "OSORNO");
        assert_eq!(position_label(&r), "#7 · RUTA 5, OSORNO");
        r.position_status.street = None;
        r.position_status.city = None;
        assert_eq!(position_label(&r), "#7");
        assert_eq!(exit_alert("Puerto Montt"), "¡El camión ha salido de Puerto Montt!");
    }
}
