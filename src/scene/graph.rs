//! The scene graph: named nodes, points and the connectors between them
//!
//! All three maps are insertion ordered. A node and a point may share a
//! name; lookups by name resolve to the node. Removing or renaming an entity
//! deletes every connector that references it.

use super::connector::{connector_name, Connector, EndpointRef};
use super::entity::{Connectable, EntityKind, Node, Point};
use crate::error::{DiagramError, Result, ResultExt};
use crate::gpio::Gpio;
use crate::types::{PinId, PinLevel, PinMode, Pos, Pull, SignalColor};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Scene graph shared between the UI thread and the poll loop
pub type SharedScene = Arc<RwLock<SceneGraph>>;

/// Acquire the scene read lock, mapping poisoning to an error
pub fn read_scene(scene: &SharedScene) -> Result<RwLockReadGuard<'_, SceneGraph>> {
    scene
        .read()
        .map_err(|e| DiagramError::Channel(format!("Scene lock poisoned: {}", e)))
}

/// Acquire the scene write lock, mapping poisoning to an error
pub fn write_scene(scene: &SharedScene) -> Result<RwLockWriteGuard<'_, SceneGraph>> {
    scene
        .write()
        .map_err(|e| DiagramError::Channel(format!("Scene lock poisoned: {}", e)))
}

/// One connector seen from one of its endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Name of the entity at the other end
    pub peer: String,
    /// True when the queried entity is the connector's start
    pub is_output: bool,
    /// Connector name
    pub connector: String,
    /// Orientation of the connector's line
    pub start_is_output: bool,
}

/// In-progress drag gesture
#[derive(Debug, Clone)]
struct DragState {
    target: EndpointRef,
    grab_offset: Pos,
    snapshot: Vec<Connector>,
}

fn lookup<'a>(
    nodes: &'a IndexMap<String, Node>,
    points: &'a IndexMap<String, Point>,
    endpoint: &EndpointRef,
) -> Option<&'a dyn Connectable> {
    match endpoint.kind {
        EntityKind::Node => nodes.get(&endpoint.name).map(|n| n as &dyn Connectable),
        EntityKind::Point => points.get(&endpoint.name).map(|p| p as &dyn Connectable),
    }
}

fn validated_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DiagramError::InvalidArgument(
            "entity name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Normalize a pin binding: pin 0 means unbound
fn normalize_pin(pin: Option<PinId>) -> Option<PinId> {
    pin.filter(|p| *p != 0)
}

/// Named nodes, points and connectors
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: IndexMap<String, Node>,
    points: IndexMap<String, Point>,
    connectors: IndexMap<String, Connector>,
    drag: Option<DragState>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert into a shareable handle
    pub fn into_shared(self) -> SharedScene {
        Arc::new(RwLock::new(self))
    }

    /// Built-in scene used when no scene file can be loaded
    pub fn default_scene(gpio: &mut Gpio) -> Result<Self> {
        let mut scene = Self::new();
        scene.add_or_update_node("r1", 100.0, 100.0, 150.0, 80.0, None, gpio)?;
        scene.add_or_update_node("r2", 350.0, 300.0, 200.0, 100.0, None, gpio)?;
        scene.add_or_update_node("r3", 600.0, 500.0, 150.0, 80.0, None, gpio)?;
        scene.add_point("p1", 200.0, 200.0)?;
        scene.add_point("p2", 500.0, 400.0)?;

        scene.connect("r1", "r2")?;
        scene.connect("r2", "r3")?;
        scene.connect("p1", "r2")?;
        scene.connect("p2", "r3")?;

        tracing::info!("Default initial setup created");
        Ok(scene)
    }

    // ---- accessors ----

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.get(name)
    }

    pub fn connector(&self, name: &str) -> Option<&Connector> {
        self.connectors.get(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.points.is_empty() && self.connectors.is_empty()
    }

    /// Whether a node or point with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Resolve a name to an endpoint, nodes first
    pub fn resolve(&self, name: &str) -> Option<EndpointRef> {
        if self.nodes.contains_key(name) {
            Some(EndpointRef::new(EntityKind::Node, name))
        } else if self.points.contains_key(name) {
            Some(EndpointRef::new(EntityKind::Point, name))
        } else {
            None
        }
    }

    fn resolve_or_err(&self, name: &str) -> Result<EndpointRef> {
        self.resolve(name)
            .ok_or_else(|| DiagramError::not_found("shape", name))
    }

    fn node_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| DiagramError::not_found("rectangle", name))
    }

    /// Remove every entity and connector
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.points.clear();
        self.connectors.clear();
        self.drag = None;
    }

    /// Release every pin bound by a node, leaving the bindings in place
    pub fn release_pins(&self, gpio: &mut Gpio) -> usize {
        let pins = self.bound_pins();
        for (_, pin) in &pins {
            gpio.cleanup(Some(*pin));
        }
        pins.len()
    }

    // ---- entity editing ----

    /// Create a node, or update an existing one in place
    ///
    /// Existing connectors stay attached. Pin `Some(0)` means no pin.
    #[allow(clippy::too_many_arguments)]
    pub fn add_or_update_node(
        &mut self,
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pin: Option<PinId>,
        gpio: &mut Gpio,
    ) -> Result<()> {
        let name = validated_name(name)?;
        let pin = normalize_pin(pin);

        let (created, old_pin) = match self.nodes.get_mut(name) {
            Some(node) => {
                let old = node.pin;
                node.move_to(x, y);
                node.resize(width, height);
                node.pin = pin;
                (false, old)
            }
            None => {
                self.nodes.insert(
                    name.to_string(),
                    Node::new(name, x, y, width, height).with_pin(pin),
                );
                (true, None)
            }
        };

        if created || old_pin != pin {
            if let Some(old) = old_pin {
                gpio.cleanup(Some(old));
            }
            if let Some(new) = pin {
                gpio.setup(new, PinMode::Input, Pull::Down)
                    .with_context(|| format!("Binding pin {} to '{}'", new, name))?;
            }
        }

        self.refresh_connectors_for(&EndpointRef::new(EntityKind::Node, name));
        tracing::info!(
            "Rectangle '{}' {}",
            name,
            if created { "created" } else { "updated" }
        );
        Ok(())
    }

    /// Create or replace a visible point
    pub fn add_point(&mut self, name: &str, x: f64, y: f64) -> Result<()> {
        let name = validated_name(name)?;
        self.points.insert(name.to_string(), Point::new(name, x, y));
        self.refresh_connectors_for(&EndpointRef::new(EntityKind::Point, name));
        tracing::info!("Point '{}' created at ({}, {})", name, x, y);
        Ok(())
    }

    /// Move a node or point
    pub fn move_entity(&mut self, name: &str, x: f64, y: f64) -> Result<()> {
        let endpoint = self.resolve_or_err(name)?;
        self.move_endpoint(&endpoint, x, y);
        Ok(())
    }

    fn move_endpoint(&mut self, endpoint: &EndpointRef, x: f64, y: f64) {
        match endpoint.kind {
            EntityKind::Node => {
                if let Some(node) = self.nodes.get_mut(&endpoint.name) {
                    node.move_to(x, y);
                }
            }
            EntityKind::Point => {
                if let Some(point) = self.points.get_mut(&endpoint.name) {
                    point.move_to(x, y);
                }
            }
        }
        self.refresh_connectors_for(endpoint);
    }

    /// Resize a node
    pub fn resize(&mut self, name: &str, width: f64, height: f64) -> Result<()> {
        self.node_mut(name)?.resize(width, height);
        self.refresh_connectors_for(&EndpointRef::new(EntityKind::Node, name));
        Ok(())
    }

    /// Swap a node's input and output points, dropping its connectors
    pub fn switch_points(&mut self, name: &str) -> Result<()> {
        self.node_mut(name)?;
        let removed = self.remove_endpoint_connectors(&EndpointRef::new(EntityKind::Node, name));
        self.node_mut(name)?.switch_points();
        tracing::info!(
            "Switched points for '{}' ({} connector(s) removed)",
            name,
            removed.len()
        );
        Ok(())
    }

    /// Remove a node and its connectors, releasing its pin
    pub fn remove_node(&mut self, name: &str, gpio: &mut Gpio) -> Result<()> {
        let node = self
            .nodes
            .shift_remove(name)
            .ok_or_else(|| DiagramError::not_found("rectangle", name))?;
        self.remove_endpoint_connectors(&EndpointRef::new(EntityKind::Node, name));
        if let Some(pin) = node.pin {
            gpio.cleanup(Some(pin));
        }
        self.cancel_drag_of(&EndpointRef::new(EntityKind::Node, name));
        tracing::info!("Rectangle '{}' removed", name);
        Ok(())
    }

    /// Remove a point and its connectors
    pub fn remove_point(&mut self, name: &str) -> Result<()> {
        self.points
            .shift_remove(name)
            .ok_or_else(|| DiagramError::not_found("point", name))?;
        self.remove_endpoint_connectors(&EndpointRef::new(EntityKind::Point, name));
        self.cancel_drag_of(&EndpointRef::new(EntityKind::Point, name));
        tracing::info!("Point '{}' removed", name);
        Ok(())
    }

    /// Rename a node or point, keeping its position in the map
    ///
    /// Connectors referencing the old name are deleted.
    pub fn rename_entity(&mut self, old: &str, new: &str) -> Result<()> {
        let new = validated_name(new)?;
        let endpoint = self.resolve_or_err(old)?;
        if old == new {
            return Ok(());
        }

        match endpoint.kind {
            EntityKind::Node => {
                if self.nodes.contains_key(new) {
                    return Err(DiagramError::InvalidArgument(format!(
                        "a rectangle named '{}' already exists",
                        new
                    )));
                }
                if let Some((index, _, mut node)) = self.nodes.shift_remove_full(old) {
                    node.name = new.to_string();
                    self.nodes.shift_insert(index, new.to_string(), node);
                }
            }
            EntityKind::Point => {
                if self.points.contains_key(new) {
                    return Err(DiagramError::InvalidArgument(format!(
                        "a point named '{}' already exists",
                        new
                    )));
                }
                if let Some((index, _, mut point)) = self.points.shift_remove_full(old) {
                    point.name = new.to_string();
                    self.points.shift_insert(index, new.to_string(), point);
                }
            }
        }

        self.remove_endpoint_connectors(&endpoint);
        self.cancel_drag_of(&endpoint);
        tracing::info!("Renamed {} '{}' to '{}'", endpoint.kind, old, new);
        Ok(())
    }

    // ---- connectors ----

    /// Connect `a`'s output to `b`'s input, returning the connector name
    pub fn connect(&mut self, a: &str, b: &str) -> Result<String> {
        self.connect_with(a, b, true)
    }

    /// Connect with an explicit orientation
    ///
    /// An existing connector with the same derived name is replaced.
    pub fn connect_with(&mut self, a: &str, b: &str, start_is_output: bool) -> Result<String> {
        let name = connector_name(a, b);
        self.insert_connector(name.clone(), a, b, start_is_output)?;
        tracing::info!("Connected {} to {}", a, b);
        Ok(name)
    }

    /// Insert a connector under an arbitrary name
    pub(crate) fn insert_connector(
        &mut self,
        name: String,
        start: &str,
        end: &str,
        start_is_output: bool,
    ) -> Result<()> {
        let (start_ref, end_ref) = match (self.resolve(start), self.resolve(end)) {
            (Some(s), Some(e)) => (s, e),
            (None, _) => {
                return Err(DiagramError::not_found("shape", start)
                    .with_context("Cannot connect"))
            }
            (_, None) => {
                return Err(DiagramError::not_found("shape", end).with_context("Cannot connect"))
            }
        };

        let connector = match (
            lookup(&self.nodes, &self.points, &start_ref),
            lookup(&self.nodes, &self.points, &end_ref),
        ) {
            (Some(s), Some(e)) => Connector::new(name, s, e, start_is_output),
            _ => return Err(DiagramError::not_found("shape", start)),
        };
        self.store_connector(connector);
        Ok(())
    }

    fn store_connector(&mut self, connector: Connector) {
        let name = connector.name.clone();
        if self.connectors.insert(name.clone(), connector).is_some() {
            tracing::debug!("Replaced existing connector '{}'", name);
        }
    }

    /// Put a previously removed connector back, refreshing its line
    ///
    /// Returns false if either endpoint no longer exists.
    fn restore_connector(&mut self, mut connector: Connector) -> bool {
        match (
            lookup(&self.nodes, &self.points, &connector.start),
            lookup(&self.nodes, &self.points, &connector.end),
        ) {
            (Some(start), Some(end)) => connector.update_coordinates(start, end),
            _ => return false,
        }
        self.store_connector(connector);
        true
    }

    /// Remove the connector between two entities, in either direction
    ///
    /// Returns the removed connector's name, or `None` if there was nothing
    /// to remove.
    pub fn disconnect(&mut self, a: &str, b: &str) -> Option<String> {
        for name in [connector_name(a, b), connector_name(b, a)] {
            if self.connectors.shift_remove(&name).is_some() {
                tracing::info!("Disconnected {} and {}", a, b);
                return Some(name);
            }
        }
        tracing::info!("No connection found between {} and {}", a, b);
        None
    }

    /// Every connector touching an entity, seen from that entity
    pub fn get_connections(&self, name: &str) -> Result<Vec<Connection>> {
        let endpoint = self.resolve_or_err(name)?;
        Ok(self.connections_of(&endpoint))
    }

    fn connections_of(&self, endpoint: &EndpointRef) -> Vec<Connection> {
        self.connectors
            .values()
            .filter_map(|c| {
                if &c.start == endpoint {
                    Some(Connection {
                        peer: c.end.name.clone(),
                        is_output: true,
                        connector: c.name.clone(),
                        start_is_output: c.start_is_output,
                    })
                } else if &c.end == endpoint {
                    Some(Connection {
                        peer: c.start.name.clone(),
                        is_output: false,
                        connector: c.name.clone(),
                        start_is_output: c.start_is_output,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Delete all connectors touching an entity, returning their names
    pub fn remove_connections(&mut self, name: &str) -> Result<Vec<String>> {
        let endpoint = self.resolve_or_err(name)?;
        Ok(self.remove_endpoint_connectors(&endpoint))
    }

    fn remove_endpoint_connectors(&mut self, endpoint: &EndpointRef) -> Vec<String> {
        let mut removed = Vec::new();
        self.connectors.retain(|name, c| {
            let keep = !c.touches(endpoint);
            if !keep {
                removed.push(name.clone());
            }
            keep
        });
        removed
    }

    /// Recreate connectors from a [`get_connections`](Self::get_connections) snapshot
    ///
    /// Each connector keeps its name and orientation. Entries whose peer no
    /// longer exists are skipped.
    pub fn reconnect(&mut self, name: &str, connections: &[Connection]) -> Result<usize> {
        self.resolve_or_err(name)?;
        let mut restored = 0;
        for conn in connections {
            let (start, end) = if conn.is_output {
                (name, conn.peer.as_str())
            } else {
                (conn.peer.as_str(), name)
            };
            let result =
                self.insert_connector(conn.connector.clone(), start, end, conn.start_is_output);
            match result {
                Ok(_) => restored += 1,
                Err(e) => tracing::warn!("Skipping connection '{}': {}", conn.connector, e),
            }
        }
        Ok(restored)
    }

    /// Refresh every connector's cached coordinates
    pub fn update_coordinates(&mut self) {
        let (nodes, points) = (&self.nodes, &self.points);
        for connector in self.connectors.values_mut() {
            if let (Some(start), Some(end)) = (
                lookup(nodes, points, &connector.start),
                lookup(nodes, points, &connector.end),
            ) {
                connector.update_coordinates(start, end);
            }
        }
    }

    fn refresh_connectors_for(&mut self, endpoint: &EndpointRef) {
        let (nodes, points) = (&self.nodes, &self.points);
        for connector in self
            .connectors
            .values_mut()
            .filter(|c| c.touches(endpoint))
        {
            if let (Some(start), Some(end)) = (
                lookup(nodes, points, &connector.start),
                lookup(nodes, points, &connector.end),
            ) {
                connector.update_coordinates(start, end);
            }
        }
    }

    // ---- signals ----

    /// Current value of a node's signal flag
    pub fn signal(&self, name: &str, color: SignalColor) -> Result<bool> {
        self.nodes
            .get(name)
            .map(|n| n.signal(color))
            .ok_or_else(|| DiagramError::not_found("rectangle", name))
    }

    /// Set one signal flag; red on a pin-bound node also updates the mock table
    pub fn set_signal(
        &mut self,
        name: &str,
        color: SignalColor,
        value: bool,
        gpio: &mut Gpio,
    ) -> Result<()> {
        let node = self.node_mut(name)?;
        node.signals.set(color, value);
        if let (SignalColor::Red, Some(pin)) = (color, node.pin) {
            gpio.set_mock_value(pin, PinLevel::from(value));
        }
        Ok(())
    }

    /// Flip one signal flag, returning the new value
    pub fn toggle_signal(&mut self, name: &str, color: SignalColor, gpio: &mut Gpio) -> Result<bool> {
        let value = !self.signal(name, color)?;
        self.set_signal(name, color, value, gpio)?;
        tracing::info!("Toggled {} signal for {} to {}", color, name, value);
        Ok(value)
    }

    /// Set all three signal flags at once
    pub fn set_all_signals(&mut self, name: &str, value: bool, gpio: &mut Gpio) -> Result<()> {
        for color in SignalColor::all() {
            self.set_signal(name, *color, value, gpio)?;
        }
        tracing::info!("All signals for {} set to {}", name, value);
        Ok(())
    }

    /// Restore persisted node flags without touching GPIO
    pub(crate) fn restore_node_state(
        &mut self,
        name: &str,
        points_swapped: bool,
        signals: crate::types::SignalState,
    ) {
        if let Some(node) = self.nodes.get_mut(name) {
            node.points_swapped = points_swapped;
            node.signals = signals;
        }
        self.refresh_connectors_for(&EndpointRef::new(EntityKind::Node, name));
    }

    pub(crate) fn set_point_visible(&mut self, name: &str, visible: bool) {
        if let Some(point) = self.points.get_mut(name) {
            point.visible = visible;
        }
    }

    /// Make all points visible if any is hidden, otherwise hide them all
    pub fn toggle_all_points_visibility(&mut self) -> Option<bool> {
        if self.points.is_empty() {
            tracing::info!("No points to toggle visibility");
            return None;
        }
        let visible = self.points.values().any(|p| !p.visible);
        for point in self.points.values_mut() {
            point.visible = visible;
        }
        tracing::info!(
            "All points are now {}",
            if visible { "visible" } else { "hidden" }
        );
        Some(visible)
    }

    // ---- pin bindings ----

    /// All `(node, pin)` bindings in node order
    pub fn bound_pins(&self) -> Vec<(String, PinId)> {
        self.nodes
            .values()
            .filter_map(|n| n.pin.map(|pin| (n.name.clone(), pin)))
            .collect()
    }

    /// Mirror a pin level into a node's red flag
    ///
    /// Returns whether the flag changed, or `None` if the node is gone or no
    /// longer bound to `pin`.
    pub fn apply_pin_level(&mut self, name: &str, pin: PinId, level: PinLevel) -> Option<bool> {
        let node = self.nodes.get_mut(name).filter(|n| n.pin == Some(pin))?;
        let red = level.is_high();
        let changed = node.signals.red != red;
        node.signals.red = red;
        Some(changed)
    }

    /// Read every bound pin once and update the red flags
    ///
    /// Failed reads are logged and skipped. Returns the number of nodes whose
    /// flag changed.
    pub fn refresh_from_gpio(&mut self, gpio: &mut Gpio) -> usize {
        let mut changed = 0;
        for (name, pin) in self.bound_pins() {
            match gpio.input(pin) {
                Ok(level) => {
                    if self.apply_pin_level(&name, pin, level) == Some(true) {
                        changed += 1;
                    }
                }
                Err(e) => tracing::warn!("Failed to read pin {} for '{}': {}", pin, name, e),
            }
        }
        changed
    }

    /// Switch simulated hardware on or off
    ///
    /// Turning simulation off resets every bound pin's mock value to LOW.
    /// The red flags are refreshed from the pins in both cases.
    pub fn set_simulation(&mut self, enabled: bool, gpio: &mut Gpio) -> usize {
        gpio.set_simulating(enabled);
        if !enabled {
            for (_, pin) in self.bound_pins() {
                gpio.set_mock_value(pin, PinLevel::Low);
            }
        }
        self.refresh_from_gpio(gpio)
    }

    // ---- hit testing and dragging ----

    /// Topmost entity under a canvas position: nodes first, then points
    pub fn entity_at(&self, x: f64, y: f64) -> Option<EndpointRef> {
        if let Some(node) = self.nodes.values().find(|n| n.contains(x, y)) {
            return Some(EndpointRef::new(EntityKind::Node, node.name.clone()));
        }
        self.points
            .values()
            .find(|p| p.contains(x, y))
            .map(|p| EndpointRef::new(EntityKind::Point, p.name.clone()))
    }

    fn position_of(&self, endpoint: &EndpointRef) -> Option<Pos> {
        match endpoint.kind {
            EntityKind::Node => self.nodes.get(&endpoint.name).map(|n| Pos::new(n.x, n.y)),
            EntityKind::Point => self.points.get(&endpoint.name).map(Point::pos),
        }
    }

    /// Start dragging an entity grabbed at a canvas position
    ///
    /// The target is usually the result of [`entity_at`](Self::entity_at), so
    /// a point sharing its name with a node can still be dragged. The
    /// entity's connectors are set aside for the duration of the drag.
    pub fn begin_drag(&mut self, target: &EndpointRef, grab_x: f64, grab_y: f64) -> Result<()> {
        if self.drag.is_some() {
            self.end_drag();
        }
        let origin = self
            .position_of(target)
            .ok_or_else(|| DiagramError::not_found(&target.kind.to_string(), &target.name))?;

        let mut snapshot = Vec::new();
        self.connectors.retain(|_, c| {
            let keep = !c.touches(target);
            if !keep {
                snapshot.push(c.clone());
            }
            keep
        });

        tracing::debug!(
            "Drag started on {} '{}' ({} connection(s))",
            target.kind,
            target.name,
            snapshot.len()
        );
        let target = target.clone();
        self.drag = Some(DragState {
            target,
            grab_offset: Pos::new(grab_x - origin.x, grab_y - origin.y),
            snapshot,
        });
        Ok(())
    }

    /// Move the dragged entity so the grab point follows the cursor
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(drag) = self.drag.as_ref() else {
            return false;
        };
        let target = drag.target.clone();
        let (nx, ny) = (x - drag.grab_offset.x, y - drag.grab_offset.y);
        self.move_endpoint(&target, nx, ny);
        true
    }

    /// Finish the drag, restoring the snapshot connectors
    pub fn end_drag(&mut self) -> Option<String> {
        let drag = self.drag.take()?;
        let total = drag.snapshot.len();
        let mut restored = 0;
        for connector in drag.snapshot {
            let name = connector.name.clone();
            if self.restore_connector(connector) {
                restored += 1;
            } else {
                tracing::warn!("Skipping connection '{}': endpoint no longer exists", name);
            }
        }
        tracing::debug!(
            "Drag ended on '{}' ({} of {} restored)",
            drag.target.name,
            restored,
            total
        );
        Some(drag.target.name)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Entity currently being dragged
    pub fn dragged(&self) -> Option<&EndpointRef> {
        self.drag.as_ref().map(|d| &d.target)
    }

    fn cancel_drag_of(&mut self, endpoint: &EndpointRef) {
        if self.drag.as_ref().is_some_and(|d| &d.target == endpoint) {
            self.drag = None;
        }
    }
}
