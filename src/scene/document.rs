//! Scene file format
//!
//! A scene is stored as one JSON object with three ordered collections:
//!
//! ```json
//! {
//!   "rectangles": [{"name": "r1", "x": 100, "y": 100, "width": 150, "height": 80,
//!                   "gpio": 5, "points_swapped": false,
//!                   "red_signal": false, "blue_signal": false, "yellow_signal": false}],
//!   "points": [{"name": "p1", "x": 200, "y": 200, "is_visible": true}],
//!   "lines": [{"name": "Line_r1_to_p1", "start_shape": "r1", "end_shape": "p1",
//!              "start_is_output": true}]
//! }
//! ```
//!
//! Loading never fails because of a bad connector: lines whose endpoints
//! cannot be resolved are dropped and counted in the [`LoadReport`].

use super::entity::Node;
use super::graph::SceneGraph;
use crate::error::{DiagramError, Result, ResultExt};
use crate::gpio::Gpio;
use crate::types::{PinId, SignalState};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

/// Stored rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub gpio: Option<PinId>,
    #[serde(default)]
    pub points_swapped: bool,
    #[serde(default)]
    pub red_signal: bool,
    #[serde(default)]
    pub blue_signal: bool,
    #[serde(default)]
    pub yellow_signal: bool,
}

/// Stored point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

/// Stored connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub name: String,
    pub start_shape: String,
    pub end_shape: String,
    #[serde(default = "default_true")]
    pub start_is_output: bool,
}

/// On-disk scene document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub rectangles: Vec<NodeRecord>,
    #[serde(default)]
    pub points: Vec<PointRecord>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

impl SceneDocument {
    /// Load a document from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(DiagramError::from)
            .with_context(|| format!("Reading scene file {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Parsing scene file {}", path.display()))
    }

    /// Save the document as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of building a scene from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes: usize,
    pub points: usize,
    pub connectors: usize,
    /// Connectors skipped because an endpoint was missing
    pub dropped_connectors: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_connectors.is_empty()
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rectangle(s), {} point(s), {} line(s)",
            self.nodes, self.points, self.connectors
        )?;
        if !self.dropped_connectors.is_empty() {
            write!(f, ", {} dropped", self.dropped_connectors.len())?;
        }
        Ok(())
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            gpio: node.pin,
            points_swapped: node.points_swapped,
            red_signal: node.signals.red,
            blue_signal: node.signals.blue,
            yellow_signal: node.signals.yellow,
        }
    }
}

impl SceneGraph {
    /// Snapshot the scene as a document
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            rectangles: self.nodes().map(NodeRecord::from).collect(),
            points: self
                .points()
                .map(|p| PointRecord {
                    name: p.name.clone(),
                    x: p.x,
                    y: p.y,
                    is_visible: p.visible,
                })
                .collect(),
            lines: self
                .connectors()
                .map(|c| LineRecord {
                    name: c.name.clone(),
                    start_shape: c.start.name.clone(),
                    end_shape: c.end.name.clone(),
                    start_is_output: c.start_is_output,
                })
                .collect(),
        }
    }

    /// Build a scene from a document, binding pins through `gpio`
    ///
    /// Entities come first, then connectors. A connector that cannot be
    /// resolved is dropped and reported; a pin that cannot be set up is
    /// logged and the node stays bound.
    pub fn from_document(doc: &SceneDocument, gpio: &mut Gpio) -> (SceneGraph, LoadReport) {
        let mut scene = SceneGraph::new();
        let mut report = LoadReport::default();

        for rec in &doc.rectangles {
            let duplicate = scene.node(&rec.name).is_some();
            if duplicate {
                tracing::warn!("Duplicate rectangle '{}', later record wins", rec.name);
            }
            if let Err(e) = scene.add_or_update_node(
                &rec.name, rec.x, rec.y, rec.width, rec.height, rec.gpio, gpio,
            ) {
                tracing::warn!("Rectangle '{}': {}", rec.name, e);
                if scene.node(&rec.name).is_none() {
                    continue;
                }
            }
            scene.restore_node_state(
                &rec.name,
                rec.points_swapped,
                SignalState {
                    red: rec.red_signal,
                    blue: rec.blue_signal,
                    yellow: rec.yellow_signal,
                },
            );
            if !duplicate {
                report.nodes += 1;
            }
        }

        for rec in &doc.points {
            let duplicate = scene.point(&rec.name).is_some();
            if duplicate {
                tracing::warn!("Duplicate point '{}', later record wins", rec.name);
            }
            match scene.add_point(&rec.name, rec.x, rec.y) {
                Ok(()) => {
                    scene.set_point_visible(&rec.name, rec.is_visible);
                    if !duplicate {
                        report.points += 1;
                    }
                }
                Err(e) => tracing::warn!("Point '{}': {}", rec.name, e),
            }
        }

        for rec in &doc.lines {
            let duplicate = scene.connector(&rec.name).is_some();
            match scene.insert_connector(
                rec.name.clone(),
                &rec.start_shape,
                &rec.end_shape,
                rec.start_is_output,
            ) {
                Ok(()) if duplicate => {
                    tracing::warn!("Duplicate line '{}', later record wins", rec.name)
                }
                Ok(()) => report.connectors += 1,
                Err(e) => {
                    tracing::warn!("Dropping line '{}': {}", rec.name, e);
                    report.dropped_connectors.push(rec.name.clone());
                }
            }
        }

        (scene, report)
    }
}

/// Load a scene file, falling back to the built-in scene on any failure
pub fn load_scene_or_default(path: &Path, gpio: &mut Gpio) -> Result<(SceneGraph, Option<LoadReport>)> {
    match SceneDocument::load(path) {
        Ok(doc) => {
            let (scene, report) = SceneGraph::from_document(&doc, gpio);
            tracing::info!("Scene loaded from {}: {}", path.display(), report);
            Ok((scene, Some(report)))
        }
        Err(e) => {
            tracing::warn!("Error loading scene: {}", e);
            tracing::info!("Creating initial setup instead");
            Ok((SceneGraph::default_scene(gpio)?, None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PinLevel, SignalColor};

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{
            "rectangles": [{"name": "r1", "x": 1, "y": 2, "width": 3, "height": 4}],
            "lines": []
        }"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let rec = &doc.rectangles[0];
        assert_eq!(rec.gpio, None);
        assert!(!rec.points_swapped && !rec.red_signal && !rec.blue_signal && !rec.yellow_signal);
        assert!(doc.points.is_empty());
    }

    #[test]
    fn test_point_visibility_defaults_true() {
        let json = r#"{"rectangles": [], "points": [{"name": "p", "x": 0, "y": 0}], "lines": []}"#;
        let doc = SceneDocument::from_json(json).unwrap();
        assert!(doc.points[0].is_visible);
    }

    #[test]
    fn test_gpio_zero_means_unbound() {
        let json = r#"{"rectangles": [{"name": "r1", "x": 0, "y": 0, "width": 10,
            "height": 10, "gpio": 0, "points_swapped": false}], "lines": []}"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let mut gpio = Gpio::simulated();
        let (scene, _) = SceneGraph::from_document(&doc, &mut gpio);
        assert_eq!(scene.node("r1").unwrap().pin, None);
    }

    #[test]
    fn test_dangling_connector_dropped() {
        let json = r#"{
            "rectangles": [{"name": "r1", "x": 0, "y": 0, "width": 10, "height": 10}],
            "points": [{"name": "p1", "x": 50, "y": 50}],
            "lines": [
                {"name": "Line_r1_to_p1", "start_shape": "r1", "end_shape": "p1", "start_is_output": true},
                {"name": "Line_r1_to_ghost", "start_shape": "r1", "end_shape": "ghost", "start_is_output": true}
            ]
        }"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let mut gpio = Gpio::simulated();
        let (scene, report) = SceneGraph::from_document(&doc, &mut gpio);

        assert_eq!(scene.connector_count(), 1);
        assert!(scene.connector("Line_r1_to_ghost").is_none());
        assert_eq!(report.dropped_connectors, vec!["Line_r1_to_ghost".to_string()]);
        assert_eq!((report.nodes, report.points), (1, 1));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_document_round_trip() {
        let mut gpio = Gpio::simulated();
        let mut scene = SceneGraph::new();
        scene
            .add_or_update_node("r1", 0.0, 0.0, 100.0, 50.0, Some(5), &mut gpio)
            .unwrap();
        scene
            .add_or_update_node("r2", 200.0, 0.0, 100.0, 50.0, None, &mut gpio)
            .unwrap();
        scene.add_point("p1", 150.0, 150.0).unwrap();
        scene.switch_points("r2").unwrap();
        scene.connect("r1", "r2").unwrap();
        scene.connect_with("p1", "r2", false).unwrap();
        scene.set_signal("r1", SignalColor::Yellow, true, &mut gpio).unwrap();
        scene.toggle_all_points_visibility();

        let doc = scene.to_document();
        let json = doc.to_json().unwrap();
        let parsed = SceneDocument::from_json(&json).unwrap();
        assert_eq!(parsed, doc);

        let (restored, report) = SceneGraph::from_document(&parsed, &mut gpio);
        assert!(report.is_clean());
        assert_eq!(restored.to_document(), doc);
    }

    #[test]
    fn test_loaded_signals_survive() {
        let json = r#"{"rectangles": [{"name": "n1", "x": 0, "y": 0, "width": 10, "height": 10,
            "gpio": 5, "points_swapped": true, "red_signal": true}], "lines": []}"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let mut gpio = Gpio::simulated();
        let (scene, _) = SceneGraph::from_document(&doc, &mut gpio);
        let node = scene.node("n1").unwrap();
        assert!(node.signals.red && node.points_swapped);
        assert!(gpio.is_configured(5));
        // Loading does not push flags into the mock table
        assert_eq!(gpio.mock_value(5), PinLevel::Low);
    }

    #[test]
    fn test_duplicate_records_counted_once() {
        let json = r#"{
            "rectangles": [
                {"name": "r1", "x": 0, "y": 0, "width": 10, "height": 10},
                {"name": "r1", "x": 40, "y": 0, "width": 10, "height": 10}
            ],
            "points": [{"name": "p1", "x": 5, "y": 5}, {"name": "p1", "x": 6, "y": 6}],
            "lines": [
                {"name": "l", "start_shape": "r1", "end_shape": "p1"},
                {"name": "l", "start_shape": "p1", "end_shape": "r1"}
            ]
        }"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let mut gpio = Gpio::simulated();
        let (scene, report) = SceneGraph::from_document(&doc, &mut gpio);

        assert_eq!((report.nodes, report.points, report.connectors), (1, 1, 1));
        assert_eq!(
            (report.nodes, report.points, report.connectors),
            (scene.node_count(), scene.point_count(), scene.connector_count())
        );
        assert_eq!(scene.node("r1").unwrap().x, 40.0);
        assert_eq!(scene.connector("l").unwrap().start.name, "p1");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let mut gpio = Gpio::simulated();
        let (scene, report) =
            load_scene_or_default(Path::new("/nonexistent/dir/scene.json"), &mut gpio).unwrap();
        assert!(report.is_none());
        assert_eq!(scene.node_count(), 3);
    }
}
