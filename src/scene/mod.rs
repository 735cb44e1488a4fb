//! Scene model: entities, connectors, the graph that owns them and the file
//! format they are saved in
//!
//! # Components
//!
//! - [`Node`] / [`Point`] - Entities, both [`Connectable`]
//! - [`Connector`] - Directed line between two entities
//! - [`SceneGraph`] - Owner of all entities; enforces naming and cascade rules
//! - [`SceneDocument`] - JSON persistence

pub mod connector;
pub mod document;
pub mod entity;
pub mod graph;

pub use connector::{connector_name, Connector, EndpointRef};
pub use document::{
    load_scene_or_default, LineRecord, LoadReport, NodeRecord, PointRecord, SceneDocument,
};
pub use entity::{Connectable, EntityKind, Node, Point, POINT_HIT_RADIUS};
pub use graph::{read_scene, write_scene, Connection, SceneGraph, SharedScene};
