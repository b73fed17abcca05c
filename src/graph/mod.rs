//! Planar topology graph.
//!
//! A geometry graph organizes the edges of one or more geometries into a
//! graph of labeled edges and nodes. Each edge carries, per input
//! geometry, the topological location (interior, boundary, exterior) of
//! the regions on and to either side of it; each node owns a radially
//! sorted star of the edge-ends incident on it. The validity checker is
//! built entirely on this structure.

mod edge;
mod edge_end;
mod geometry_graph;
mod label;
mod matrix;
mod node;

pub use edge::Edge;
pub use edge_end::{EdgeEnd, EdgeEndBundle, EdgeEndStar};
pub use geometry_graph::{GeometryGraph, SelfIntersectionInfo};
pub use label::{Label, Location, Position};
pub use matrix::{Dimension, IntersectionMatrix};
pub use node::{Node, NodeMap};
