//! Spatial indexes over bounding boxes and points.

mod kdtree;
mod quadtree;
mod strtree;

pub use kdtree::KdTree;
pub use quadtree::Quadtree;
pub use strtree::StrTree;
