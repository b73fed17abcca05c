//! Detection of interiors split into disconnected pieces.

use crate::algorithm::signed_area;
use crate::geometry::Geometry;
use crate::graph::{EdgeEnd, GeometryGraph, Location, NodeMap, Position};
use crate::primitives::Point2;
use num_traits::Float;

/// Tests whether the ring layout of an area geometry splits its interior
/// into more than one connected piece.
///
/// The noded ring arrangement is turned into directed edges and each
/// directed edge is assigned to the face orbit it bounds: at the far node,
/// travel continues on the counter-clockwise successor of the reversed
/// edge, which walks each face keeping it on the right. A bounded face's
/// orbit is clockwise; the orbit of a face on a ring's non-interior side
/// never claims the interior on its right. Starting from each polygon
/// shell, the orbit bounding the interior is marked; an unmarked clockwise
/// orbit that still claims the interior on its right is an interior piece
/// no shell can reach, so the interior is disconnected.
///
/// Returns a coordinate on a disconnected piece, or `None` when the
/// interior is connected. Runs on every area geometry regardless of the
/// self-touching-ring setting: a self-touch that merely forms a hole
/// leaves one interior face, while a bow-tie or interior-splitting touch
/// creates a second face and is always detected here.
pub fn find_interior_disconnection<F: Float>(
    graph: &mut GeometryGraph<F>,
    geometry: &Geometry<F>,
) -> Option<Point2<F>> {
    graph.compute_self_nodes();
    let split = graph.split_edges();
    if split.is_empty() {
        return None;
    }
    let geom = graph.arg_index();

    // Two directed edges per split edge: 2*i forward, 2*i+1 backward.
    let mut nodes: NodeMap<F> = NodeMap::new();
    for (i, (edge, _)) in split.iter().enumerate() {
        let pts = edge.coordinates();
        nodes.add_edge_end(EdgeEnd {
            origin: pts[0],
            directed: pts[1],
            label: edge.label,
            edge: 2 * i,
        });
        nodes.add_edge_end(EdgeEnd {
            origin: pts[pts.len() - 1],
            directed: pts[pts.len() - 2],
            label: edge.label.flipped(),
            edge: 2 * i + 1,
        });
    }

    let de_count = 2 * split.len();
    let de_pts = |de: usize| -> Vec<Point2<F>> {
        let pts = split[de / 2].0.coordinates();
        if de % 2 == 0 {
            pts.to_vec()
        } else {
            pts.iter().rev().copied().collect()
        }
    };
    let de_label_right = |de: usize| -> Option<Location> {
        let label = split[de / 2].0.label;
        let label = if de % 2 == 0 { label } else { label.flipped() };
        label.get(geom, Position::Right)
    };

    // Successor in the face orbit: the counter-clockwise next edge-end
    // after the reversed edge at the far node.
    let next_de = |de: usize| -> usize {
        let pts = de_pts(de);
        let far = pts[pts.len() - 1];
        let star = nodes
            .find(far)
            .expect("split edge endpoint must be a node");
        let ends = star.star.ends();
        let sym = de ^ 1;
        let pos = ends
            .iter()
            .position(|e| e.edge == sym)
            .expect("reversed edge must be in the far node's star");
        ends[(pos + 1) % ends.len()].edge
    };

    // Assign every directed edge to its orbit and classify the orbits.
    const UNASSIGNED: usize = usize::MAX;
    let mut orbit_of = vec![UNASSIGNED; de_count];
    let mut orbit_is_cw: Vec<bool> = Vec::new();
    for start in 0..de_count {
        if orbit_of[start] != UNASSIGNED {
            continue;
        }
        let orbit_id = orbit_is_cw.len();
        let mut ring_coords: Vec<Point2<F>> = Vec::new();
        let mut de = start;
        loop {
            orbit_of[de] = orbit_id;
            let pts = de_pts(de);
            ring_coords.extend_from_slice(&pts[..pts.len() - 1]);
            de = next_de(de);
            if de == start {
                break;
            }
        }
        ring_coords.push(ring_coords[0]);
        orbit_is_cw.push(signed_area(&ring_coords) < F::zero());
    }

    // Mark the interior-bounding orbit reachable from each shell.
    let mut visited = vec![false; orbit_is_cw.len()];
    for shell in shells(geometry) {
        let parent = match graph.find_edge_index(shell) {
            Some(p) => p,
            None => continue,
        };
        let first_piece = match split.iter().position(|(_, p)| *p == parent) {
            Some(i) => i,
            None => continue,
        };
        let forward = 2 * first_piece;
        let de = if de_label_right(forward) == Some(Location::Interior) {
            forward
        } else if de_label_right(forward ^ 1) == Some(Location::Interior) {
            forward ^ 1
        } else {
            continue;
        };
        visited[orbit_of[de]] = true;
    }

    // Any unvisited clockwise orbit with the interior on its right is a
    // disconnected interior piece.
    for de in 0..de_count {
        let orbit = orbit_of[de];
        if !visited[orbit]
            && orbit_is_cw[orbit]
            && de_label_right(de) == Some(Location::Interior)
        {
            return Some(de_pts(de)[0]);
        }
    }
    None
}

/// Iterates the shell rings' coordinate sequences of an area geometry.
fn shells<F: Float>(geometry: &Geometry<F>) -> Vec<&[Point2<F>]> {
    let mut out: Vec<&[Point2<F>]> = Vec::new();
    collect_shells(geometry, &mut out);
    out
}

fn collect_shells<'g, F: Float>(geometry: &'g Geometry<F>, out: &mut Vec<&'g [Point2<F>]>) {
    match geometry {
        Geometry::Polygon(p) => out.push(&p.shell.coords),
        Geometry::MultiPolygon(ps) => {
            for p in ps {
                out.push(&p.shell.coords);
            }
        }
        Geometry::GeometryCollection(gs) => {
            for g in gs {
                collect_shells(g, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, Polygon};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LinearRing::new(pts(shell)),
            holes.iter().map(|h| LinearRing::new(pts(h))).collect(),
        ))
    }

    fn disconnection(g: &Geometry<f64>) -> Option<Point2<f64>> {
        let mut graph = GeometryGraph::new(0, g);
        find_interior_disconnection(&mut graph, g)
    }

    #[test]
    fn test_simple_polygon_connected() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[],
        );
        assert_eq!(disconnection(&g), None);
    }

    #[test]
    fn test_polygon_with_disjoint_hole_connected() {
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]],
        );
        assert_eq!(disconnection(&g), None);
    }

    #[test]
    fn test_vertex_bowtie_disconnected() {
        let g = polygon(
            &[
                (0.0, 0.0),
                (2.0, 0.0),
                (1.0, 1.0),
                (2.0, 2.0),
                (0.0, 2.0),
                (1.0, 1.0),
                (0.0, 0.0),
            ],
            &[],
        );
        assert!(disconnection(&g).is_some());
    }

    #[test]
    fn test_hole_splitting_interior_disconnected() {
        // A hole whose two ends touch the shell boundary, cutting the
        // square's interior into left and right pieces.
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(5.0, 0.0), (6.0, 5.0), (5.0, 10.0), (4.0, 5.0), (5.0, 0.0)]],
        );
        assert!(disconnection(&g).is_some());
    }

    #[test]
    fn test_self_touch_forming_hole_connected() {
        // The shell touches itself at one vertex, enclosing a triangular
        // pocket. The interior stays connected; only the self-touch rule
        // (a different validity stage) objects to this shape.
        let g = polygon(
            &[
                (0.0, 0.0),
                (8.0, 0.0),
                (8.0, 8.0),
                (4.0, 8.0),
                (6.0, 4.0),
                (2.0, 4.0),
                (4.0, 8.0),
                (0.0, 8.0),
                (0.0, 0.0),
            ],
            &[],
        );
        assert_eq!(disconnection(&g), None);
    }

    #[test]
    fn test_touching_holes_still_connected() {
        // Two holes sharing a single vertex do not disconnect the
        // interior around them.
        let g = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[
                &[(2.0, 2.0), (5.0, 2.0), (5.0, 5.0), (2.0, 2.0)],
                &[(5.0, 5.0), (8.0, 5.0), (8.0, 8.0), (5.0, 5.0)],
            ],
        );
        assert_eq!(disconnection(&g), None);
    }
}
