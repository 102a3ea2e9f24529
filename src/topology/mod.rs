//! Vertex-centred lookup tables derived from mesh topology.
//!
//! Indices are rebuilt for every top-level operation; the host may have
//! changed the mesh since the last one.

use std::collections::BTreeSet;

use crate::error::MeshError;
use crate::mesh::Mesh;

/// Vertex -> corners and vertex -> 1-ring tables for one mesh snapshot.
#[derive(Debug, Clone, Default)]
pub struct TopologyIndex {
    corners: Vec<Vec<usize>>,
    neighbors: Vec<BTreeSet<usize>>,
}

impl TopologyIndex {
    /// Builds both tables.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidMesh`] if the mesh holds stale references.
    pub fn build(mesh: &Mesh) -> Result<Self, MeshError> {
        mesh.validate()?;
        Ok(Self {
            corners: build_corner_index(mesh),
            neighbors: build_adjacency(mesh),
        })
    }

    /// Corners of `vertex` in polygon traversal order.
    #[must_use]
    pub fn corners(&self, vertex: usize) -> &[usize] {
        self.corners.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Vertices sharing an edge with `vertex`.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(vertex).into_iter().flatten().copied()
    }

    /// Number of vertices indexed.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.corners.len()
    }
}

/// For each polygon and each of its corners, appends the corner index to its
/// vertex's bucket.
///
/// The mesh must be valid; corners referencing unknown vertices are dropped.
#[must_use]
pub fn build_corner_index(mesh: &Mesh) -> Vec<Vec<usize>> {
    let mut to_corners = vec![Vec::new(); mesh.vertex_count()];
    for polygon in &mesh.polygons {
        for corner in polygon.corners() {
            let Some(c) = mesh.corners.get(corner) else {
                continue;
            };
            if let Some(bucket) = to_corners.get_mut(c.vertex) {
                bucket.push(corner);
            }
        }
    }
    to_corners
}

/// Symmetric 1-ring adjacency built from the edge list.
#[must_use]
pub fn build_adjacency(mesh: &Mesh) -> Vec<BTreeSet<usize>> {
    let vertex_count = mesh.vertex_count();
    let mut neighbors = vec![BTreeSet::new(); vertex_count];
    for edge in &mesh.edges {
        let [a, b] = edge.vertices;
        if a >= vertex_count || b >= vertex_count {
            continue;
        }
        neighbors[a].insert(b);
        neighbors[b].insert(a);
    }
    neighbors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn two_triangles() -> Mesh {
        Mesh::from_polygons(
            &[
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            &[vec![0, 1, 2], vec![0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn corner_buckets_follow_traversal_order() {
        let index = TopologyIndex::build(&two_triangles()).unwrap();
        assert_eq!(index.corners(0), &[0, 3]);
        assert_eq!(index.corners(1), &[1]);
        assert_eq!(index.corners(2), &[2, 4]);
        assert_eq!(index.corners(3), &[5]);
        assert!(index.corners(99).is_empty());
    }

    #[test]
    fn every_corner_lands_in_its_vertex_bucket() {
        let mesh = two_triangles();
        let table = build_corner_index(&mesh);
        let total: usize = table.iter().map(Vec::len).sum();
        assert_eq!(total, mesh.corner_count());
        for (v, bucket) in table.iter().enumerate() {
            for &c in bucket {
                assert_eq!(mesh.corners[c].vertex, v);
            }
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let index = TopologyIndex::build(&two_triangles()).unwrap();
        assert_eq!(index.neighbors(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(index.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(index.neighbors(3).collect::<Vec<_>>(), vec![0, 2]);
        for v in 0..index.vertex_count() {
            for n in index.neighbors(v) {
                assert!(index.neighbors(n).any(|m| m == v));
            }
        }
    }

    #[test]
    fn wire_edge_contributes_both_directions() {
        let mut mesh = two_triangles();
        mesh.vertices.push(crate::mesh::Vertex {
            position: p(5.0, 5.0, 5.0),
            normal: crate::math::Vector3::z(),
            select: false,
        });
        mesh.add_edge(4, 1);
        let index = TopologyIndex::build(&mesh).unwrap();
        assert_eq!(index.neighbors(4).collect::<Vec<_>>(), vec![1]);
        assert!(index.neighbors(1).any(|n| n == 4));
        assert!(index.corners(4).is_empty());
    }

    #[test]
    fn stale_mesh_is_rejected() {
        let mut mesh = two_triangles();
        mesh.corners[0].vertex = 17;
        assert!(matches!(
            TopologyIndex::build(&mesh),
            Err(MeshError::InvalidMesh(_))
        ));
    }
}
