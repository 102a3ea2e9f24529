//! Host-mirrored polygon mesh.
//!
//! The host owns the real mesh; this is the value the engine reads from and
//! commits normals back into. Indices are stable for the duration of one
//! edit session.

mod mask;

pub use mask::{VertexMask, DEFAULT_MASK_GROUP};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::Range;

use crate::error::MeshError;
use crate::math::{Point3, Vector3, TOLERANCE};

/// A mesh vertex.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position in object space.
    pub position: Point3,
    /// Geometric (area-weighted) vertex normal.
    pub normal: Vector3,
    /// Selection flag.
    pub select: bool,
}

/// An edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub vertices: [usize; 2],
}

/// A polygon, referencing a contiguous run of corners.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Index of the first corner.
    pub loop_start: usize,
    /// Number of corners.
    pub loop_total: usize,
    /// Face normal.
    pub normal: Vector3,
    /// Selection flag.
    pub select: bool,
}

impl Polygon {
    /// Range of corner indices owned by this polygon.
    #[must_use]
    pub fn corners(&self) -> Range<usize> {
        self.loop_start..self.loop_start + self.loop_total
    }
}

/// One polygon's use of one vertex.
#[derive(Debug, Clone)]
pub struct Corner {
    /// Owning vertex.
    pub vertex: usize,
    /// Split normal of this corner.
    pub normal: Vector3,
}

/// A polygon mesh with per-corner normals and named vertex groups.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub polygons: Vec<Polygon>,
    pub corners: Vec<Corner>,
    /// Named vertex groups (group name -> member vertex indices).
    pub vertex_groups: BTreeMap<String, BTreeSet<usize>>,
    has_custom_normals: bool,
    normals_revision: u64,
}

impl Mesh {
    /// Builds a mesh from vertex positions and polygon index lists.
    ///
    /// Edges are derived from polygon boundaries in first-seen order. Face
    /// normals use Newell's method; vertex normals are the normalized sum of
    /// area-weighted face normals. Corners start with their vertex normal and
    /// the mesh carries no custom normals.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidMesh`] if a polygon has fewer than three
    /// corners or references a vertex that does not exist.
    pub fn from_polygons(positions: &[Point3], faces: &[Vec<usize>]) -> Result<Self, MeshError> {
        let mut vertices: Vec<Vertex> = positions
            .iter()
            .map(|&position| Vertex {
                position,
                normal: Vector3::zeros(),
                select: false,
            })
            .collect();

        let mut edges = Vec::new();
        let mut seen_edges = HashSet::new();
        let mut polygons = Vec::with_capacity(faces.len());
        let mut corners = Vec::new();
        let mut accumulated = vec![Vector3::zeros(); positions.len()];

        for (face_index, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::InvalidMesh(format!(
                    "polygon {face_index} has {} corners",
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&v| v >= positions.len()) {
                return Err(MeshError::InvalidMesh(format!(
                    "polygon {face_index} references vertex {bad} of {}",
                    positions.len()
                )));
            }

            let area_normal = newell_normal(face.iter().map(|&v| &positions[v]));
            for (i, &v) in face.iter().enumerate() {
                let next = face[(i + 1) % face.len()];
                let key = (v.min(next), v.max(next));
                if seen_edges.insert(key) {
                    edges.push(Edge {
                        vertices: [v, next],
                    });
                }
                accumulated[v] += area_normal;
            }

            let loop_start = corners.len();
            corners.extend(face.iter().map(|&vertex| Corner {
                vertex,
                normal: Vector3::zeros(),
            }));
            polygons.push(Polygon {
                loop_start,
                loop_total: face.len(),
                normal: normalize_or_zero(&area_normal),
                select: false,
            });
        }

        for (vertex, sum) in vertices.iter_mut().zip(&accumulated) {
            vertex.normal = normalize_or_zero(sum);
        }
        for corner in &mut corners {
            corner.normal = vertices[corner.vertex].normal;
        }

        Ok(Self {
            vertices,
            edges,
            polygons,
            corners,
            vertex_groups: BTreeMap::new(),
            has_custom_normals: false,
            normals_revision: 0,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Whether per-corner normal overrides are present.
    #[must_use]
    pub fn has_custom_normals(&self) -> bool {
        self.has_custom_normals
    }

    /// Counter bumped by every committed corner-normal write.
    #[must_use]
    pub fn normals_revision(&self) -> u64 {
        self.normals_revision
    }

    /// Adds a standalone edge, e.g. a wire edge with no polygon.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.edges.push(Edge { vertices: [a, b] });
    }

    /// Sets the selection flag of the given vertices.
    pub fn select_vertices(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(v) = self.vertices.get_mut(i) {
                v.select = true;
            }
        }
    }

    /// Sets the selection flag of every vertex.
    pub fn select_all(&mut self) {
        for v in &mut self.vertices {
            v.select = true;
        }
    }

    /// Sets the selection flag of the given polygons.
    pub fn select_polygons(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(p) = self.polygons.get_mut(i) {
                p.select = true;
            }
        }
    }

    /// Indices of the selected vertices, in index order.
    pub fn selected_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.select.then_some(i))
    }

    /// Checks that every edge, corner and polygon reference is in range.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidMesh`] naming the first stale reference.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.vertices.iter().any(|&v| v >= vertex_count) {
                return Err(MeshError::InvalidMesh(format!(
                    "edge {i} references vertex outside 0..{vertex_count}"
                )));
            }
        }
        for (i, corner) in self.corners.iter().enumerate() {
            if corner.vertex >= vertex_count {
                return Err(MeshError::InvalidMesh(format!(
                    "corner {i} references vertex {} of {vertex_count}",
                    corner.vertex
                )));
            }
        }
        for (i, polygon) in self.polygons.iter().enumerate() {
            if polygon.corners().end > self.corners.len() {
                return Err(MeshError::InvalidMesh(format!(
                    "polygon {i} spans corners {:?} of {}",
                    polygon.corners(),
                    self.corners.len()
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn store_corner_normals(&mut self, normals: &[Vector3]) {
        for (corner, normal) in self.corners.iter_mut().zip(normals) {
            corner.normal = *normal;
        }
        self.has_custom_normals = true;
        self.normals_revision += 1;
    }
}

/// Area-weighted polygon normal (magnitude is twice the polygon area).
fn newell_normal<'a>(points: impl Iterator<Item = &'a Point3>) -> Vector3 {
    let mut normal = Vector3::zeros();
    let ring: Vec<&Point3> = points.collect();
    for (i, cur) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        normal.x += (cur.y - next.y) * (cur.z + next.z);
        normal.y += (cur.z - next.z) * (cur.x + next.x);
        normal.z += (cur.x - next.x) * (cur.y + next.y);
    }
    normal
}

fn normalize_or_zero(v: &Vector3) -> Vector3 {
    let len = v.norm();
    if len > TOLERANCE {
        v / len
    } else {
        Vector3::zeros()
    }
}
