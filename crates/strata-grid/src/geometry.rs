//! Corner-point cell geometry.
//!
//! Each cell is an irregular hexahedron whose eight corners are found by
//! intersecting its four pillars with the cell's depth samples. Volumes
//! are computed from two fixed surface triangulations, each closed into
//! tetrahedra around the cell center, and averaged.

use std::ops::{Add, Mul, Sub};

use strata_core::{GeometryIssue, Ijk};

use crate::store::PillarStore;

/// A point (or vector) in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate (depth).
    pub z: f64,
}

impl Point3 {
    /// Construct a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Whether every coordinate is finite and below `threshold` in
    /// magnitude.
    pub fn is_defined(self, threshold: f64) -> bool {
        [self.x, self.y, self.z]
            .iter()
            .all(|v| v.is_finite() && v.abs() < threshold)
    }

    /// Arithmetic mean of a set of points. Empty input yields the origin.
    pub fn mean(points: &[Point3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let sum = points.iter().fold(Self::default(), |acc, &p| acc + p);
        sum * (1.0 / points.len() as f64)
    }
}

impl Add for Point3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ── Surface triangulations ──────────────────────────────────────

/// First closed surface triangulation, by corner number.
const TRIANGLES_A: [[usize; 3]; 12] = [
    [0, 1, 2],
    [3, 2, 1],
    [6, 2, 7],
    [3, 7, 2],
    [0, 2, 4],
    [6, 4, 2],
    [3, 1, 7],
    [5, 7, 1],
    [0, 4, 1],
    [5, 1, 4],
    [5, 4, 7],
    [6, 7, 4],
];

/// Second triangulation, with every quadrilateral face split along its
/// other diagonal.
const TRIANGLES_B: [[usize; 3]; 12] = [
    [1, 3, 0],
    [2, 0, 3],
    [2, 3, 6],
    [7, 6, 3],
    [2, 6, 0],
    [4, 0, 6],
    [7, 3, 5],
    [1, 5, 3],
    [1, 0, 5],
    [4, 5, 0],
    [7, 5, 6],
    [4, 6, 5],
];

const TOP: [usize; 4] = [0, 1, 2, 3];
const BOTTOM: [usize; 4] = [4, 5, 6, 7];

// ── Per-corner evaluation ──────────────────────────────────────

/// The eight corner points of cell `ijk`.
///
/// Corner `c` is the point on pillar `(i + c%2, j + (c%4)/2)` at the
/// cell's depth sample for that corner. `ijk` must lie inside the grid.
pub fn cell_corners(store: &PillarStore, ijk: Ijk) -> [Point3; 8] {
    let depths = store.cell_depths(ijk);
    std::array::from_fn(|c| store.corner_pillar(ijk, c).at_depth(depths[c]))
}

/// Mean of the eight corners.
pub fn center(corners: &[Point3; 8]) -> Point3 {
    Point3::mean(corners)
}

fn signed_volume(corners: &[Point3; 8], center: Point3, triangles: &[[usize; 3]; 12]) -> f64 {
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let a = corners[a] - center;
            let b = corners[b] - center;
            let c = corners[c] - center;
            a.dot(b.cross(c)) / 6.0
        })
        .sum()
}

/// Unsigned cell volume.
pub fn volume(corners: &[Point3; 8]) -> f64 {
    let c = center(corners);
    let a = signed_volume(corners, c, &TRIANGLES_A);
    let b = signed_volume(corners, c, &TRIANGLES_B);
    (0.5 * (a + b)).abs()
}

fn face_mean(corners: &[Point3; 8], face: [usize; 4]) -> Point3 {
    Point3::mean(&face.map(|c| corners[c]))
}

/// Distance between the centers of the top and bottom faces.
pub fn thickness(corners: &[Point3; 8]) -> f64 {
    face_mean(corners, TOP).distance(face_mean(corners, BOTTOM))
}

/// Mean depth of the top face.
pub fn top_depth(corners: &[Point3; 8]) -> f64 {
    face_mean(corners, TOP).z
}

/// Mean depth of the bottom face.
pub fn bottom_depth(corners: &[Point3; 8]) -> f64 {
    face_mean(corners, BOTTOM).z
}

/// Cell extents `(dx, dy, dz)`: distances between opposite face centers.
pub fn dimensions(corners: &[Point3; 8]) -> [f64; 3] {
    let dx = face_mean(corners, [0, 2, 4, 6]).distance(face_mean(corners, [1, 3, 5, 7]));
    let dy = face_mean(corners, [0, 1, 4, 5]).distance(face_mean(corners, [2, 3, 6, 7]));
    [dx, dy, thickness(corners)]
}

/// Classify a cell as usable or degenerate.
///
/// A cell whose corners are undefined (non-finite or at or beyond
/// `undefined_threshold`) is [`GeometryIssue::NonFinite`]; one with no
/// separation between any top corner and the bottom corner on the same
/// pillar is [`GeometryIssue::Collapsed`].
pub fn classify(corners: &[Point3; 8], undefined_threshold: f64) -> Option<GeometryIssue> {
    if !corners.iter().all(|p| p.is_defined(undefined_threshold)) {
        return Some(GeometryIssue::NonFinite);
    }
    let max_sep = TOP
        .iter()
        .map(|&c| corners[c].distance(corners[c + 4]))
        .fold(0.0_f64, f64::max);
    if max_sep <= 0.0 {
        return Some(GeometryIssue::Collapsed);
    }
    None
}

/// Evaluated geometry of one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGeometry {
    /// The eight corners, in corner order.
    pub corners: [Point3; 8],
    /// Mean of the corners.
    pub center: Point3,
    /// Bulk volume; exactly zero for degenerate cells.
    pub volume: f64,
    /// Distance between top and bottom face centers.
    pub thickness: f64,
    /// Mean depth of the top face.
    pub top_depth: f64,
    /// Mean depth of the bottom face.
    pub bottom_depth: f64,
    /// Why the cell is degenerate, if it is.
    pub issue: Option<GeometryIssue>,
}

impl CellGeometry {
    /// Evaluate cell `ijk`. `ijk` must lie inside the grid.
    pub fn evaluate(store: &PillarStore, ijk: Ijk, undefined_threshold: f64) -> Self {
        let corners = cell_corners(store, ijk);
        let issue = classify(&corners, undefined_threshold);
        let volume = if issue.is_some() { 0.0 } else { volume(&corners) };
        Self {
            center: center(&corners),
            volume,
            thickness: thickness(&corners),
            top_depth: top_depth(&corners),
            bottom_depth: bottom_depth(&corners),
            corners,
            issue,
        }
    }

    /// Whether the cell has usable geometry.
    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }

    /// Cell-center depth.
    pub fn depth(&self) -> f64 {
        self.center.z
    }

    /// Cell extents `(dx, dy, dz)`.
    pub fn dimensions(&self) -> [f64; 3] {
        dimensions(&self.corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::GridDims;

    fn box_corners(dx: f64, dy: f64, dz: f64, shear: f64) -> [Point3; 8] {
        std::array::from_fn(|c| {
            let z = (c / 4) as f64 * dz;
            Point3::new(
                (c % 2) as f64 * dx + shear * z,
                ((c % 4) / 2) as f64 * dy,
                z,
            )
        })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn vector_ops() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(a.dot(b), 0.0);
        assert_eq!((a + b) * 2.0, Point3::new(2.0, 2.0, 0.0));
        assert!(close(a.distance(b), 2.0_f64.sqrt()));
    }

    #[test]
    fn box_volume_and_thickness() {
        let c = box_corners(2.0, 3.0, 4.0, 0.0);
        assert!(close(volume(&c), 24.0));
        assert!(close(thickness(&c), 4.0));
        assert_eq!(center(&c), Point3::new(1.0, 1.5, 2.0));
        assert_eq!(top_depth(&c), 0.0);
        assert_eq!(bottom_depth(&c), 4.0);
        let d = dimensions(&c);
        assert!(close(d[0], 2.0) && close(d[1], 3.0) && close(d[2], 4.0));
    }

    #[test]
    fn shear_preserves_volume() {
        let c = box_corners(2.0, 3.0, 4.0, 0.5);
        assert!(close(volume(&c), 24.0));
    }

    #[test]
    fn collapsed_cell_is_flagged() {
        let c = box_corners(1.0, 1.0, 0.0, 0.0);
        assert_eq!(classify(&c, 1e20), Some(GeometryIssue::Collapsed));
    }

    #[test]
    fn undefined_corner_is_flagged() {
        let mut c = box_corners(1.0, 1.0, 1.0, 0.0);
        c[5].z = f64::NAN;
        assert_eq!(classify(&c, 1e20), Some(GeometryIssue::NonFinite));
        c[5].z = 1e20;
        assert_eq!(classify(&c, 1e20), Some(GeometryIssue::NonFinite));
        c[5].z = 1.0;
        assert_eq!(classify(&c, 1e20), None);
    }

    #[test]
    fn evaluate_from_store() {
        let dims = GridDims::new(1, 1, 1).unwrap();
        let mut coord = Vec::new();
        for j in 0..2 {
            for i in 0..2 {
                let (x, y) = (i as f64 * 10.0, j as f64 * 20.0);
                coord.extend_from_slice(&[x, y, 0.0, x, y, 100.0]);
            }
        }
        let zcorn = [vec![1000.0; 4], vec![1005.0; 4]].concat();
        let store = PillarStore::new(dims, coord, zcorn).unwrap();
        let geo = CellGeometry::evaluate(&store, Ijk::new(0, 0, 0), 1e20);
        assert!(geo.is_valid());
        assert!(close(geo.volume, 1000.0));
        assert!(close(geo.thickness, 5.0));
        assert!(close(geo.depth(), 1002.5));
        assert_eq!(geo.corners[3], Point3::new(10.0, 20.0, 1000.0));
    }

    #[test]
    fn collapsed_store_cell_has_zero_volume() {
        let dims = GridDims::new(1, 1, 1).unwrap();
        let mut coord = Vec::new();
        for j in 0..2 {
            for i in 0..2 {
                coord.extend_from_slice(&[i as f64, j as f64, 0.0, i as f64, j as f64, 1.0]);
            }
        }
        let store = PillarStore::new(dims, coord, vec![3.0; 8]).unwrap();
        let geo = CellGeometry::evaluate(&store, Ijk::new(0, 0, 0), 1e20);
        assert_eq!(geo.issue, Some(GeometryIssue::Collapsed));
        assert_eq!(geo.volume, 0.0);
    }
}
