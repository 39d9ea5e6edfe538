//! Satellite positions and the point set they form

use crate::error::{AnalysisError, AnalysisResult};
use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Satellite identifier as read from the `sat_id` column.
///
/// Integer identifiers order numerically; when both kinds are mixed in one
/// set, every `Int` sorts before every `Label`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Int(i64),
    Label(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Int(id) => write!(f, "{}", id),
            PointId::Label(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PointId {
    fn from(id: i64) -> Self {
        PointId::Int(id)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        PointId::Label(id.to_string())
    }
}

/// A labeled position in 3-D space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub position: [f64; 3],
}

impl Point {
    pub fn new(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: PointId::Int(id),
            position: [x, y, z],
        }
    }

    pub fn labeled(id: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: PointId::from(id),
            position: [x, y, z],
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Closest and farthest pair distances within a point set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceExtremes {
    pub min: f64,
    pub max: f64,
}

/// Immutable, insertion-ordered collection of points with unique identifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointSet {
    points: Vec<Point>,
}

impl TryFrom<Vec<Point>> for PointSet {
    type Error = AnalysisError;

    fn try_from(points: Vec<Point>) -> AnalysisResult<Self> {
        Self::new(points)
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}

impl PointSet {
    /// Validate and wrap a sequence of points.
    ///
    /// Fails with `InvalidInput` on a non-finite coordinate or a repeated identifier.
    pub fn new(points: Vec<Point>) -> AnalysisResult<Self> {
        let mut seen = HashSet::with_capacity(points.len());

        for point in &points {
            if point.position.iter().any(|c| !c.is_finite()) {
                return Err(AnalysisError::InvalidInput(format!(
                    "point {} has a non-finite coordinate {:?}",
                    point.id, point.position
                )));
            }
            if !seen.insert(&point.id) {
                return Err(AnalysisError::InvalidInput(format!(
                    "duplicate point identifier {}",
                    point.id
                )));
            }
        }

        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn ids(&self) -> Vec<PointId> {
        self.points.iter().map(|p| p.id.clone()).collect()
    }

    /// Full symmetric matrix of pairwise Euclidean distances
    pub fn distance_matrix(&self) -> Array2<f64> {
        let n = self.points.len();
        Array2::from_shape_fn((n, n), |(i, j)| {
            self.points[i].distance_to(&self.points[j])
        })
    }

    /// Minimum and maximum distance over distinct pairs, `None` below two points
    pub fn distance_extremes(&self) -> Option<DistanceExtremes> {
        let matrix = self.distance_matrix();

        (0..self.points.len())
            .tuple_combinations::<(usize, usize)>()
            .map(|(i, j)| matrix[[i, j]])
            .fold(None, |acc: Option<DistanceExtremes>, d| match acc {
                None => Some(DistanceExtremes { min: d, max: d }),
                Some(ext) => Some(DistanceExtremes {
                    min: ext.min.min(d),
                    max: ext.max.max(d),
                }),
            })
    }
}
