mod rotation;

use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};
use thiserror::Error;

pub use rotation::{Rotation, RotationError};

pub type FloatType = f32;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;

/// Vectors shorter than this can't be normalized, denominators smaller than this
/// count as parallel.
pub const EPSILON: FloatType = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq, Error)]
#[error("Zero length vector can't be normalized (length {length})")]
pub struct DegenerateVectorError {
    pub length: FloatType,
}

pub fn try_normalize(v: &WorldVector) -> Result<Unit<WorldVector>, DegenerateVectorError> {
    Unit::try_new(*v, EPSILON).ok_or(DegenerateVectorError { length: v.norm() })
}

/// Reflects `direction` around a surface with the given normal.
pub fn reflect(direction: &WorldVector, normal: &Unit<WorldVector>) -> WorldVector {
    direction - normal.as_ref() * (2.0 * direction.dot(normal.as_ref()))
}

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray.
    /// Doesn't have to be normalized, but distances between hits only compare
    /// meaningfully if it is.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray { origin, direction }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }

    /// Euclidean distance between the ray origin and `point`.
    pub fn distance_to(&self, point: &WorldPoint) -> FloatType {
        (point - self.origin).norm()
    }
}
