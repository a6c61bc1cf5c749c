mod chess_plane;
mod cone;
mod cylinder;
mod disk;
mod plane;
mod prism;
mod rectangle;
mod sphere;

use nalgebra::Unit;
use thiserror::Error;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector, try_normalize};

use super::Object;

pub use chess_plane::ChessPlane;
pub use cone::Cone;
pub use cylinder::Cylinder;
pub use plane::Plane;
pub use prism::RectangularPrism;
pub use rectangle::Rectangle;
pub use sphere::Sphere;

/// Maximum absolute dot product of two unit vectors that are still considered orthogonal.
const ORTHOGONALITY_TOLERANCE: FloatType = 1e-5;

/// How far from a face a point may be to still be classified as lying on it
/// when picking a normal. Absorbs rounding of the intersection points.
const SURFACE_TOLERANCE: FloatType = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConstructionError {
    #[error("`{name}` must not be a zero vector")]
    DegenerateVector { name: &'static str },
    #[error("`{first}` and `{second}` must be orthogonal")]
    NotOrthogonal {
        first: &'static str,
        second: &'static str,
    },
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: FloatType },
    #[error("Reflection coefficient `{name}` must be within [0, 1], got {value}")]
    CoefficientOutOfRange { name: &'static str, value: FloatType },
}

fn unit_vector(
    name: &'static str,
    v: &WorldVector,
) -> Result<Unit<WorldVector>, ConstructionError> {
    try_normalize(v).map_err(|_| ConstructionError::DegenerateVector { name })
}

fn positive(name: &'static str, value: FloatType) -> Result<FloatType, ConstructionError> {
    // Written this way to also reject NaN
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConstructionError::NotPositive { name, value })
    }
}

fn coefficient(name: &'static str, value: FloatType) -> Result<FloatType, ConstructionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConstructionError::CoefficientOutOfRange { name, value })
    }
}

fn orthogonal(
    first: &'static str,
    a: &Unit<WorldVector>,
    second: &'static str,
    b: &Unit<WorldVector>,
) -> Result<(), ConstructionError> {
    if a.dot(b.as_ref()).abs() > ORTHOGONALITY_TOLERANCE {
        Err(ConstructionError::NotOrthogonal { first, second })
    } else {
        Ok(())
    }
}

/// Distance along the ray to the plane given by a point and a normal.
/// Only positive distances count, rays parallel to the plane never hit.
fn ray_plane_distance(
    ray: &Ray,
    point: &WorldPoint,
    normal: &Unit<WorldVector>,
) -> Option<FloatType> {
    let denominator = normal.dot(&ray.direction);
    if denominator.abs() < EPSILON {
        return None;
    }

    let t = normal.dot(&(point - ray.origin)) / denominator;
    (t > 0.0).then_some(t)
}

/// Creates the `Primitive` enum with one variant per listed type, conversions into it
/// and `Object` implementation dispatching to the variants.
macro_rules! primitive_enum {
    ( $( $variant:ident ),* $(,)? ) => {
        /// Closed set of surfaces that can be placed in a scene.
        #[derive(Clone, Debug)]
        pub enum Primitive {
            $( $variant($variant), )*
        }

        $(
            impl From<$variant> for Primitive {
                fn from(value: $variant) -> Self {
                    Primitive::$variant(value)
                }
            }
        )*

        impl Object for Primitive {
            fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
                match self {
                    $( Primitive::$variant(p) => p.intersect(ray), )*
                }
            }

            fn normal(&self, point: &WorldPoint) -> Unit<WorldVector> {
                match self {
                    $( Primitive::$variant(p) => p.normal(point), )*
                }
            }

            fn reflection_coefficient(&self, point: &WorldPoint) -> FloatType {
                match self {
                    $( Primitive::$variant(p) => p.reflection_coefficient(point), )*
                }
            }
        }
    };
}

primitive_enum!(
    Plane,
    ChessPlane,
    Sphere,
    Rectangle,
    RectangularPrism,
    Cylinder,
    Cone,
);
