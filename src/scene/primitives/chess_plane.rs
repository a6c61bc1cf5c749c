use bon::bon;
use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{ConstructionError, coefficient, positive, ray_plane_distance, unit_vector};

/// Plane with a checkerboard pattern of two reflection coefficients.
/// Tiles are squares aligned with the world X and Z axes.
#[derive(Clone, Debug)]
pub struct ChessPlane {
    point: WorldPoint,
    normal: Unit<WorldVector>,
    square_size: FloatType,
    coefficient_black: FloatType,
    coefficient_white: FloatType,
}

#[bon]
impl ChessPlane {
    #[builder]
    pub fn new(
        point: WorldPoint,
        #[builder(default = WorldVector::new(0.0, -1.0, 0.0))] normal: WorldVector,
        #[builder(default = 0.5)] square_size: FloatType,
        #[builder(default = 0.1)] coefficient_black: FloatType,
        #[builder(default = 0.3)] coefficient_white: FloatType,
    ) -> Result<Self, ConstructionError> {
        Ok(ChessPlane {
            point,
            normal: unit_vector("normal", &normal)?,
            square_size: positive("square_size", square_size)?,
            coefficient_black: coefficient("coefficient_black", coefficient_black)?,
            coefficient_white: coefficient("coefficient_white", coefficient_white)?,
        })
    }
}

impl Object for ChessPlane {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        ray_plane_distance(ray, &self.point, &self.normal).map(|t| ray.point_at(t))
    }

    fn normal(&self, _point: &WorldPoint) -> Unit<WorldVector> {
        self.normal
    }

    fn reflection_coefficient(&self, point: &WorldPoint) -> FloatType {
        let x_index = (point.x / self.square_size).floor() as i64;
        let z_index = (point.z / self.square_size).floor() as i64;

        if (x_index + z_index).rem_euclid(2) == 0 {
            self.coefficient_black
        } else {
            self.coefficient_white
        }
    }
}
