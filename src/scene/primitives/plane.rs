use bon::bon;
use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{ConstructionError, coefficient, ray_plane_distance, unit_vector};

/// Infinite plane with a constant reflection coefficient.
#[derive(Clone, Debug)]
pub struct Plane {
    point: WorldPoint,
    normal: Unit<WorldVector>,
    reflection_coefficient: FloatType,
}

#[bon]
impl Plane {
    #[builder]
    pub fn new(
        point: WorldPoint,
        #[builder(default = WorldVector::new(0.0, -1.0, 0.0))] normal: WorldVector,
        #[builder(default = 0.5)] reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        Ok(Plane {
            point,
            normal: unit_vector("normal", &normal)?,
            reflection_coefficient: coefficient("reflection_coefficient", reflection_coefficient)?,
        })
    }
}

impl Object for Plane {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        ray_plane_distance(ray, &self.point, &self.normal).map(|t| ray.point_at(t))
    }

    fn normal(&self, _point: &WorldPoint) -> Unit<WorldVector> {
        self.normal
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
