use bon::bon;
use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{ConstructionError, coefficient, positive};

#[derive(Clone, Debug)]
pub struct Sphere {
    center: WorldPoint,
    radius: FloatType,
    reflection_coefficient: FloatType,
}

#[bon]
impl Sphere {
    #[builder]
    pub fn new(
        center: WorldPoint,
        radius: FloatType,
        #[builder(default = 0.5)] reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        Ok(Sphere {
            center,
            radius: positive("radius", radius)?,
            reflection_coefficient: coefficient("reflection_coefficient", reflection_coefficient)?,
        })
    }
}

impl Object for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        if a < EPSILON {
            return None;
        }
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        // With a > 0 the roots are ordered, a tangent ray gives two equal ones
        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        let t = [t1, t2].into_iter().find(|t| *t > 0.0)?;

        Some(ray.point_at(t))
    }

    fn normal(&self, point: &WorldPoint) -> Unit<WorldVector> {
        Unit::new_normalize(point - self.center)
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
