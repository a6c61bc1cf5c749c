use bon::bon;
use nalgebra::Unit;
use ordered_float::OrderedFloat;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{ConstructionError, SURFACE_TOLERANCE, coefficient, disk::Disk, positive, unit_vector};

/// Finite cone with a circular base centered on `base_center` and the apex
/// `height` units along `axis`.
#[derive(Clone, Debug)]
pub struct Cone {
    base_center: WorldPoint,
    axis: Unit<WorldVector>,
    radius: FloatType,
    height: FloatType,
    reflection_coefficient: FloatType,

    apex: WorldPoint,
    /// Squared cosine of the half-angle at the apex
    cos2: FloatType,
    base: Disk,
}

#[bon]
impl Cone {
    #[builder]
    pub fn new(
        base_center: WorldPoint,
        axis: WorldVector,
        radius: FloatType,
        height: FloatType,
        #[builder(default = 0.5)] reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        let axis = unit_vector("axis", &axis)?;
        let radius = positive("radius", radius)?;
        let height = positive("height", height)?;

        Ok(Cone {
            base_center,
            axis,
            radius,
            height,
            reflection_coefficient: coefficient("reflection_coefficient", reflection_coefficient)?,
            apex: base_center + axis.as_ref() * height,
            cos2: height * height / (height * height + radius * radius),
            base: Disk {
                center: base_center,
                normal: axis,
                radius,
            },
        })
    }
}

impl Cone {
    /// Distance to the lateral surface between the apex and the base plane.
    ///
    /// The quadratic describes a double cone. The nearest root in front of the
    /// ray is taken and dropped when it lands outside the slant.
    fn intersect_side(&self, ray: &Ray) -> Option<FloatType> {
        let axis = self.axis.as_ref();
        let v = ray.origin - self.apex;
        let da = ray.direction.dot(axis);
        let va = v.dot(axis);

        let a = da * da - self.cos2 * ray.direction.dot(&ray.direction);
        let b = 2.0 * (da * va - self.cos2 * ray.direction.dot(&v));
        let c = va * va - self.cos2 * v.dot(&v);

        let t = if a.abs() < EPSILON {
            // Ray parallel to the slant, only one crossing
            if b.abs() < EPSILON {
                return None;
            }
            -c / b
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return None;
            }
            let sqrt_disc = discriminant.sqrt();
            let t1 = (-b - sqrt_disc) / (2.0 * a);
            let t2 = (-b + sqrt_disc) / (2.0 * a);
            let (near, far) = (t1.min(t2), t1.max(t2));
            if near > EPSILON { near } else { far }
        };
        if t <= EPSILON {
            return None;
        }

        let point = ray.point_at(t);
        let within_slant = (point - self.base_center).dot(axis) >= 0.0
            && (point - self.apex).dot(axis) <= 0.0;
        within_slant.then_some(t)
    }
}

impl Object for Cone {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        [self.intersect_side(ray), self.base.intersect_distance(ray)]
            .into_iter()
            .flatten()
            .min_by_key(|t| OrderedFloat(*t))
            .map(|t| ray.point_at(t))
    }

    fn normal(&self, point: &WorldPoint) -> Unit<WorldVector> {
        if (point - self.base_center).dot(self.axis.as_ref()).abs() < SURFACE_TOLERANCE {
            return -self.axis;
        }

        let v = point - self.apex;
        let projection = self.axis.as_ref() * v.dot(self.axis.as_ref());
        let radial = v - projection;
        Unit::try_new(radial - projection * (self.radius / self.height), EPSILON)
            .unwrap_or(self.axis)
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
