use bon::bon;
use nalgebra::Unit;
use ordered_float::OrderedFloat;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{ConstructionError, SURFACE_TOLERANCE, coefficient, disk::Disk, positive, unit_vector};

/// Closed cylinder: side surface between the base and top caps.
#[derive(Clone, Debug)]
pub struct Cylinder {
    base_center: WorldPoint,
    axis: Unit<WorldVector>,
    radius: FloatType,
    height: FloatType,
    reflection_coefficient: FloatType,

    bottom: Disk,
    top: Disk,
}

#[bon]
impl Cylinder {
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

        Ok(Cylinder {
            base_center,
            axis,
            radius,
            height,
            reflection_coefficient: coefficient("reflection_coefficient", reflection_coefficient)?,
            bottom: Disk {
                center: base_center,
                normal: axis,
                radius,
            },
            top: Disk {
                center: base_center + axis.as_ref() * height,
                normal: axis,
                radius,
            },
        })
    }
}

impl Cylinder {
    /// Distance to the side surface, clipped to the cylinder height.
    fn intersect_side(&self, ray: &Ray) -> Option<FloatType> {
        let oc = ray.origin - self.base_center;
        // Components perpendicular to the axis
        let d = ray.direction - self.axis.as_ref() * ray.direction.dot(self.axis.as_ref());
        let o = oc - self.axis.as_ref() * oc.dot(self.axis.as_ref());

        let a = d.dot(&d);
        if a < EPSILON {
            // Parallel to the axis
            return None;
        }
        let b = 2.0 * d.dot(&o);
        let c = o.dot(&o) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let t = if t0 > 0.0 { t0 } else { t1 };
        if t <= 0.0 {
            return None;
        }

        let projection = (ray.point_at(t) - self.base_center).dot(self.axis.as_ref());
        (0.0..=self.height).contains(&projection).then_some(t)
    }
}

impl Object for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        [
            self.intersect_side(ray),
            self.bottom.intersect_distance(ray),
            self.top.intersect_distance(ray),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|t| OrderedFloat(*t))
        .map(|t| ray.point_at(t))
    }

    fn normal(&self, point: &WorldPoint) -> Unit<WorldVector> {
        let projection = (point - self.base_center).dot(self.axis.as_ref());
        if projection.abs() < SURFACE_TOLERANCE {
            return -self.axis;
        }
        if (projection - self.height).abs() < SURFACE_TOLERANCE {
            return self.axis;
        }

        let axis_point = self.base_center + self.axis.as_ref() * projection;
        Unit::try_new(point - axis_point, EPSILON).unwrap_or(self.axis)
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
