use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};

use super::ray_plane_distance;

/// Circular cap of cylinders and cones. Not a standalone primitive.
#[derive(Clone, Debug)]
pub(super) struct Disk {
    pub center: WorldPoint,
    pub normal: Unit<WorldVector>,
    pub radius: FloatType,
}

impl Disk {
    /// Distance along the ray to the disk, if it is hit.
    pub fn intersect_distance(&self, ray: &Ray) -> Option<FloatType> {
        let t = ray_plane_distance(ray, &self.center, &self.normal)?;
        ((ray.point_at(t) - self.center).norm() <= self.radius).then_some(t)
    }
}
