use bon::bon;
use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{
    ConstructionError, coefficient, orthogonal, positive, ray_plane_distance, unit_vector,
};

/// Flat rectangle, centered on `center`.
/// Width is measured along `width_direction`, height along `normal × width_direction`.
#[derive(Clone, Debug)]
pub struct Rectangle {
    center: WorldPoint,
    normal: Unit<WorldVector>,
    width_direction: Unit<WorldVector>,
    height_direction: Unit<WorldVector>,
    width: FloatType,
    height: FloatType,
    reflection_coefficient: FloatType,
}

#[bon]
impl Rectangle {
    #[builder]
    pub fn new(
        center: WorldPoint,
        normal: WorldVector,
        width_direction: WorldVector,
        width: FloatType,
        height: FloatType,
        #[builder(default = 0.5)] reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        let normal = unit_vector("normal", &normal)?;
        let width_direction = unit_vector("width_direction", &width_direction)?;
        orthogonal("normal", &normal, "width_direction", &width_direction)?;

        Ok(Rectangle::from_validated(
            center,
            normal,
            width_direction,
            positive("width", width)?,
            positive("height", height)?,
            coefficient("reflection_coefficient", reflection_coefficient)?,
        ))
    }
}

impl Rectangle {
    /// Constructs a rectangle from parameters that were already checked by the caller.
    pub(super) fn from_validated(
        center: WorldPoint,
        normal: Unit<WorldVector>,
        width_direction: Unit<WorldVector>,
        width: FloatType,
        height: FloatType,
        reflection_coefficient: FloatType,
    ) -> Self {
        let height_direction = Unit::new_normalize(normal.cross(width_direction.as_ref()));
        Rectangle {
            center,
            normal,
            width_direction,
            height_direction,
            width,
            height,
            reflection_coefficient,
        }
    }

    /// Distance along the ray to the rectangle, used by composite primitives.
    pub(super) fn intersect_distance(&self, ray: &Ray) -> Option<FloatType> {
        let t = ray_plane_distance(ray, &self.center, &self.normal)?;
        let local = ray.point_at(t) - self.center;

        let inside = self.width_direction.dot(&local).abs() <= self.width / 2.0
            && self.height_direction.dot(&local).abs() <= self.height / 2.0;
        inside.then_some(t)
    }
}

impl Object for Rectangle {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        self.intersect_distance(ray).map(|t| ray.point_at(t))
    }

    fn normal(&self, _point: &WorldPoint) -> Unit<WorldVector> {
        self.normal
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
