use bon::bon;
use nalgebra::Unit;
use ordered_float::OrderedFloat;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use crate::scene::Object;

use super::{
    ConstructionError, Rectangle, SURFACE_TOLERANCE, coefficient, orthogonal, positive,
    unit_vector,
};

/// Box standing on `base_center`, extending `height` along `height_direction`,
/// `width` along `width_direction` and `length` along their cross product.
///
/// Intersections are tested against six rectangular faces, normals are picked by
/// checking which pair of bounding planes the point lies on, height first,
/// then width, then length.
#[derive(Clone, Debug)]
pub struct RectangularPrism {
    base_center: WorldPoint,
    height_direction: Unit<WorldVector>,
    width_direction: Unit<WorldVector>,
    length_direction: Unit<WorldVector>,
    height: FloatType,
    width: FloatType,
    length: FloatType,
    reflection_coefficient: FloatType,

    faces: [Rectangle; 6],
}

#[bon]
impl RectangularPrism {
    #[builder]
    pub fn new(
        base_center: WorldPoint,
        height_direction: WorldVector,
        width_direction: WorldVector,
        height: FloatType,
        width: FloatType,
        length: FloatType,
        #[builder(default = 0.5)] reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        let h = unit_vector("height_direction", &height_direction)?;
        let w = unit_vector("width_direction", &width_direction)?;
        orthogonal("height_direction", &h, "width_direction", &w)?;
        let l = Unit::new_normalize(h.cross(w.as_ref()));

        let height = positive("height", height)?;
        let width = positive("width", width)?;
        let length = positive("length", length)?;
        let reflection_coefficient =
            coefficient("reflection_coefficient", reflection_coefficient)?;

        let mid_height = base_center + h.as_ref() * (height / 2.0);
        let face = |center: WorldPoint,
                    normal: Unit<WorldVector>,
                    width_direction: Unit<WorldVector>,
                    width: FloatType,
                    height: FloatType| {
            Rectangle::from_validated(
                center,
                normal,
                width_direction,
                width,
                height,
                reflection_coefficient,
            )
        };

        let faces = [
            face(base_center, -h, w, width, length),
            face(base_center + h.as_ref() * height, h, w, width, length),
            face(mid_height - l.as_ref() * (length / 2.0), -l, w, width, height),
            face(mid_height + l.as_ref() * (length / 2.0), l, w, width, height),
            face(mid_height - w.as_ref() * (width / 2.0), -w, l, length, height),
            face(mid_height + w.as_ref() * (width / 2.0), w, l, length, height),
        ];

        Ok(RectangularPrism {
            base_center,
            height_direction: h,
            width_direction: w,
            length_direction: l,
            height,
            width,
            length,
            reflection_coefficient,
            faces,
        })
    }
}

impl RectangularPrism {
    /// Prism with all three sides equal.
    pub fn cube(
        base_center: WorldPoint,
        height_direction: WorldVector,
        width_direction: WorldVector,
        side: FloatType,
        reflection_coefficient: FloatType,
    ) -> Result<Self, ConstructionError> {
        RectangularPrism::builder()
            .base_center(base_center)
            .height_direction(height_direction)
            .width_direction(width_direction)
            .height(side)
            .width(side)
            .length(side)
            .reflection_coefficient(reflection_coefficient)
            .build()
    }
}

impl Object for RectangularPrism {
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint> {
        self.faces
            .iter()
            .filter_map(|face| face.intersect_distance(ray))
            .min_by_key(|t| OrderedFloat(*t))
            .map(|t| ray.point_at(t))
    }

    fn normal(&self, point: &WorldPoint) -> Unit<WorldVector> {
        let min = self.base_center
            - self.width_direction.as_ref() * (self.width / 2.0)
            - self.length_direction.as_ref() * (self.length / 2.0);
        let max = self.base_center
            + self.width_direction.as_ref() * (self.width / 2.0)
            + self.length_direction.as_ref() * (self.length / 2.0)
            + self.height_direction.as_ref() * self.height;

        for axis in [
            self.height_direction,
            self.width_direction,
            self.length_direction,
        ] {
            let projection = point.coords.dot(axis.as_ref());
            if (projection - min.coords.dot(axis.as_ref())).abs() < SURFACE_TOLERANCE {
                return -axis;
            }
            if (projection - max.coords.dot(axis.as_ref())).abs() < SURFACE_TOLERANCE {
                return axis;
            }
        }

        self.length_direction
    }

    fn reflection_coefficient(&self, _point: &WorldPoint) -> FloatType {
        self.reflection_coefficient
    }
}
