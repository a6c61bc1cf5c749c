pub mod primitives;

use index_vec::IndexVec;
use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, WorldPoint, WorldVector};
use primitives::Primitive;

/// Renderable surface
pub trait Object {
    /// Nearest point where the ray hits the surface, strictly in front of its origin.
    fn intersect(&self, ray: &Ray) -> Option<WorldPoint>;

    /// Outward unit normal at a point previously returned by `intersect`.
    fn normal(&self, point: &WorldPoint) -> Unit<WorldVector>;

    /// Fraction of light kept after bouncing off the point, within [0, 1].
    fn reflection_coefficient(&self, point: &WorldPoint) -> FloatType;
}

index_vec::define_index_type! {
    /// Identifies a primitive within its scene, in insertion order.
    pub struct PrimitiveIdx = u32;
}

/// Result of a scene-wide intersection query.
#[derive(Copy, Clone, Debug)]
pub struct SceneHit<'a> {
    pub point: WorldPoint,
    pub normal: Unit<WorldVector>,
    pub index: PrimitiveIdx,
    pub primitive: &'a Primitive,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: IndexVec<PrimitiveIdx, Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) -> PrimitiveIdx {
        let primitive = primitive.into();
        log::debug!("Adding primitive {:?}", primitive);
        self.primitives.push(primitive)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn get(&self, index: PrimitiveIdx) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveIdx, &Primitive)> {
        self.primitives.iter_enumerated()
    }

    fn candidates(
        &self,
        excluded: Option<PrimitiveIdx>,
    ) -> impl Iterator<Item = (PrimitiveIdx, &Primitive)> {
        self.iter().filter(move |(index, _)| Some(*index) != excluded)
    }

    /// Finds the closest primitive hit by the ray, skipping `excluded`.
    ///
    /// Of primitives hit at exactly the same distance, the one added first wins.
    pub fn nearest_intersection(
        &self,
        ray: &Ray,
        excluded: Option<PrimitiveIdx>,
    ) -> Option<SceneHit<'_>> {
        let mut nearest: Option<(FloatType, PrimitiveIdx, &Primitive, WorldPoint)> = None;

        for (index, primitive) in self.candidates(excluded) {
            let Some(point) = primitive.intersect(ray) else {
                continue;
            };
            let distance = ray.distance_to(&point);
            if nearest.is_none_or(|(best, ..)| distance < best) {
                nearest = Some((distance, index, primitive, point));
            }
        }

        nearest.map(|(_, index, primitive, point)| SceneHit {
            point,
            normal: primitive.normal(&point),
            index,
            primitive,
        })
    }

    /// Checks whether anything other than `excluded` is hit closer than `max_distance`.
    pub fn is_occluded(
        &self,
        ray: &Ray,
        excluded: Option<PrimitiveIdx>,
        max_distance: FloatType,
    ) -> bool {
        self.candidates(excluded).any(|(_, primitive)| {
            primitive
                .intersect(ray)
                .is_some_and(|point| ray.distance_to(&point) < max_distance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::primitives::{Plane, Sphere};
    use assert2::assert;

    fn sphere(z: FloatType, radius: FloatType) -> Sphere {
        Sphere::builder()
            .center(WorldPoint::new(0.0, 0.0, z))
            .radius(radius)
            .build()
            .unwrap()
    }

    fn forward_ray() -> Ray {
        Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.nearest_intersection(&forward_ray(), None).is_none());
        assert!(!scene.is_occluded(&forward_ray(), None, 100.0));
    }

    #[test]
    fn nearest_of_several() {
        let mut scene = Scene::new();
        scene.add(sphere(10.0, 1.0));
        let near = scene.add(sphere(5.0, 1.0));
        scene.add(sphere(20.0, 1.0));

        let hit = scene
            .nearest_intersection(&forward_ray(), None)
            .expect("We should have a hit!");
        assert!(hit.index == near);
        assert!((hit.point - WorldPoint::new(0.0, 0.0, 4.0)).norm() < 1e-5);
        assert!((hit.normal.into_inner() - WorldVector::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn lookup_by_index() {
        let mut scene = Scene::new();
        scene.add(sphere(5.0, 1.0));
        let big = scene.add(sphere(10.0, 3.0));

        let primitive = scene.get(big).expect("Primitive should be there");
        assert!(let Primitive::Sphere(_) = primitive);
        let hit = primitive.intersect(&forward_ray()).expect("We should have a hit!");
        assert!((hit - WorldPoint::new(0.0, 0.0, 7.0)).norm() < 1e-5);
        assert!(scene.get(PrimitiveIdx::from_usize(2)).is_none());
    }

    #[test]
    fn equal_distance_prefers_first_added() {
        let mut scene = Scene::new();
        let first = scene.add(sphere(5.0, 1.0));
        let second = scene.add(sphere(5.0, 1.0));
        assert!(first != second);

        let hit = scene
            .nearest_intersection(&forward_ray(), None)
            .expect("We should have a hit!");
        assert!(hit.index == first);
    }

    #[test]
    fn excluded_primitive_is_skipped() {
        let mut scene = Scene::new();
        let near = scene.add(sphere(5.0, 1.0));
        let far = scene.add(sphere(10.0, 1.0));

        let hit = scene
            .nearest_intersection(&forward_ray(), Some(near))
            .expect("We should have a hit!");
        assert!(hit.index == far);

        let mut single = Scene::new();
        let only = single.add(sphere(5.0, 1.0));
        assert!(single.nearest_intersection(&forward_ray(), Some(only)).is_none());
    }

    #[test]
    fn occlusion_respects_max_distance() {
        let mut scene = Scene::new();
        scene.add(sphere(5.0, 1.0));

        assert!(scene.is_occluded(&forward_ray(), None, 10.0));
        // Hit at distance 4, not strictly closer than 4
        assert!(!scene.is_occluded(&forward_ray(), None, 4.0));
        assert!(!scene.is_occluded(&forward_ray(), None, 2.0));
    }

    #[test]
    fn occlusion_skips_excluded() {
        let mut scene = Scene::new();
        let floor = scene.add(
            Plane::builder()
                .point(WorldPoint::new(0.0, 0.0, 5.0))
                .normal(WorldVector::new(0.0, 0.0, -1.0))
                .build()
                .unwrap(),
        );

        assert!(scene.is_occluded(&forward_ray(), None, 100.0));
        assert!(!scene.is_occluded(&forward_ray(), Some(floor), 100.0));
    }
}
