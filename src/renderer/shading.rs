use crate::{
    geometry::{FloatType, Ray, reflect, try_normalize},
    light::Light,
    scene::{Object as _, Scene},
};

/// Outcome of tracing a single camera ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Trace {
    pub intensity: FloatType,
    /// Number of surfaces hit.
    pub bounces: u32,
    /// Number of hits that were directly lit.
    pub contributions: u32,
}

/// Intensity of light reaching the ray origin, following at most `max_bounces` reflections.
pub fn trace(ray: &Ray, light: &Light, scene: &Scene, max_bounces: u32) -> FloatType {
    trace_detailed(ray, light, scene, max_bounces).intensity
}

/// Same as `trace`, also reporting how the chain of reflections went.
pub fn trace_detailed(ray: &Ray, light: &Light, scene: &Scene, max_bounces: u32) -> Trace {
    let mut result = Trace::default();
    let mut ray = *ray;
    let mut excluded = None;
    let mut cumulative_reflection: FloatType = 1.0;

    for _ in 0..max_bounces {
        let Some(hit) = scene.nearest_intersection(&ray, excluded) else {
            break;
        };
        result.bounces += 1;

        let to_light = light.position - hit.point;
        let Ok(light_direction) = try_normalize(&to_light) else {
            // Hit exactly at the light, nothing sensible to continue with
            break;
        };
        let cos_angle = hit.normal.dot(light_direction.as_ref());

        // Energy is lost on every bounce, lit or not
        cumulative_reflection *= hit.primitive.reflection_coefficient(&hit.point);

        if cos_angle > 0.0 {
            let shadow_ray = Ray::new(hit.point, light_direction.into_inner());
            if !scene.is_occluded(&shadow_ray, Some(hit.index), to_light.norm()) {
                result.intensity += cumulative_reflection * cos_angle * light.power;
                result.contributions += 1;
            }
        }

        let Ok(direction) = try_normalize(&reflect(&ray.direction, &hit.normal)) else {
            break;
        };
        ray = Ray::new(hit.point, direction.into_inner());
        excluded = Some(hit.index);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{WorldPoint, WorldVector};
    use crate::scene::primitives::{Plane, Sphere};
    use assert2::assert;
    use test_case::test_case;

    fn light_at(x: FloatType, y: FloatType, z: FloatType) -> Light {
        Light::builder().position(WorldPoint::new(x, y, z)).build()
    }

    fn plane(point: [FloatType; 3], normal: [FloatType; 3], coefficient: FloatType) -> Plane {
        Plane::builder()
            .point(point.into())
            .normal(normal.into())
            .reflection_coefficient(coefficient)
            .build()
            .unwrap()
    }

    /// Floor with a ray coming down onto the origin at 45 degrees, light right above.
    fn lit_floor() -> (Scene, Light, Ray) {
        let mut scene = Scene::new();
        scene.add(plane([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], 0.5));
        let ray = Ray::new(
            WorldPoint::new(0.0, -1.0, -1.0),
            WorldVector::new(0.0, 1.0, 1.0).normalize(),
        );
        (scene, light_at(0.0, -10.0, 0.0), ray)
    }

    #[test_case(0 ; "zero")]
    #[test_case(1 ; "one")]
    #[test_case(5 ; "five")]
    fn empty_scene_is_dark(max_bounces: u32) {
        let (_, light, ray) = lit_floor();
        let result = trace_detailed(&ray, &light, &Scene::new(), max_bounces);
        assert!(result == Trace::default());
    }

    #[test]
    fn zero_bounces_is_dark() {
        let (scene, light, ray) = lit_floor();
        assert!(trace(&ray, &light, &scene, 0) == 0.0);
    }

    #[test]
    fn direct_light() {
        let (scene, light, ray) = lit_floor();
        let result = trace_detailed(&ray, &light, &scene, 5);

        // Reflected ray leaves the floor and never comes back
        assert!(result.bounces == 1);
        assert!(result.contributions == 1);
        assert!((result.intensity - 0.5).abs() < 1e-5);
    }

    #[test]
    fn light_power_scales_intensity() {
        let (scene, mut light, ray) = lit_floor();
        light.power = 3.0;
        assert!((trace(&ray, &light, &scene, 5) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn occluder_casts_shadow() {
        let (mut scene, light, ray) = lit_floor();
        scene.add(
            Sphere::builder()
                .center(WorldPoint::new(0.0, -5.0, 0.0))
                .radius(1.0)
                .build()
                .unwrap(),
        );

        let shadow_ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, -1.0, 0.0));
        assert!(scene.is_occluded(&shadow_ray, None, 10.0));

        let result = trace_detailed(&ray, &light, &scene, 5);
        assert!(result.bounces == 1);
        assert!(result.contributions == 0);
        assert!(result.intensity == 0.0);
    }

    #[test]
    fn light_behind_surface_contributes_nothing() {
        let (scene, _, ray) = lit_floor();
        let light = light_at(0.0, 10.0, 0.0);
        assert!(trace(&ray, &light, &scene, 5) == 0.0);
    }

    /// Two parallel mirrors facing each other, the ray zig-zags between them,
    /// every hit is lit.
    #[test_case(1)]
    #[test_case(3)]
    #[test_case(5)]
    fn one_contribution_per_bounce(max_bounces: u32) {
        let mut scene = Scene::new();
        scene.add(plane([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], 1.0));
        scene.add(plane([0.0, -2.0, 0.0], [0.0, 1.0, 0.0], 1.0));
        let light = light_at(0.0, -1.0, 1000.0);
        let ray = Ray::new(
            WorldPoint::new(0.0, -1.0, 0.0),
            WorldVector::new(0.0, 1.0, 1.0).normalize(),
        );

        let result = trace_detailed(&ray, &light, &scene, max_bounces);
        assert!(result.bounces == max_bounces);
        assert!(result.contributions == max_bounces);
        assert!(result.intensity > 0.0);
    }

    #[test]
    fn more_bounces_add_light() {
        let mut scene = Scene::new();
        scene.add(plane([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], 1.0));
        scene.add(plane([0.0, -2.0, 0.0], [0.0, 1.0, 0.0], 1.0));
        let light = light_at(0.0, -1.0, 1000.0);
        let ray = Ray::new(
            WorldPoint::new(0.0, -1.0, 0.0),
            WorldVector::new(0.0, 1.0, 1.0).normalize(),
        );

        let one = trace(&ray, &light, &scene, 1);
        let three = trace(&ray, &light, &scene, 3);
        assert!(three > one);
    }

    /// The first bounce is in shadow, but its coefficient still dims the second one.
    #[test]
    fn shadowed_bounce_still_attenuates() {
        let (mut scene, light, ray) = lit_floor();
        scene.add(
            Sphere::builder()
                .center(WorldPoint::new(0.0, -5.0, 0.0))
                .radius(1.0)
                .build()
                .unwrap(),
        );
        scene.add(plane([0.0, 0.0, 3.0], [0.0, 0.0, -1.0], 0.4));

        let result = trace_detailed(&ray, &light, &scene, 2);
        assert!(result.bounces == 2);
        assert!(result.contributions == 1);

        // Second hit is at (0, -3, 3), light direction is (0, -7, -3) from there
        let cos_angle = 3.0 / (58.0 as FloatType).sqrt();
        assert!((result.intensity - 0.5 * 0.4 * cos_angle).abs() < 1e-5);
    }
}
