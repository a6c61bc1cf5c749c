use bon::bon;
use nalgebra::Unit;
use thiserror::Error;

use crate::geometry::{
    DegenerateVectorError, FloatType, Ray, Rotation, ScreenPoint, ScreenSize, WorldPoint,
    WorldVector, try_normalize,
};

#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum CameraError {
    #[error(transparent)]
    DegenerateVector(#[from] DegenerateVectorError),
    #[error("Resolution must be non-zero in both directions, got {0}x{1}")]
    EmptyResolution(u32, u32),
    #[error("Field of view must be within (0, 180) degrees, got {0}")]
    FovOutOfRange(FloatType),
    #[error("Pixel aspect must be positive, got {0}")]
    InvalidPixelAspect(FloatType),
}

/// Pinhole camera looking through a virtual screen in front of it.
///
/// Screen rows go from the top (row 0) to the bottom, columns from left to right.
/// The world is X left, Y down, Z forward.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    position: WorldPoint,
    direction: Unit<WorldVector>,
    right: Unit<WorldVector>,
    up: Unit<WorldVector>,

    fov: FloatType,
    /// Distance from the camera to the virtual screen
    screen_distance: FloatType,

    resolution: ScreenSize,
    /// Width to height ratio of a single pixel
    pixel_aspect: FloatType,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        #[builder(default = WorldPoint::new(0.0, 0.0, -1.0))] position: WorldPoint,
        #[builder(default = WorldVector::new(0.0, 0.0, 1.0))] direction: WorldVector,
        /// Horizontal field of view in degrees
        #[builder(default = 90.0)]
        fov: FloatType,
        resolution: ScreenSize,
        #[builder(default = 1.0)] pixel_aspect: FloatType,
    ) -> Result<Self, CameraError> {
        if resolution.x == 0 || resolution.y == 0 {
            return Err(CameraError::EmptyResolution(resolution.x, resolution.y));
        }
        if !(pixel_aspect > 0.0) {
            return Err(CameraError::InvalidPixelAspect(pixel_aspect));
        }

        let direction = try_normalize(&direction)?;
        let (right, up) = screen_axes(&direction);
        Ok(Camera {
            position,
            direction,
            right,
            up,
            fov,
            screen_distance: screen_distance(fov)?,
            resolution,
            pixel_aspect,
        })
    }
}

fn screen_distance(fov: FloatType) -> Result<FloatType, CameraError> {
    if fov > 0.0 && fov < 180.0 {
        Ok(1.0 / (fov.to_radians() / 2.0).tan())
    } else {
        Err(CameraError::FovOutOfRange(fov))
    }
}

/// Right and up vectors of the screen for a given viewing direction.
fn screen_axes(direction: &Unit<WorldVector>) -> (Unit<WorldVector>, Unit<WorldVector>) {
    // Looking straight up or down leaves the horizon undefined, any horizontal
    // right vector works then
    let right = try_normalize(&direction.cross(&WorldVector::y()))
        .unwrap_or_else(|_| -WorldVector::x_axis());
    let up = Unit::new_normalize(right.cross(direction.as_ref()));
    (right, up)
}

impl Camera {
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn direction(&self) -> Unit<WorldVector> {
        self.direction
    }

    pub fn fov(&self) -> FloatType {
        self.fov
    }

    pub fn resolution(&self) -> ScreenSize {
        self.resolution
    }

    /// Ray from the camera through the given screen pixel. The direction is normalized.
    pub fn ray_to_pixel(&self, pixel: &ScreenPoint) -> Ray {
        let aspect = self.resolution.x as FloatType / self.resolution.y as FloatType;
        let y = pixel.y as FloatType / self.resolution.y as FloatType * 2.0 - 1.0;
        let x = (pixel.x as FloatType / self.resolution.x as FloatType * 2.0 - 1.0)
            * aspect
            * self.pixel_aspect;

        let to_pixel = self.direction.as_ref() * self.screen_distance
            + self.right.as_ref() * x
            + self.up.as_ref() * y;

        // The screen center is in front of the camera at a positive distance, the sum
        // can't be zero
        Ray::new(self.position, to_pixel.normalize())
    }

    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    pub fn set_direction(&mut self, direction: &WorldVector) -> Result<(), CameraError> {
        self.look_along(try_normalize(direction)?);
        Ok(())
    }

    pub fn set_fov(&mut self, fov: FloatType) -> Result<(), CameraError> {
        self.screen_distance = screen_distance(fov)?;
        self.fov = fov;
        Ok(())
    }

    pub fn move_by(&mut self, displacement: &WorldVector) {
        self.position += *displacement;
    }

    /// Turns the viewing direction in place.
    pub fn rotate(&mut self, angles: &WorldVector) -> Result<(), CameraError> {
        let rotated = &Rotation::from_angles(angles) * self.direction.as_ref();
        self.look_along(try_normalize(&rotated)?);
        Ok(())
    }

    /// Orbits the camera around the world origin, keeping the distance and facing the origin.
    pub fn rotate_around_origin(&mut self, angles: &WorldVector) -> Result<(), CameraError> {
        self.rotate_around_point(&WorldPoint::origin(), angles)
    }

    /// Orbits the camera around `point`, keeping the distance and facing the point.
    pub fn rotate_around_point(
        &mut self,
        point: &WorldPoint,
        angles: &WorldVector,
    ) -> Result<(), CameraError> {
        let offset = Rotation::from_angles(angles).rotate_keeping_length(&(self.position - point))?;
        let direction = try_normalize(&-offset)?;

        self.position = point + offset;
        self.look_along(direction);
        Ok(())
    }

    fn look_along(&mut self, direction: Unit<WorldVector>) {
        let (right, up) = screen_axes(&direction);
        self.direction = direction;
        self.right = right;
        self.up = up;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use assert2::assert;
    use test_case::test_case;

    fn assert_close(a: WorldVector, b: WorldVector) {
        assert!((a - b).norm() < 1e-5, "{a:?} != {b:?}");
    }

    fn camera() -> Camera {
        Camera::builder()
            .resolution(ScreenSize::new(4, 2))
            .build()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let camera = camera();
        assert!(camera.position() == WorldPoint::new(0.0, 0.0, -1.0));
        assert_close(camera.direction().into_inner(), WorldVector::new(0.0, 0.0, 1.0));
        assert!(camera.fov() == 90.0);
    }

    #[test]
    fn center_pixel_looks_forward() {
        let ray = camera().ray_to_pixel(&ScreenPoint::new(2, 1));
        assert!(ray.origin == WorldPoint::new(0.0, 0.0, -1.0));
        assert_close(ray.direction, WorldVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn left_right_up_down() {
        // X goes left, Y goes down, Z goes away
        let camera = Camera::builder()
            .position(WorldPoint::origin())
            .resolution(ScreenSize::new(80, 60))
            .pixel_aspect(0.5)
            .build()
            .unwrap();

        let center = camera.ray_to_pixel(&ScreenPoint::new(40, 30));
        let left = camera.ray_to_pixel(&ScreenPoint::new(0, 30));
        let right = camera.ray_to_pixel(&ScreenPoint::new(79, 30));
        let up = camera.ray_to_pixel(&ScreenPoint::new(40, 0));
        let down = camera.ray_to_pixel(&ScreenPoint::new(40, 59));

        assert!(center.direction.x.abs() < 1e-6);
        assert!(center.direction.y.abs() < 1e-6);
        assert!(left.direction.x > center.direction.x);
        assert!(right.direction.x < center.direction.x);
        assert!(up.direction.y < center.direction.y);
        assert!(down.direction.y > center.direction.y);
        assert!((left.direction.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn top_left_corner_with_narrow_pixels() {
        // aspect 2, pixel aspect 0.5, fov 90: corner of the screen is one unit off
        // in both directions
        let camera = Camera::builder()
            .resolution(ScreenSize::new(4, 2))
            .pixel_aspect(0.5)
            .build()
            .unwrap();
        let ray = camera.ray_to_pixel(&ScreenPoint::new(0, 0));
        assert_close(ray.direction, WorldVector::new(1.0, -1.0, 1.0).normalize());
    }

    #[test]
    fn looking_straight_down_still_works() {
        let camera = Camera::builder()
            .direction(WorldVector::new(0.0, 1.0, 0.0))
            .resolution(ScreenSize::new(4, 2))
            .build()
            .unwrap();
        let ray = camera.ray_to_pixel(&ScreenPoint::new(0, 0));
        assert!(ray.direction.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn orbit_keeps_distance_and_faces_center() {
        let mut camera = Camera::builder()
            .position(WorldPoint::new(0.0, -1.2, -1.2))
            .resolution(ScreenSize::new(4, 2))
            .build()
            .unwrap();
        let distance = camera.position().coords.norm();

        for _ in 0..10 {
            camera
                .rotate_around_origin(&WorldVector::new(0.023, 0.025, 0.025))
                .unwrap();
        }

        assert!((camera.position().coords.norm() - distance).abs() < 1e-4);
        assert_close(
            camera.direction().into_inner(),
            -camera.position().coords.normalize(),
        );
    }

    #[test]
    fn orbit_around_point() {
        let focus = WorldPoint::new(0.0, -0.5, 0.0);
        let mut camera = Camera::builder()
            .position(WorldPoint::new(0.0, -0.5, -2.0))
            .resolution(ScreenSize::new(4, 2))
            .build()
            .unwrap();

        camera
            .rotate_around_point(&focus, &WorldVector::new(0.0, FRAC_PI_2, 0.0))
            .unwrap();

        assert_close(camera.position().coords, WorldVector::new(-2.0, -0.5, 0.0));
        assert_close(camera.direction().into_inner(), WorldVector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn moving_keeps_direction() {
        let mut camera = camera();
        camera.move_by(&WorldVector::new(1.0, -2.0, 0.5));
        assert!(camera.position() == WorldPoint::new(1.0, -2.0, -0.5));
        assert_close(camera.direction().into_inner(), WorldVector::new(0.0, 0.0, 1.0));

        camera.set_position(WorldPoint::new(3.0, 0.0, 0.0));
        let ray = camera.ray_to_pixel(&ScreenPoint::new(2, 1));
        assert!(ray.origin == WorldPoint::new(3.0, 0.0, 0.0));
        assert_close(ray.direction, WorldVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_in_place() {
        let mut camera = camera();
        camera.rotate(&WorldVector::new(0.0, FRAC_PI_2, 0.0)).unwrap();
        assert!(camera.position() == WorldPoint::new(0.0, 0.0, -1.0));
        assert_close(camera.direction().into_inner(), WorldVector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn orbit_around_own_position_fails() {
        let mut camera = camera();
        let position = camera.position();
        let result = camera.rotate_around_point(&position, &WorldVector::new(0.1, 0.0, 0.0));
        assert!(let Err(CameraError::DegenerateVector(_)) = result);
        assert!(camera.position() == position);
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(180.0 ; "straight")]
    #[test_case(-10.0 ; "negative")]
    fn invalid_fov(fov: FloatType) {
        let result = Camera::builder()
            .fov(fov)
            .resolution(ScreenSize::new(4, 2))
            .build();
        assert!(let Err(CameraError::FovOutOfRange(_)) = result);
    }

    #[test]
    fn set_fov_changes_zoom() {
        let mut camera = camera();
        let before = camera.ray_to_pixel(&ScreenPoint::new(0, 0));
        camera.set_fov(45.0).unwrap();
        let after = camera.ray_to_pixel(&ScreenPoint::new(0, 0));
        assert!(after.direction.z > before.direction.z);
        assert!(camera.set_fov(200.0).is_err());
        assert!(camera.fov() == 45.0);
    }

    #[test]
    fn empty_resolution_is_rejected() {
        let result = Camera::builder().resolution(ScreenSize::new(0, 10)).build();
        assert!(let Err(CameraError::EmptyResolution(0, 10)) = result);
    }
}
