//! Ready made scenes with a light and a camera moving around them.

use crate::{
    camera::{Camera, CameraError},
    geometry::{FloatType, ScreenSize, WorldPoint, WorldVector},
    light::Light,
    scene::{
        Scene,
        primitives::{
            ChessPlane, Cone, ConstructionError, Cylinder, RectangularPrism, Sphere,
        },
    },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Sphere, cone, box and a tilted cylinder on a checkerboard.
    Gallery,
    /// Two touching mirror spheres on a checkerboard, viewed from up close.
    TwoSpheres,
    /// Sphere, standing cone, cube and a cylinder, lit from straight above.
    Pillars,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Gallery, Preset::TwoSpheres, Preset::Pillars];

    pub fn build(self) -> Result<Demo, ConstructionError> {
        let mut scene = Scene::new();
        scene.add(ChessPlane::builder().point(WorldPoint::origin()).build()?);

        let demo = match self {
            Preset::Gallery => {
                scene.add(sphere(WorldPoint::new(-1.0, -0.5, 0.0))?);
                scene.add(
                    Cone::builder()
                        .base_center(WorldPoint::new(0.0, -0.75, -1.0))
                        .axis(WorldVector::new(0.0, 1.0, 0.0))
                        .radius(0.3)
                        .height(0.75)
                        .reflection_coefficient(1.0)
                        .build()?,
                );
                scene.add(
                    RectangularPrism::builder()
                        .base_center(WorldPoint::new(1.0, 0.0, 0.0))
                        .height_direction(WorldVector::new(0.0, -1.0, 0.0))
                        .width_direction(WorldVector::new(0.0, 0.0, 1.0))
                        .height(1.0)
                        .width(1.0)
                        .length(0.5)
                        .reflection_coefficient(1.0)
                        .build()?,
                );
                scene.add(
                    Cylinder::builder()
                        .base_center(WorldPoint::new(0.1768, -0.5, 0.8232))
                        .axis(WorldVector::new(-1.0, 0.0, 1.0))
                        .radius(0.35)
                        .height(0.5)
                        .reflection_coefficient(1.0)
                        .build()?,
                );

                Demo {
                    scene,
                    light: Light::builder()
                        .position(WorldPoint::new(0.0, -10.0, -10.0))
                        .build(),
                    camera_position: WorldPoint::new(0.0, -1.2, -1.2),
                    motion: Motion::Orbit {
                        center: WorldPoint::origin(),
                        angular_velocity: WorldVector::new(0.023, 0.025, 0.025),
                    },
                }
            }
            Preset::TwoSpheres => {
                scene.add(sphere(WorldPoint::new(-0.5, -0.5, 0.0))?);
                scene.add(sphere(WorldPoint::new(0.5, -0.5, 0.0))?);

                Demo {
                    scene,
                    light: Light::default(),
                    camera_position: WorldPoint::new(0.0, -0.1, -0.6),
                    motion: Motion::Swing {
                        focus: WorldPoint::new(0.0, -0.5, 0.0),
                        angular_velocity: WorldVector::new(0.0, 0.025, 0.0),
                        reverse_within: 0.5,
                    },
                }
            }
            Preset::Pillars => {
                scene.add(sphere(WorldPoint::new(-1.0, -0.5, 0.0))?);
                scene.add(
                    Cone::builder()
                        .base_center(WorldPoint::new(0.0, 0.0, -1.0))
                        .axis(WorldVector::new(0.0, -1.0, 0.0))
                        .radius(0.4)
                        .height(1.0)
                        .reflection_coefficient(1.0)
                        .build()?,
                );
                scene.add(RectangularPrism::cube(
                    WorldPoint::new(1.0, 0.0, 0.0),
                    WorldVector::new(0.0, -1.0, 0.0),
                    WorldVector::new(0.0, 0.0, 1.0),
                    0.75,
                    1.0,
                )?);
                scene.add(
                    Cylinder::builder()
                        .base_center(WorldPoint::new(0.0, 0.0, 1.0))
                        .axis(WorldVector::new(0.0, -1.0, 0.0))
                        .radius(0.2)
                        .height(0.9)
                        .reflection_coefficient(1.0)
                        .build()?,
                );

                Demo {
                    scene,
                    light: Light::builder()
                        .position(WorldPoint::new(0.0, -1.0, 0.0))
                        .build(),
                    camera_position: WorldPoint::new(0.0, -1.2, -1.2),
                    motion: Motion::Orbit {
                        center: WorldPoint::origin(),
                        angular_velocity: WorldVector::new(0.0, 0.025, 0.0),
                    },
                }
            }
        };

        log::debug!(
            "Built {:?} demo with {} primitives",
            self,
            demo.scene.len()
        );
        Ok(demo)
    }
}

/// Unit mirror sphere resting on the floor.
fn sphere(center: WorldPoint) -> Result<Sphere, ConstructionError> {
    Sphere::builder()
        .center(center)
        .radius(0.5)
        .reflection_coefficient(1.0)
        .build()
}

/// How the camera moves between frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Motion {
    /// Keeps rotating around `center` by the same angles every frame.
    Orbit {
        center: WorldPoint,
        angular_velocity: WorldVector,
    },
    /// Rotates around `focus`, turning back whenever the camera gets closer than
    /// `reverse_within` to the focus along the Z axis.
    Swing {
        focus: WorldPoint,
        angular_velocity: WorldVector,
        reverse_within: FloatType,
    },
}

impl Motion {
    /// Point the camera is looking at.
    pub fn target(&self) -> WorldPoint {
        match self {
            Motion::Orbit { center, .. } => *center,
            Motion::Swing { focus, .. } => *focus,
        }
    }

    /// Moves the camera to the position for the next frame.
    pub fn advance(&mut self, camera: &mut Camera) -> Result<(), CameraError> {
        match self {
            Motion::Orbit {
                center,
                angular_velocity,
            } => camera.rotate_around_point(center, angular_velocity),
            Motion::Swing {
                focus,
                angular_velocity,
                reverse_within,
            } => {
                camera.rotate_around_point(focus, angular_velocity)?;
                if (camera.position() - *focus).z.abs() < *reverse_within {
                    *angular_velocity = -*angular_velocity;
                }
                Ok(())
            }
        }
    }
}

/// Scene together with everything needed to animate it.
#[derive(Clone, Debug)]
pub struct Demo {
    pub scene: Scene,
    pub light: Light,
    pub camera_position: WorldPoint,
    pub motion: Motion,
}

impl Demo {
    /// Camera at the demo's starting position, aimed at the motion target.
    pub fn camera(
        &self,
        resolution: ScreenSize,
        pixel_aspect: FloatType,
        fov: FloatType,
    ) -> Result<Camera, CameraError> {
        Camera::builder()
            .position(self.camera_position)
            .direction(self.motion.target() - self.camera_position)
            .resolution(resolution)
            .pixel_aspect(pixel_aspect)
            .fov(fov)
            .build()
    }
}
