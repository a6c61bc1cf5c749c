use bon::bon;

use crate::geometry::{DegenerateVectorError, FloatType, Rotation, WorldPoint, WorldVector};

/// Point light source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub position: WorldPoint,
    pub power: FloatType,
}

#[bon]
impl Light {
    #[builder]
    pub fn new(
        #[builder(default = WorldPoint::new(0.0, -100.0, -100.0))] position: WorldPoint,
        #[builder(default = 1.0)] power: FloatType,
    ) -> Self {
        Light { position, power }
    }
}

impl Default for Light {
    fn default() -> Self {
        Light::builder().build()
    }
}

impl Light {
    pub fn move_by(&mut self, displacement: &WorldVector) {
        self.position += *displacement;
    }

    /// Orbits the light around the world origin, keeping its distance.
    pub fn rotate_around_origin(&mut self, angles: &WorldVector) -> Result<(), DegenerateVectorError> {
        self.rotate_around_point(&WorldPoint::origin(), angles)
    }

    /// Orbits the light around `point`, keeping its distance.
    pub fn rotate_around_point(
        &mut self,
        point: &WorldPoint,
        angles: &WorldVector,
    ) -> Result<(), DegenerateVectorError> {
        let offset = Rotation::from_angles(angles).rotate_keeping_length(&(self.position - point))?;
        self.position = point + offset;
        Ok(())
    }
}
