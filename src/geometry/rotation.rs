use std::ops::Mul;

use nalgebra::{Matrix3, Rotation3, Vector3};
use thiserror::Error;

use super::{DegenerateVectorError, FloatType, WorldVector, try_normalize};

#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum RotationError {
    #[error("Rotation matrix needs exactly 9 values, got {0}")]
    WrongValueCount(usize),
}

/// 3x3 rotation operator, applied to vectors by left multiplication.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotation(Matrix3<FloatType>);

impl Rotation {
    pub fn identity() -> Self {
        Rotation(Matrix3::identity())
    }

    /// Composes rotations around X, Y and Z axes by the angles stored in the components
    /// of `angles`: the combined operator is `Rx(angles.x) * Ry(angles.y) * Rz(angles.z)`.
    pub fn from_angles(angles: &WorldVector) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z);
        Rotation((rx * ry * rz).into_inner())
    }

    /// Builds the operator from nine row-major coefficients.
    pub fn from_values(values: &[FloatType]) -> Result<Self, RotationError> {
        if values.len() != 9 {
            return Err(RotationError::WrongValueCount(values.len()));
        }
        Ok(Rotation(Matrix3::from_row_slice(values)))
    }

    /// True if all coefficients are zero.
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    pub fn matrix(&self) -> &Matrix3<FloatType> {
        &self.0
    }

    /// Rotates `v` and rescales the result back to the original length,
    /// so that matrices that are not quite orthonormal don't drift.
    pub fn rotate_keeping_length(
        &self,
        v: &WorldVector,
    ) -> Result<WorldVector, DegenerateVectorError> {
        Ok(try_normalize(&(self * v))?.into_inner() * v.norm())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul<WorldVector> for Rotation {
    type Output = WorldVector;

    fn mul(self, rhs: WorldVector) -> WorldVector {
        self.0 * rhs
    }
}

impl Mul<&WorldVector> for &Rotation {
    type Output = WorldVector;

    fn mul(self, rhs: &WorldVector) -> WorldVector {
        self.0 * rhs
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation(self.0 * rhs.0)
    }
}
