//! Local affine node transforms.
//!
//! Scale is not supported: DESIGN.md resolves the choice between rescaling
//! t-values and forbidding scale outright in favor of rejecting any scaled
//! transform at construction.

use glam::{Mat4, Quat, Vec3};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    pub fn identity() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY }
    }

    /// Builds a transform from an arbitrary affine matrix, rejecting any
    /// scale component.
    pub fn from_mat4(node_name: &str, matrix: Mat4) -> Result<Self, ConfigError> {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        if (scale - Vec3::ONE).length() > 1.0e-5 {
            return Err(ConfigError::ScaledTransform(node_name.to_string()));
        }
        Ok(Self { translation, rotation })
    }

    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn inverse(self) -> Transform {
        let inv_rotation = self.rotation.inverse();
        Transform {
            rotation: inv_rotation,
            translation: inv_rotation * (-self.translation),
        }
    }

    /// Composes `self` as the parent transform applied before `child`
    /// (world = parent.then(child_local)).
    pub fn then(self, child: Transform) -> Transform {
        Transform {
            rotation: self.rotation * child.rotation,
            translation: self.translation + self.rotation * child.translation,
        }
    }

    pub fn transform_point(self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    pub fn transform_direction(self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}
