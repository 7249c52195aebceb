use glam::{EulerRot, Mat4, Quat, Vec3};

/// Converts Euler angles in degrees to a quaternion.
///
/// Rotation is applied about X, then Y, then Z (fixed axes), i.e.
/// `q = qz * qy * qx`.
#[inline]
#[must_use]
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        degrees.z.to_radians(),
        degrees.y.to_radians(),
        degrees.x.to_radians(),
    )
}

/// Local position, rotation and scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Builds a transform from an editor-style Euler rotation in degrees.
    #[must_use]
    pub fn from_euler_degrees(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        Self::from_trs(position, euler_degrees_to_quat(rotation_degrees), scale)
    }

    pub fn set_rotation_euler_degrees(&mut self, degrees: Vec3) {
        self.rotation = euler_degrees_to_quat(degrees);
    }

    /// Current rotation as Euler angles in degrees (same order as
    /// [`euler_degrees_to_quat`]).
    #[must_use]
    pub fn rotation_euler_degrees(&self) -> Vec3 {
        let (z, y, x) = self.rotation.to_euler(EulerRot::ZYX);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// `translate(position) * rotate(rotation) * scale(scale)`.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
