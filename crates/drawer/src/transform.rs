//! Actor placement and the six local ray axes.
//!
//! Local frame convention: forward is +Z, right is +X, up is +Y.

use glam::{Quat, Vec3};
use sharedraw_config::RayDirection;

/// Position and orientation of a drawing actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for ActorTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl ActorTransform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// World-space unit vector for one of the actor's local axes
    pub fn axis(&self, direction: RayDirection) -> Vec3 {
        match direction {
            RayDirection::Forward => self.forward(),
            RayDirection::Backward => -self.forward(),
            RayDirection::Right => self.right(),
            RayDirection::Left => -self.right(),
            RayDirection::Up => self.up(),
            RayDirection::Down => -self.up(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_axes() {
        let t = ActorTransform::default();
        assert_eq!(t.axis(RayDirection::Forward), Vec3::Z);
        assert_eq!(t.axis(RayDirection::Backward), Vec3::NEG_Z);
        assert_eq!(t.axis(RayDirection::Right), Vec3::X);
        assert_eq!(t.axis(RayDirection::Left), Vec3::NEG_X);
        assert_eq!(t.axis(RayDirection::Up), Vec3::Y);
        assert_eq!(t.axis(RayDirection::Down), Vec3::NEG_Y);
    }

    #[test]
    fn test_rotated_axes() {
        // Pitch forward by 90 degrees: forward now points down
        let t = ActorTransform {
            position: Vec3::ONE,
            rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        };
        assert!(close(t.axis(RayDirection::Forward), Vec3::NEG_Y));
        assert!(close(t.axis(RayDirection::Down), Vec3::NEG_Z));
        assert!(close(t.axis(RayDirection::Right), Vec3::X));
    }
}
