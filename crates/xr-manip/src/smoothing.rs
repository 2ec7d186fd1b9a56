//! Low-pass filter pulling the live transform toward the desired one

use std::time::Duration;

use crate::config::SmoothingConfig;
use crate::spatial::Transform;

#[derive(Debug, Clone, Copy)]
pub struct SmoothingFilter {
    factor: f32,
    reference_fps: Option<f32>,
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(&SmoothingConfig::default())
    }
}

impl SmoothingFilter {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            factor: config.factor.clamp(f32::EPSILON, 1.0),
            reference_fps: config.reference_fps,
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Set α; values are clamped into (0, 1]
    pub fn set_factor(&mut self, factor: f32) {
        self.factor = if factor.is_finite() {
            factor.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };
    }

    /// α for a frame of length `dt`.
    ///
    /// Without a reference frame rate or a frame duration, α applies as-is.
    /// Otherwise it is rescaled so that the same wall-clock convergence is
    /// reached at any frame rate: `1 - (1 - α)^(dt * fps)`.
    pub fn factor_for(&self, dt: Option<Duration>) -> f32 {
        match (self.reference_fps, dt) {
            (Some(fps), Some(dt)) if self.factor < 1.0 => {
                let frames = dt.as_secs_f32() * fps;
                (1.0 - (1.0 - self.factor).powf(frames)).clamp(0.0, 1.0)
            }
            _ => self.factor,
        }
    }

    /// Next live transform, one step from `current` toward `desired`.
    ///
    /// Components already at their desired value are left bit-for-bit
    /// unchanged. If interpolation produces a non-finite result, `desired`
    /// is assigned directly. A non-finite `desired` is never written:
    /// `current` is kept instead.
    pub fn apply(&self, current: &Transform, desired: &Transform, dt: Option<Duration>) -> Transform {
        if !desired.is_finite() {
            return *current;
        }
        let t = self.factor_for(dt);
        if t >= 1.0 {
            return *desired;
        }

        let rotation = if current.rotation == desired.rotation {
            current.rotation
        } else {
            current
                .rotation
                .try_slerp(&desired.rotation, t)
                .unwrap_or(desired.rotation)
        };

        let next = Transform {
            position: current.position.lerp(&desired.position, t),
            rotation,
            scale: current.scale.lerp(&desired.scale, t),
        };

        if next.is_finite() {
            next
        } else {
            *desired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Point3D, Quaternion, Vector3D};

    fn filter(factor: f32, reference_fps: Option<f32>) -> SmoothingFilter {
        SmoothingFilter::new(&SmoothingConfig { factor, reference_fps })
    }

    #[test]
    fn test_snap_at_one() {
        let desired = Transform::from_position(Point3D::new(1.0, 2.0, 3.0));
        let next = filter(1.0, None).apply(&Transform::identity(), &desired, None);
        assert_eq!(next, desired);
    }

    #[test]
    fn test_partial_step() {
        let desired = Transform::from_position(Point3D::new(1.0, 0.0, 0.0)).with_scale(Vector3D::splat(2.0));
        let next = filter(0.25, None).apply(&Transform::identity(), &desired, None);
        assert!((next.position.x - 0.25).abs() < 0.0001);
        assert!((next.scale.x - 1.25).abs() < 0.0001);
    }

    #[test]
    fn test_converges() {
        let f = filter(0.28, None);
        let desired = Transform::from_position_rotation(
            Point3D::new(0.3, 1.0, -0.4),
            Quaternion::from_axis_angle(Vector3D::UP, 1.0),
        );
        let mut live = Transform::identity();
        for _ in 0..200 {
            live = f.apply(&live, &desired, None);
        }
        assert!(live.position.distance(&desired.position) < 1e-4);
        assert!(live.rotation.angle_to(&desired.rotation) < 1e-3);
    }

    #[test]
    fn test_degenerate_rotation_snaps() {
        let mut current = Transform::identity();
        current.rotation = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        let desired = Transform::from_position_rotation(
            Point3D::ORIGIN,
            Quaternion::from_axis_angle(Vector3D::UP, 0.5),
        );
        let next = filter(0.5, None).apply(&current, &desired, None);
        assert_eq!(next.rotation, desired.rotation);
    }

    #[test]
    fn test_frame_rate_independence() {
        let f = filter(0.28, Some(60.0));
        // One 60 Hz frame uses α unchanged
        assert!((f.factor_for(Some(Duration::from_secs_f32(1.0 / 60.0))) - 0.28).abs() < 1e-4);
        // Two 120 Hz frames land where one 60 Hz frame does
        let half = f.factor_for(Some(Duration::from_secs_f32(1.0 / 120.0)));
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((combined - 0.28).abs() < 1e-4);
        // No frame time, no rescaling
        assert_eq!(f.factor_for(None), 0.28);
    }

    #[test]
    fn test_non_finite_desired_keeps_current() {
        let current = Transform::from_position(Point3D::new(0.1, 0.2, 0.3));
        let desired = Transform::from_position(Point3D::new(f32::NAN, 0.0, 0.0));
        assert_eq!(filter(0.5, None).apply(&current, &desired, None), current);
        assert_eq!(filter(1.0, None).apply(&current, &desired, None), current);
    }
}
