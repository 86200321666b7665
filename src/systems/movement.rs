//! Fixed-step integration of rigid bodies.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::components::rigidbody::RigidBody;
use crate::components::transform::WorldTransform;
use crate::resources::worldtime::WorldTime;

/// Advance one body by `dt`: apply enabled forces, clamp speed, then move and
/// rotate within the body's constraints.
pub fn integrate_body(transform: &mut WorldTransform, body: &mut RigidBody, dt: f32) {
    let acceleration = body.total_acceleration();
    body.velocity += acceleration * dt;
    if body.constraints.freeze_position_y {
        body.velocity.y = 0.0;
    }
    body.clamp_speed();
    transform.position += body.velocity * dt;

    if body.constraints.freeze_rotation {
        body.angular_velocity = Vec3::ZERO;
    } else if body.angular_velocity != Vec3::ZERO {
        let step = Quat::from_scaled_axis(body.angular_velocity * dt);
        transform.rotation = (step * transform.rotation).normalize();
    }
}

/// Runs in the fixed-rate schedule with [`WorldTime::fixed_delta`].
pub fn movement_step(
    mut query: Query<(&mut WorldTransform, &mut RigidBody)>,
    time: Res<WorldTime>,
) {
    for (mut transform, mut body) in query.iter_mut() {
        integrate_body(&mut transform, &mut body, time.fixed_delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_body_stays_on_the_deck() {
        let mut transform = WorldTransform::default();
        let mut body = RigidBody::new();
        body.velocity = Vec3::new(1.0, 5.0, 0.0);
        body.angular_velocity = Vec3::Y;
        integrate_body(&mut transform, &mut body, 0.5);
        assert_eq!(transform.position, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn free_body_rises_and_tumbles() {
        let mut transform = WorldTransform::default();
        let mut body = RigidBody::new();
        body.relax_constraints();
        body.add_force("lift", Vec3::new(0.0, 2.0, 0.0));
        body.angular_velocity = Vec3::new(0.0, 1.0, 0.0);
        integrate_body(&mut transform, &mut body, 0.5);
        assert!((body.velocity.y - 1.0).abs() < 1e-6);
        assert!((transform.position.y - 0.5).abs() < 1e-6);
        assert!(transform.rotation.angle_between(Quat::IDENTITY) > 0.4);
    }

    #[test]
    fn max_speed_is_applied_after_forces() {
        let mut transform = WorldTransform::default();
        let mut body = RigidBody::new();
        body.max_speed = Some(1.0);
        body.add_force("thrust", Vec3::new(100.0, 0.0, 0.0));
        integrate_body(&mut transform, &mut body, 1.0);
        assert!((body.velocity.length() - 1.0).abs() < 1e-6);
    }
}
