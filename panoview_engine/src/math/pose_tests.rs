use super::*;
use crate::math::{approx_eq, to_radians};
use std::f32::consts::FRAC_PI_2;

const EPS: f32 = 1e-4;

fn assert_vec3_eq(a: Vec3, b: Vec3) {
    assert!((a - b).length() < EPS, "{:?} != {:?}", a, b);
}

#[test]
fn test_identity_looks_down_negative_z() {
    let pose = CameraPose::IDENTITY;
    assert_vec3_eq(pose.forward(), Vec3::NEG_Z);
    assert_vec3_eq(pose.up(), Vec3::Y);
    assert_eq!(pose.euler(), (0.0, 0.0, 0.0));
}

#[test]
fn test_yaw_rotates_about_world_up() {
    let pose = CameraPose::from_euler(FRAC_PI_2, 0.0, 0.0);
    assert_vec3_eq(pose.forward(), Vec3::NEG_X);
    assert_vec3_eq(pose.up(), Vec3::Y);
}

#[test]
fn test_pitch_tilts_forward_up() {
    let pose = CameraPose::from_euler(0.0, FRAC_PI_2 * 0.5, 0.0);
    let forward = pose.forward();
    assert!(forward.y > 0.0);
    assert!(forward.z < 0.0);
}

#[test]
fn test_quaternion_round_trip_recovers_euler() {
    let (yaw, pitch, roll) = (to_radians(35.0), to_radians(-20.0), to_radians(10.0));
    let pose = CameraPose::from_euler(yaw, pitch, roll);
    let rebuilt = CameraPose::from_quaternion(pose.quaternion());
    let (y, p, r) = rebuilt.euler();
    assert!(approx_eq(y, yaw, EPS));
    assert!(approx_eq(p, pitch, EPS));
    assert!(approx_eq(r, roll, EPS));
}

#[test]
fn test_view_matrix_round_trip_recovers_euler() {
    let (yaw, pitch, roll) = (to_radians(-120.0), to_radians(45.0), 0.0);
    let pose = CameraPose::from_euler(yaw, pitch, roll);
    let rebuilt = CameraPose::from_view_matrix(&pose.view_matrix());
    let (y, p, r) = rebuilt.euler();
    assert!(approx_eq(y, yaw, EPS));
    assert!(approx_eq(p, pitch, EPS));
    assert!(approx_eq(r, roll, EPS));
}

#[test]
fn test_view_matrix_is_inverse_rotation() {
    let pose = CameraPose::from_euler(0.3, 0.2, 0.1);
    let product = pose.view_matrix() * *pose.matrix();
    assert!(product.abs_diff_eq(Mat4::IDENTITY, EPS));
}
