use super::*;
use crate::camera::config::AxisConfig;
use crate::math::{approx_eq, to_degrees};
use crate::view::ViewType;
use std::sync::{Arc, Mutex};

const EPS: f32 = 1e-4;

fn degrees(camera: &Camera, axis: CameraAxis) -> f32 {
    camera.angle(axis, AngleUnit::Degrees)
}

fn yaw_limited_config() -> CameraConfig {
    CameraConfig {
        yaw: AxisConfig::new(Some(-30.0), Some(30.0), None),
        ..Default::default()
    }
}

// ============================================================================
// Construction / load
// ============================================================================

#[test]
fn test_new_camera_defaults() {
    let camera = Camera::new();
    assert_eq!(camera.view().view_type(), ViewType::Rectilinear);
    assert_eq!(camera.yaw(), 0.0);
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), DEFAULT_FOV_DEGREES, EPS));
    assert!(!camera.is_initialized());
    assert!(camera.changelog().is_empty());
}

#[test]
fn test_load_applies_defaults() {
    let mut camera = Camera::new();
    camera.load(&CameraConfig {
        yaw: AxisConfig::new(None, None, Some(20.0)),
        fov: AxisConfig::new(None, None, Some(60.0)),
        parallax: Some(0.25),
        ..Default::default()
    });

    assert!(camera.is_initialized());
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 20.0, EPS));
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 60.0, EPS));
    assert_eq!(camera.parallax(), 0.25);
    assert!(camera.changelog().contains(ChangeFlags::YAW | ChangeFlags::FOV));
}

#[test]
fn test_load_keep_preserves_navigation() {
    let mut camera = Camera::new();
    camera.load(&CameraConfig {
        yaw: AxisConfig::new(None, None, Some(20.0)),
        keep: Some(true),
        ..Default::default()
    });
    camera.set_yaw(50.0, AngleUnit::Degrees);

    camera.load(&CameraConfig {
        yaw: AxisConfig::new(None, None, Some(-10.0)),
        parallax: Some(0.5),
        keep: Some(true),
        ..Default::default()
    });
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 50.0, EPS));
    assert_eq!(camera.parallax(), 0.5);
    assert!(camera.keep());

    camera.load(&CameraConfig {
        yaw: AxisConfig::new(None, None, Some(-10.0)),
        ..Default::default()
    });
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), -10.0, EPS));
    assert_eq!(camera.parallax(), 0.0);
    assert!(!camera.keep());
}

#[test]
fn test_load_keep_still_revalidates_bounds() {
    let mut camera = Camera::new();
    camera.load(&CameraConfig { keep: Some(true), ..Default::default() });
    camera.set_yaw(80.0, AngleUnit::Degrees);

    let mut config = yaw_limited_config();
    config.keep = Some(true);
    camera.load(&config);

    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 30.0, EPS));
}

// ============================================================================
// Setters - wrap, clamp, changelog
// ============================================================================

#[test]
fn test_set_yaw_clamped_by_config_and_changelog() {
    let mut camera = Camera::new();
    camera.load(&yaw_limited_config());
    camera.update();

    assert!(camera.set_yaw(45.0, AngleUnit::Degrees));
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 30.0, EPS));
    assert!(camera.changelog().contains(ChangeFlags::YAW));

    assert!(!camera.set_yaw(45.0, AngleUnit::Degrees));
    assert!(!camera.changelog().contains(ChangeFlags::YAW));
}

#[test]
fn test_set_yaw_wraps_before_clamping() {
    let mut camera = Camera::new();
    camera.set_yaw(370.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 10.0, 1e-3));

    camera.set_yaw(-190.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 170.0, 1e-3));
}

#[test]
fn test_non_finite_input_is_ignored() {
    let mut camera = Camera::new();
    camera.set_yaw(0.5, AngleUnit::Radians);
    camera.update();

    assert!(!camera.set_yaw(f32::NAN, AngleUnit::Radians));
    assert!(!camera.set_pitch(f32::INFINITY, AngleUnit::Degrees));
    assert!(!camera.set_fov(f32::NEG_INFINITY, AngleUnit::Degrees));
    assert_eq!(camera.yaw(), 0.5);
    assert!(camera.changelog().is_empty());
}

#[test]
fn test_pitch_narrowed_by_half_fov() {
    let mut camera = Camera::new();
    camera.set_fov(90.0, AngleUnit::Degrees);
    camera.set_pitch(80.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 45.0, EPS));

    let (min, max) = camera.effective_bounds(CameraAxis::Pitch, false);
    assert!(approx_eq(to_degrees(min), -90.0, EPS));
    assert!(approx_eq(to_degrees(max), 90.0, EPS));
}

#[test]
fn test_fov_change_revalidates_pitch() {
    let mut camera = Camera::new();
    camera.set_fov(60.0, AngleUnit::Degrees);
    camera.set_pitch(60.0, AngleUnit::Degrees);
    camera.update();

    assert!(camera.set_fov(100.0, AngleUnit::Degrees));
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 40.0, EPS));
    assert!(camera.changelog().contains(ChangeFlags::FOV | ChangeFlags::PITCH));
}

#[test]
fn test_fov_clamped_to_view_limits() {
    let mut camera = Camera::new();
    camera.set_fov(200.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 120.0, EPS));
    camera.set_fov(1.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 10.0, EPS));
}

#[test]
fn test_fov_config_more_restrictive_wins() {
    let mut camera = Camera::new();
    camera.load(&CameraConfig {
        fov: AxisConfig::new(Some(40.0), Some(80.0), None),
        ..Default::default()
    });
    // default 90 is above the config max
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 80.0, EPS));
    camera.set_fov(20.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 40.0, EPS));
}

#[test]
fn test_fov_bounds_monotonic() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Fisheye));
    let mut previous = f32::INFINITY;
    for fov in [30.0, 60.0, 90.0, 120.0, 150.0, 180.0] {
        camera.set_fov(fov, AngleUnit::Degrees);
        let (min, max) = camera.effective_bounds(CameraAxis::Pitch, true);
        let width = (max - min).max(0.0);
        assert!(width <= previous + EPS, "fov {} widened pitch range", fov);
        previous = width;
    }
}

#[test]
fn test_wide_fisheye_collapses_pitch_range() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Fisheye));
    camera.set_pitch(40.0, AngleUnit::Degrees);
    camera.set_fov(180.0, AngleUnit::Degrees);

    let (min, max) = camera.effective_bounds(CameraAxis::Pitch, true);
    assert!(min <= max);
    assert!(approx_eq(min, 0.0, EPS) && approx_eq(max, 0.0, EPS));
    assert!(approx_eq(camera.pitch(), 0.0, EPS));
}

#[test]
fn test_camera_bounds_outside_view_never_invert() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Fisheye));
    camera.load(&CameraConfig {
        pitch: AxisConfig::new(Some(80.0), Some(85.0), None),
        ..Default::default()
    });
    camera.set_fov(60.0, AngleUnit::Degrees);

    // fisheye pitch stops at 75 degrees, narrowed by half the fov
    let (min, max) = camera.effective_bounds(CameraAxis::Pitch, true);
    assert!(min <= max);
    assert!(approx_eq(to_degrees(min), 45.0, EPS) && approx_eq(to_degrees(max), 45.0, EPS));

    camera.set_pitch(-50.0, AngleUnit::Degrees);
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 45.0, EPS));
}

#[test]
fn test_angles_stay_in_range() {
    let mut camera = Camera::new();
    for value in [-1000.0, -181.0, -90.0, 0.0, 45.0, 179.0, 181.0, 725.0] {
        camera.set_yaw(value, AngleUnit::Degrees);
        camera.set_pitch(value, AngleUnit::Degrees);
        camera.set_roll(value, AngleUnit::Degrees);
        for axis in [CameraAxis::Yaw, CameraAxis::Pitch, CameraAxis::Roll] {
            let angle = camera.angle(axis, AngleUnit::Radians);
            let (min, max) = camera.effective_bounds(axis, true);
            assert!(angle.abs() <= std::f32::consts::PI + EPS);
            assert!(angle >= min - EPS && angle <= max + EPS, "{:?} {}", axis, angle);
        }
    }
}

// ============================================================================
// View switching
// ============================================================================

#[test]
fn test_flat_view_forces_roll_zero() {
    let mut camera = Camera::new();
    camera.set_roll(0.3, AngleUnit::Radians);
    camera.set_view(View::new(ViewType::Flat));
    assert_eq!(camera.roll(), 0.0);
    assert!(camera.changelog().contains(ChangeFlags::ROLL));
}

#[test]
fn test_pitch_resets_when_leaving_flat_beyond_pole() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Flat));
    camera.set_pitch(2.5, AngleUnit::Radians);
    assert_eq!(camera.pitch(), 2.5);

    camera.set_view(View::new(ViewType::Rectilinear));
    assert_eq!(camera.pitch(), 0.0);
}

#[test]
fn test_pitch_within_pole_is_clamped_not_reset() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Flat));
    camera.set_pitch(1.2, AngleUnit::Radians);

    camera.set_view(View::new(ViewType::Rectilinear));
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 45.0, EPS));
}

// ============================================================================
// update() and signals
// ============================================================================

#[test]
fn test_update_signal_order_and_clear() {
    let mut camera = Camera::new();
    let events = Arc::new(Mutex::new(Vec::new()));

    let e = events.clone();
    camera.on_change.add(move |_| e.lock().unwrap().push("change"));
    let e = events.clone();
    camera.on_fov_change.add(move |_| e.lock().unwrap().push("fov"));
    let e = events.clone();
    camera.on_orientation_change.add(move |_| e.lock().unwrap().push("orientation"));

    camera.set_fov(70.0, AngleUnit::Degrees);
    camera.set_yaw(10.0, AngleUnit::Degrees);
    camera.update();

    assert_eq!(*events.lock().unwrap(), vec!["orientation", "fov", "change"]);
    assert!(camera.changelog().is_empty());

    camera.update();
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[test]
fn test_update_fov_only_skips_orientation_signal() {
    let mut camera = Camera::new();
    let flags = Arc::new(Mutex::new(None));
    let f = flags.clone();
    camera.on_change.add(move |changes| *f.lock().unwrap() = Some(*changes));
    let orientation_calls = Arc::new(Mutex::new(0));
    let o = orientation_calls.clone();
    camera.on_orientation_change.add(move |_| *o.lock().unwrap() += 1);

    camera.set_fov(50.0, AngleUnit::Degrees);
    camera.update();

    assert_eq!(*orientation_calls.lock().unwrap(), 0);
    assert_eq!(*flags.lock().unwrap(), Some(ChangeFlags::FOV));
}

#[test]
fn test_perspective_position_follows_parallax() {
    let mut camera = Camera::new();
    camera.load(&CameraConfig { parallax: Some(0.5), ..Default::default() });
    camera.update();
    assert!((camera.perspective().position - Vec3::new(0.0, 0.0, 0.5)).length() < EPS);

    camera.set_view(View::new(ViewType::Fisheye));
    camera.update();
    assert!((camera.perspective().position.z - 1.5).abs() < EPS);
    assert!(camera.perspective().fov < camera.fov());
}

#[test]
fn test_view_matrix_is_inverse_of_pose() {
    let mut camera = Camera::new();
    camera.set_yaw(0.7, AngleUnit::Radians);
    camera.set_pitch(-0.2, AngleUnit::Radians);
    camera.update();

    let forward = camera.perspective().view_matrix.inverse().transform_vector3(Vec3::NEG_Z);
    assert!((forward - camera.pose().forward()).length() < EPS);
}

#[test]
fn test_orthographic_zoom() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Flat));
    camera.set_size(Resolution::new(800, 400));
    camera.set_fov(60.0, AngleUnit::Degrees);
    camera.update();

    let ortho = camera.orthographic();
    assert!(approx_eq(ortho.zoom, 2.0, EPS));
    assert!(approx_eq(ortho.left(), -1.0, EPS));
    assert!(approx_eq(ortho.top(), 0.5, EPS));
}

// ============================================================================
// Pose setters
// ============================================================================

#[test]
fn test_set_quaternion_recomputes_euler() {
    let mut camera = Camera::new();
    let pose = CameraPose::from_euler(0.5, 0.2, 0.0);
    camera.set_quaternion(pose.quaternion());

    assert!(approx_eq(camera.yaw(), 0.5, EPS));
    assert!(approx_eq(camera.pitch(), 0.2, EPS));
    assert!(camera.changelog().is_empty());
    assert!((camera.pose().forward() - pose.forward()).length() < EPS);
}

#[test]
fn test_set_model_view_round_trip() {
    let mut camera = Camera::new();
    let pose = CameraPose::from_euler(-0.4, 0.1, 0.05);
    camera.set_model_view(&pose.view_matrix());

    assert!(approx_eq(camera.yaw(), -0.4, EPS));
    assert!(approx_eq(camera.pitch(), 0.1, EPS));
    assert!(approx_eq(camera.roll(), 0.05, EPS));
}

// ============================================================================
// look_at / animation
// ============================================================================

#[test]
fn test_look_at_immediate() {
    let mut camera = Camera::new();
    camera.set_roll(0.4, AngleUnit::Radians);
    camera.look_at(LookAt::new(AngleUnit::Degrees).yaw(10.0).pitch(5.0).cancel_roll());

    assert!(!camera.is_playing());
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 10.0, EPS));
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 5.0, EPS));
    assert_eq!(camera.roll(), 0.0);
}

#[test]
fn test_look_at_animated_reaches_target() {
    let mut camera = Camera::new();
    let completed = Arc::new(Mutex::new(false));
    let c = completed.clone();
    camera.on_animation_complete.add(move |_| *c.lock().unwrap() = true);

    camera.look_at(LookAt::new(AngleUnit::Degrees)
        .yaw(90.0)
        .fov(60.0)
        .duration(1000.0)
        .easing(Easing::Linear));
    assert!(camera.is_playing());
    assert_eq!(camera.yaw(), 0.0);

    camera.advance(500.0);
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 45.0, 1e-2));
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 75.0, 1e-2));
    assert!(!*completed.lock().unwrap());

    camera.advance(600.0);
    assert!(approx_eq(degrees(&camera, CameraAxis::Yaw), 90.0, 1e-2));
    assert!(approx_eq(degrees(&camera, CameraAxis::Fov), 60.0, 1e-2));
    assert!(!camera.is_playing());
    assert!(*completed.lock().unwrap());
}

#[test]
fn test_look_at_clamps_with_target_fov() {
    let mut camera = Camera::new();
    camera.look_at(LookAt::new(AngleUnit::Degrees)
        .pitch(80.0)
        .fov(30.0)
        .duration(100.0));
    camera.advance(200.0);

    // 90 - 30/2, not 90 - 90/2
    assert!(approx_eq(degrees(&camera, CameraAxis::Pitch), 75.0, 1e-2));
}

#[test]
fn test_stop_animation() {
    let mut camera = Camera::new();
    camera.look_at(LookAt::new(AngleUnit::Radians).yaw(1.0).duration(100.0));
    camera.stop();
    camera.advance(200.0);
    assert_eq!(camera.yaw(), 0.0);
}

// ============================================================================
// Mapping / render camera
// ============================================================================

#[test]
fn test_camera_screen_world_round_trip() {
    let mut camera = Camera::new();
    camera.set_size(Resolution::new(800, 600));
    camera.set_yaw(0.3, AngleUnit::Radians);

    let center = camera.screen_to_world(Vec2::new(400.0, 300.0)).unwrap();
    assert!((center - CameraPose::from_euler(0.3, 0.0, 0.0).forward()).length() < EPS);

    let back = camera.world_to_screen(center).unwrap();
    assert!((back - Vec2::new(400.0, 300.0)).length() < 0.05);
}

#[test]
fn test_render_camera_stereo_offsets() {
    let mut camera = Camera::new();
    camera.set_size(Resolution::new(1600, 800));
    camera.update();

    let viewport = Viewport::new(800.0, 0.0, 800.0, 800.0);
    let right = camera.render_camera(viewport, Eye::Right, 0.064);
    let left = camera.render_camera(viewport, Eye::Left, 0.064);

    assert!(approx_eq(right.position().x, 0.032, EPS));
    assert!(approx_eq(left.position().x, -0.032, EPS));
    assert_eq!(right.eye(), Eye::Right);
    assert!(matches!(right.projection(), ProjectionKind::Perspective { .. }));
}

#[test]
fn test_render_camera_flat_is_orthographic() {
    let mut camera = Camera::new();
    camera.set_view(View::new(ViewType::Flat));
    camera.update();
    let snapshot = camera.render_camera(Viewport::new(0.0, 0.0, 100.0, 100.0), Eye::Mono, 0.0);
    assert!(matches!(snapshot.projection(), ProjectionKind::Orthographic { .. }));
}
