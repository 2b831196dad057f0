#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn limits() -> ZoomLimits {
    ZoomLimits::default()
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_rotate_zero_is_identity() {
    let p = Point::new(10.0, 5.0);
    assert_eq!(p.rotated_around(Point::new(0.0, 0.0), 0.0), p);
}

#[test]
fn point_rotate_quarter_turn() {
    // +90° maps +x onto +y (screen space, y down).
    let p = Point::new(10.0, 0.0).rotated_around(Point::new(0.0, 0.0), 90.0);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn point_rotate_around_pivot() {
    let p = Point::new(20.0, 10.0).rotated_around(Point::new(10.0, 10.0), 180.0);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

// --- Rect ---

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
}

#[test]
fn rect_bounding_of_points() {
    let r = Rect::bounding([Point::new(5.0, -2.0), Point::new(-1.0, 3.0), Point::new(2.0, 8.0)]);
    assert_eq!(r, Some(Rect::new(-1.0, -2.0, 6.0, 10.0)));
}

#[test]
fn rect_bounding_empty_is_none() {
    assert_eq!(Rect::bounding(Vec::<Point>::new()), None);
}

#[test]
fn rect_union_and_center() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0).union(Rect::new(20.0, 20.0, 10.0, 10.0));
    assert_eq!(r, Rect::new(0.0, 0.0, 30.0, 30.0));
    assert_eq!(r.center(), Point::new(15.0, 15.0));
}

#[test]
fn rect_inflate() {
    assert_eq!(Rect::new(10.0, 10.0, 5.0, 5.0).inflate(2.0), Rect::new(8.0, 8.0, 9.0, 9.0));
}

// --- Viewport ---

#[test]
fn viewport_empty_detection() {
    assert!(Viewport::new(0.0, 600.0).is_empty());
    assert!(Viewport::new(f64::NAN, 600.0).is_empty());
    assert!(!Viewport::new(800.0, 600.0).is_empty());
}

// --- ZoomLimits ---

#[test]
fn zoom_limits_clamp() {
    let l = limits();
    assert_eq!(l.clamp(0.0), 0.1);
    assert_eq!(l.clamp(-3.0), 0.1);
    assert_eq!(l.clamp(100.0), 5.0);
    assert_eq!(l.clamp(f64::INFINITY), 0.1);
    assert_eq!(l.clamp(2.0), 2.0);
}

// --- Transforms ---

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(20.0, 10.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn round_trip_across_camera_states() {
    let cams = [
        Camera::default(),
        Camera { pan_x: 50.0, pan_y: -30.0, zoom: 2.0 },
        Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 },
        Camera { pan_x: -1000.0, pan_y: 250.0, zoom: 0.1 },
        Camera { pan_x: 3.0, pan_y: 4.0, zoom: 5.0 },
    ];
    let points = [Point::new(0.0, 0.0), Point::new(333.3, -999.9), Point::new(-12.5, 7.25)];
    for cam in cams {
        for p in points {
            assert!(point_approx_eq(cam.screen_to_world(cam.world_to_screen(p)), p));
        }
    }
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

#[test]
fn visible_world_rect_matches_inverse_corners() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let r = cam.visible_world_rect(Viewport::new(800.0, 600.0));
    assert!(approx_eq(r.x, -50.0));
    assert!(approx_eq(r.y, -25.0));
    assert!(approx_eq(r.width, 400.0));
    assert!(approx_eq(r.height, 300.0));
}

// --- Zoom ops ---

#[test]
fn zoom_in_multiplies_by_step() {
    let mut cam = Camera::default();
    cam.zoom_in(1.2, Viewport::new(800.0, 600.0), limits());
    assert!(approx_eq(cam.zoom, 1.2));
}

#[test]
fn zoom_out_divides_by_step() {
    let mut cam = Camera::default();
    cam.zoom_out(1.2, Viewport::new(800.0, 600.0), limits());
    assert!(approx_eq(cam.zoom, 1.0 / 1.2));
}

#[test]
fn zoom_in_is_clamped_at_max() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.9 };
    cam.zoom_in(1.2, Viewport::new(800.0, 600.0), limits());
    assert_eq!(cam.zoom, 5.0);
}

#[test]
fn zoom_out_is_clamped_at_min() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.11 };
    for _ in 0..10 {
        cam.zoom_out(1.2, Viewport::new(800.0, 600.0), limits());
    }
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn zoom_in_keeps_viewport_center_fixed() {
    let vp = Viewport::new(800.0, 600.0);
    let mut cam = Camera { pan_x: 37.0, pan_y: -12.0, zoom: 0.8 };
    let before = cam.screen_to_world(vp.center());
    cam.zoom_in(1.2, vp, limits());
    assert!(point_approx_eq(cam.screen_to_world(vp.center()), before));
}

#[test]
fn zoom_to_point_preserves_anchor() {
    let screens = [Point::new(0.0, 0.0), Point::new(400.0, 300.0), Point::new(791.5, 13.25)];
    let targets = [0.1, 0.37, 1.0, 2.2, 5.0, 50.0, 0.0];
    for s in screens {
        for z in targets {
            let mut cam = Camera { pan_x: -120.0, pan_y: 45.0, zoom: 1.3 };
            let before = cam.screen_to_world(s);
            cam.zoom_to_point(s, z, limits());
            let after = cam.screen_to_world(s);
            assert!(point_approx_eq(before, after), "anchor drifted for screen {s:?} zoom {z}");
        }
    }
}

#[test]
fn zoom_to_point_clamps_target() {
    let mut cam = Camera::default();
    cam.zoom_to_point(Point::new(10.0, 10.0), -4.0, limits());
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn pan_accumulates() {
    let mut cam = Camera::default();
    cam.pan(10.0, -5.0);
    cam.pan(2.5, 2.5);
    assert_eq!((cam.pan_x, cam.pan_y), (12.5, -2.5));
}

#[test]
fn setters_restore_state() {
    let mut cam = Camera::default();
    cam.set_zoom(2.0, limits());
    cam.set_pan(-40.0, 80.0);
    assert_eq!(cam, Camera { pan_x: -40.0, pan_y: 80.0, zoom: 2.0 });
}

#[test]
fn set_zoom_rejects_zero() {
    let mut cam = Camera::default();
    cam.set_zoom(0.0, limits());
    assert!(cam.zoom > 0.0);
}

#[test]
fn sanitized_repairs_non_finite_state() {
    let cam = Camera { pan_x: f64::NAN, pan_y: 3.0, zoom: f64::INFINITY }.sanitized(limits());
    assert_eq!(cam, Camera { pan_x: 0.0, pan_y: 3.0, zoom: 0.1 });
}
