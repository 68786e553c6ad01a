use affine_kernel::math::{Mat4x4, PosQuat, Quat, Vec3};
use affine_kernel::Tolerances;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

fn random_unit_vec(rng: &mut StdRng) -> Vec3<f64> {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.length();
        if len > 0.1 && len <= 1.0 {
            return v / len;
        }
    }
}

fn random_rotation(rng: &mut StdRng) -> Quat<f64> {
    let axis = random_unit_vec(rng);
    Quat::from_axis_angle(&axis, rng.gen_range(-PI..PI))
}

#[test]
fn test_axis_angle_rotation() {
    // 90 degrees about +Y takes +X to -Z
    let q = Quat::from_axis_angle(&Vec3::unit_y(), PI / 2.0);
    assert!(q.is_unit_within(&Tolerances::default()));

    let rotated = q.rotate_vec(&Vec3::unit_x());
    assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);

    // Conjugate undoes it
    let back = q.conjugate().rotate_vec(&rotated);
    assert_relative_eq!(back, Vec3::unit_x(), epsilon = 1e-12);
}

#[test]
fn test_axis_angle_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let axis = random_unit_vec(&mut rng);
        let angle = rng.gen_range(0.01..PI - 0.01);
        let (out_axis, out_angle) = Quat::from_axis_angle(&axis, angle).to_axis_angle();
        assert_relative_eq!(out_axis, axis, epsilon = 1e-9);
        assert_relative_eq!(out_angle, angle, epsilon = 1e-9);
    }

    // Negative angles decode to the same rotation with a flipped axis
    let (axis, angle) = Quat::from_axis_angle(&Vec3::unit_z(), -1.0_f64).to_axis_angle();
    assert_relative_eq!(axis, -Vec3::unit_z(), epsilon = 1e-12);
    assert_relative_eq!(angle, 1.0, epsilon = 1e-12);

    // No rotation
    let (axis, angle) = Quat::<f32>::identity().to_axis_angle();
    assert_eq!(axis, Vec3::unit_x());
    assert_eq!(angle, 0.0);
}

#[test]
fn test_hamilton_product_composes_rotations() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..100 {
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let v = random_unit_vec(&mut rng);

        // (a * b) rotates by b first
        let composed = (a * b).rotate_vec(&v);
        assert_relative_eq!(composed, a.rotate_vec(&b.rotate_vec(&v)), epsilon = 1e-9);
        assert_relative_eq!(a.product(&b), a * b);
    }
}

#[test]
fn test_slerp_endpoints() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let q1 = random_rotation(&mut rng);
        let mut q2 = random_rotation(&mut rng);
        if q1.dot(&q2) < 0.0 {
            q2 = -q2;
        }

        assert_relative_eq!(Quat::slerp(&q1, &q2, 0.0), q1, epsilon = 1e-9);
        assert_relative_eq!(Quat::slerp(&q1, &q2, 1.0), q2, epsilon = 1e-9);

        let t = rng.gen_range(0.0..1.0);
        assert_relative_eq!(Quat::slerp(&q1, &q1, t), q1, epsilon = 1e-12);

        let mid = Quat::slerp(&q1, &q2, t);
        assert_relative_eq!(mid.length(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_slerp_takes_short_arc() {
    // -q is the same rotation; interpolation must not swing through 360 degrees
    let q1 = Quat::from_axis_angle(&Vec3::unit_z(), 0.2_f64);
    let q2 = -Quat::from_axis_angle(&Vec3::unit_z(), 0.6_f64);
    let mid = Quat::slerp(&q1, &q2, 0.5);
    let (_, angle) = mid.to_axis_angle();
    assert!(angle.abs() < 1.0 || (2.0 * PI - angle).abs() < 1.0);
    let v = mid.rotate_vec(&Vec3::unit_x());
    assert_relative_eq!(v, Vec3::new(0.4_f64.cos(), 0.4_f64.sin(), 0.0), epsilon = 1e-9);
}

#[test]
fn test_between_maps_directions() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..200 {
        let a = random_unit_vec(&mut rng) * rng.gen_range(0.5..3.0);
        let b = random_unit_vec(&mut rng) * rng.gen_range(0.5..3.0);
        let q = Quat::between(&a, &b);
        assert_relative_eq!(q.length(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(q.rotate_vec(&a.normalized()), b.normalized(), epsilon = 1e-6);
    }

    // Parallel input gives no rotation
    let q = Quat::between(&Vec3::new(0.0_f32, 2.0, 0.0), &Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(q, Quat::identity());
}

#[test]
fn test_between_nearly_opposite() {
    let a = Vec3::new(1.0_f64, 0.0, 0.0);
    let b = Vec3::new(-1.0_f64, 2.0e-8, 0.0);
    let q = Quat::between(&a, &b);

    // A half turn, whichever branch produced it
    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(q.w, 0.0, epsilon = 1e-6);
    assert_relative_eq!(q.vector().dot(&a), 0.0, epsilon = 1e-9);
    assert_relative_eq!(q.rotate_vec(&a), b.normalized(), epsilon = 1e-6);
}

#[test]
fn test_between_exactly_opposite() {
    let a = Vec3::new(1.0_f64, 0.0, 0.0);
    let b = Vec3::new(-1.0_f64, 0.0, 0.0);
    let q = Quat::between(&a, &b);
    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-12);
    assert_eq!(q.w, 0.0);
    assert_eq!(q.vector().dot(&a), 0.0);
    assert_relative_eq!(q.rotate_vec(&a), b, epsilon = 1e-12);

    // Different lengths, and an axis with no x component
    let a = Vec3::new(0.0_f32, 2.0, 0.0);
    let b = Vec3::new(0.0_f32, -3.0, 0.0);
    let q = Quat::between(&a, &b);
    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-6);
    assert_eq!(q.w, 0.0);
    assert_relative_eq!(q.rotate_vec(&a.normalized()), b.normalized(), epsilon = 1e-6);
}

#[test]
fn test_from_axes_inverts_frame() {
    let mut rng = StdRng::seed_from_u64(15);
    for _ in 0..200 {
        let q = random_rotation(&mut rng);
        let m = Mat4x4::from_pos_rot(&Vec3::zero(), &q);
        let recovered = Quat::from_mat4x4_frame(&m);

        // Either sign of the double cover is acceptable
        let aligned = if recovered.dot(&q) < 0.0 { -recovered } else { recovered };
        assert_relative_eq!(aligned, q, epsilon = 1e-9);
    }

    // Pivot branch: half turns have a zero or negative trace
    let half_turn_x = Quat::from_axes(
        &Vec3::new(1.0_f64, 0.0, 0.0),
        &Vec3::new(0.0, -1.0, 0.0),
        &Vec3::new(0.0, 0.0, -1.0),
    );
    assert_relative_eq!(half_turn_x, Quat::new(1.0, 0.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn test_pos_quat_pose() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..100 {
        let pose = PosQuat::new(
            Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
            random_rotation(&mut rng),
        );
        let p = random_unit_vec(&mut rng) * 3.0;

        let moved = pose.transform_point(&p);
        assert_relative_eq!(pose.to_mat4x4().transform_point(&p), moved, epsilon = 1e-9);
        assert_relative_eq!(pose.invert().transform_point(&moved), p, epsilon = 1e-9);
    }
}

#[test]
fn test_quaternion_nalgebra_interop() {
    let q = Quat::new(0.1_f64, 0.2, 0.3, 0.9);
    let n: nalgebra::Quaternion<f64> = q.into();
    assert_eq!(n.w, 0.9);
    assert_eq!(n.i, 0.1);
    assert_eq!(n.k, 0.3);
    assert_eq!(Quat::from(n), q);
}
