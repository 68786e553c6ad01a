use affine_kernel::math::{
    convex_poly_contains_point, line_intersect, quad_approx_dims, quad_center, quad_expand,
    quad_interp, quad_penetration_depth, rect2_intersects, transform_points, try_quad_expand,
    Line2, Mat3x2, PosScale, Rect2, Vec2,
};
use affine_kernel::MathError;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn unit_square() -> [Vec2<f64>; 4] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ]
}

fn random_rect(rng: &mut StdRng) -> Rect2<f64> {
    let min = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
    let size = Vec2::new(rng.gen_range(0.0..8.0), rng.gen_range(0.0..8.0));
    Rect2::from_min_max(min, min + size)
}

#[test]
fn test_rect_intersects_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..500 {
        let a = random_rect(&mut rng);
        let b = random_rect(&mut rng);
        assert_eq!(rect2_intersects(&a, &b), rect2_intersects(&b, &a));
        assert_eq!(a.intersection(&b).is_some(), a.intersects(&b));

        if let Some(i) = a.intersection(&b) {
            assert!(i.is_valid());
            assert_eq!(Some(i), b.intersection(&a));
            assert!(a.contains_point(&i.center()));
            assert!(b.contains_point(&i.center()));
        }
    }
}

#[test]
fn test_rect_intersection_cases() {
    let a = Rect2::new(0.0_f32, 0.0, 2.0, 2.0);
    let b = Rect2::new(1.0_f32, 1.0, 3.0, 3.0);
    let far = Rect2::new(5.0_f32, 5.0, 6.0, 6.0);

    assert_eq!(a.intersection(&b), Some(Rect2::new(1.0, 1.0, 2.0, 2.0)));
    assert_eq!(a.intersection(&a), Some(a));
    assert_eq!(a.intersection(&far), None);
    assert!(!rect2_intersects(&a, &far));

    // Shared edge counts as overlap
    let touching = Rect2::new(2.0_f32, 0.0, 4.0, 2.0);
    assert_eq!(a.intersection(&touching), Some(Rect2::new(2.0, 0.0, 2.0, 2.0)));

    // Invalid input never intersects
    assert_eq!(Rect2::invalid().intersection(&a), None);
}

#[test]
fn test_rect_measurements() {
    let mut r = Rect2::new(1.0_f64, 2.0, 5.0, 4.0);
    assert_eq!(r.width(), 4.0);
    assert_eq!(r.height(), 2.0);
    assert_eq!(r.size(), Vec2::new(4.0, 2.0));
    assert_eq!(r.center(), Vec2::new(3.0, 3.0));
    assert_eq!(r.corner_xy(true, false), Vec2::new(5.0, 2.0));

    r.expand(1.0, 0.5);
    assert_eq!(r, Rect2::new(0.0, 1.5, 6.0, 4.5));

    r.invalidate();
    assert!(!r.is_valid());

    r.set(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    assert!(r.is_valid());
    r.set_zero();
    assert_eq!(r.size(), Vec2::zero());
}

#[test]
fn test_extrude_segment_to_right() {
    let mut r = Rect2::<f32>::default();

    // Downward vertical segment extrudes towards -x
    assert!(r.set_by_extruding_segment_to_right(&Vec2::new(2.0, 3.0), &Vec2::new(2.0, 1.0), 1.0));
    assert_eq!(r, Rect2::new(1.0, 1.0, 2.0, 3.0));

    // Rightward horizontal segment extrudes towards -y
    assert!(r.set_by_extruding_segment_to_right(&Vec2::new(0.0, 0.0), &Vec2::new(4.0, 0.0), 2.0));
    assert_eq!(r, Rect2::new(0.0, -2.0, 4.0, 0.0));

    // Leftward horizontal segment extrudes towards +y
    assert!(r.set_by_extruding_segment_to_right(&Vec2::new(4.0, 0.0), &Vec2::new(0.0, 0.0), 2.0));
    assert_eq!(r, Rect2::new(0.0, 0.0, 4.0, 2.0));
}

#[test]
fn test_line_intersection() {
    let crossing = line_intersect(
        &Vec2::new(0.0_f64, 0.0),
        &Vec2::new(2.0, 2.0),
        &Vec2::new(0.0, 2.0),
        &Vec2::new(2.0, 0.0),
        true,
    );
    assert_eq!(crossing, Some(Vec2::new(1.0, 1.0)));

    // Parallel, not colinear
    let parallel = line_intersect(
        &Vec2::new(0.0_f64, 0.0),
        &Vec2::new(1.0, 0.0),
        &Vec2::new(0.0, 1.0),
        &Vec2::new(1.0, 1.0),
        false,
    );
    assert_eq!(parallel, None);
}

#[test]
fn test_colinear_segments_return_midpoint() {
    // Disjoint colinear segments still report a hit, even when clipping
    let a = Line2::new(Vec2::new(0.0_f32, 0.0), Vec2::new(1.0, 0.0));
    let b = Line2::new(Vec2::new(5.0_f32, 0.0), Vec2::new(6.0, 0.0));
    assert_eq!(a.intersect(&b, true), Some(Vec2::new(0.5, 0.0)));
    assert_eq!(a.intersect(&b, false), Some(Vec2::new(0.5, 0.0)));
}

#[test]
fn test_line_intersection_random_crossings() {
    let mut rng = StdRng::seed_from_u64(32);
    for _ in 0..200 {
        let p = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let da = Vec2::new(rng.gen_range(0.5..2.0), rng.gen_range(-0.4..0.4));
        let db = Vec2::new(rng.gen_range(-0.4..0.4), rng.gen_range(0.5..2.0));

        // Both segments straddle p
        let hit = line_intersect(&(p - da), &(p + da), &(p - db), &(p + db), true);
        assert_relative_eq!(hit.unwrap_or_default(), p, epsilon = 1e-9);

        // Short segments that stop before p only meet as lines
        let a0 = p + da;
        let a1 = p + da * 2.0;
        assert_eq!(line_intersect(&a0, &a1, &(p - db), &(p + db), true), None);
        let extended = line_intersect(&a0, &a1, &(p - db), &(p + db), false);
        assert_relative_eq!(extended.unwrap_or_default(), p, epsilon = 1e-9);
    }
}

#[test]
fn test_line_length_and_direction() {
    let l = Line2::new(Vec2::new(1.0_f64, 1.0), Vec2::new(4.0, 5.0));
    assert_eq!(l.length(), 5.0);
    assert_relative_eq!(l.direction(), Vec2::new(0.6, 0.8), epsilon = 1e-12);
}

#[test]
fn test_convex_poly_contains_point() {
    let square = unit_square();
    assert!(convex_poly_contains_point(&square, &Vec2::new(0.5, 0.5)));
    assert!(!convex_poly_contains_point(&square, &Vec2::new(1.5, 0.5)));
    assert!(!convex_poly_contains_point(&square, &Vec2::new(0.5, -0.1)));

    // Boundary points are outside
    assert!(!convex_poly_contains_point(&square, &Vec2::new(0.0, 0.5)));

    let triangle = [Vec2::new(0.0_f32, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)];
    assert!(convex_poly_contains_point(&triangle, &Vec2::new(0.5, 0.5)));
    assert!(!convex_poly_contains_point(&triangle, &Vec2::new(1.5, 1.5)));
}

#[test]
fn test_quad_interp_and_dims() {
    let quad = [
        Vec2::new(0.0_f64, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    assert_eq!(quad_interp(&quad, &Vec2::new(0.5, 0.5)), Vec2::new(2.0, 1.0));
    assert_eq!(quad_interp(&quad, &Vec2::new(0.25, 1.0)), Vec2::new(1.0, 2.0));
    assert_eq!(quad_center(&quad), Vec2::new(2.0, 1.0));
    assert_eq!(quad_approx_dims(&quad), Vec2::new(4.0, 2.0));
}

#[test]
fn test_quad_expand() {
    // Negative amounts push the edges away from the interior
    let grown = quad_expand(&unit_square(), -0.5);
    let expected = [
        Vec2::new(-0.5, -0.5),
        Vec2::new(1.5, -0.5),
        Vec2::new(1.5, 1.5),
        Vec2::new(-0.5, 1.5),
    ];
    for (g, e) in grown.iter().zip(expected.iter()) {
        assert_relative_eq!(*g, *e, epsilon = 1e-9);
    }

    let shrunk = quad_expand(&unit_square(), 0.25);
    assert_relative_eq!(shrunk[0], Vec2::new(0.25, 0.25), epsilon = 1e-9);
    assert_relative_eq!(shrunk[2], Vec2::new(0.75, 0.75), epsilon = 1e-9);
    assert_relative_eq!(quad_approx_dims(&shrunk), Vec2::new(0.5, 0.5), epsilon = 1e-9);
}

#[test]
fn test_quad_expand_degenerate() {
    let folded = [
        Vec2::new(0.0_f64, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
    ];
    assert_eq!(try_quad_expand(&folded, 1.0), Err(MathError::DegenerateQuad { edge: 1 }));
}

#[cfg(not(debug_assertions))]
#[test]
fn test_quad_expand_falls_back_to_input() {
    let folded = [
        Vec2::new(0.0_f64, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
    ];
    assert_eq!(quad_expand(&folded, 1.0), folded);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "parallel or coincident")]
fn test_quad_expand_asserts_on_degenerate_input() {
    let folded = [
        Vec2::new(0.0_f64, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
    ];
    quad_expand(&folded, 1.0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "at least 3 vertices")]
fn test_convex_poly_contains_point_asserts_on_empty() {
    let verts: [Vec2<f64>; 0] = [];
    convex_poly_contains_point(&verts, &Vec2::new(0.0, 0.0));
}

#[test]
fn test_quad_penetration_depth() {
    let square = unit_square();

    // Inside: distance to the nearest edge
    assert_relative_eq!(quad_penetration_depth(&square, &Vec2::new(0.5, 0.5)), 0.5);
    assert_relative_eq!(quad_penetration_depth(&square, &Vec2::new(0.9, 0.5)), 0.1, epsilon = 1e-12);

    // Outside a side: negative perpendicular distance
    assert_relative_eq!(quad_penetration_depth(&square, &Vec2::new(1.25, 0.5)), -0.25, epsilon = 1e-12);

    // Outside a corner: negative radial distance
    assert_relative_eq!(quad_penetration_depth(&square, &Vec2::new(2.0, 2.0)), -(2.0_f64.sqrt()), epsilon = 1e-12);
}

#[test]
fn test_penetration_agrees_with_containment() {
    let mut rng = StdRng::seed_from_u64(33);
    let square = unit_square();
    for _ in 0..500 {
        let p = Vec2::new(rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0));
        let depth = quad_penetration_depth(&square, &p);
        assert_eq!(depth > 0.0, convex_poly_contains_point(&square, &p));
    }
}

#[test]
fn test_transform_points() {
    let m = Mat3x2::translation(&Vec2::new(1.0_f32, -1.0));
    let verts = [Vec2::new(0.0_f32, 0.0), Vec2::new(2.0, 3.0)];
    let mut out = [Vec2::zero(); 2];
    transform_points(&m, &verts, &mut out);
    assert_eq!(out, [Vec2::new(1.0, -1.0), Vec2::new(3.0, 2.0)]);
}

#[test]
fn test_pos_scale_transform() {
    let mut rng = StdRng::seed_from_u64(34);
    for _ in 0..200 {
        let a = PosScale::new(Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)), rng.gen_range(0.1..4.0));
        let b = PosScale::new(Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)), rng.gen_range(0.1..4.0));
        let p = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));

        assert_relative_eq!(a.invert().mul_point(&a.mul_point(&p)), p, epsilon = 1e-9);
        assert_relative_eq!((a * b).mul_point(&p), a.mul_point(&b.mul_point(&p)), epsilon = 1e-9);
        assert_relative_eq!(a.to_mat3x2().mul_point(&p), a.mul_point(&p), epsilon = 1e-12);
        assert_relative_eq!(a.to_mat3x2() * b.to_mat3x2(), (a * b).to_mat3x2(), epsilon = 1e-9);
    }

    let zero = PosScale::new(Vec2::new(1.0_f64, 1.0), 0.0);
    assert_eq!(zero.try_invert(), Err(MathError::ZeroScale));
}
