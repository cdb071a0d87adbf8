// Host-side tests for point field construction and snapshot application.

use flower_core::*;
use std::f64::consts::TAU;

#[test]
fn point_count_follows_viewport_width() {
    assert_eq!(point_count_for_width(400.0), 5000);
    assert_eq!(point_count_for_width(499.9), 5000);
    assert_eq!(point_count_for_width(500.0), 20000);
    assert_eq!(point_count_for_width(800.0), 20000);

    let narrow = PointField::for_viewport(400.0, PointLayout::Legacy);
    assert_eq!(narrow.count(), 5000);
    assert_eq!(narrow.vertices().len(), 3 * 5000);
    let wide = PointField::for_viewport(800.0, PointLayout::Uniform);
    assert_eq!(wide.count(), 20000);
    assert_eq!(wide.points().len(), 20000);
}

#[test]
fn legacy_layout_steps_three_slots_per_point() {
    let n = 12;
    let v = generate_points(n, PointLayout::Legacy);
    assert_eq!(&v[0..3], &[1.0, 0.0, 0.0]);
    for i in 0..n {
        let rad = 3.0 * i as f64 * TAU / n as f64;
        let (x, y) = (v[i * 3], v[i * 3 + 1]);
        assert!((x as f64 - rad.cos()).abs() < 1e-6, "x at {i}");
        assert!((y as f64 - rad.sin()).abs() < 1e-6, "y at {i}");
    }
    // Point 1 sits a quarter turn round.
    assert!((v[3]).abs() < 1e-6);
    assert!((v[4] - 1.0).abs() < 1e-6);
}

#[test]
fn uniform_layout_spaces_points_evenly() {
    let v = generate_points(4, PointLayout::Uniform);
    let expected = [[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]];
    for (i, e) in expected.iter().enumerate() {
        assert!((v[i * 3] - e[0]).abs() < 1e-6);
        assert!((v[i * 3 + 1] - e[1]).abs() < 1e-6);
    }
}

#[test]
fn points_lie_on_unit_circle_with_phase_in_z() {
    for layout in [PointLayout::Legacy, PointLayout::Uniform] {
        let v = generate_points(5000, layout);
        for p in v.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
            assert!((p[2] - p[1].atan2(p[0])).abs() < 1e-5);
            assert!(p[2] > -std::f32::consts::PI - 1e-6 && p[2] <= std::f32::consts::PI + 1e-6);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_points(5000, PointLayout::Legacy);
    let b = generate_points(5000, PointLayout::Legacy);
    assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
    assert!(generate_points(0, PointLayout::Uniform).is_empty());
}

#[test]
fn field_starts_from_default_parameters() {
    let field = PointField::new(16, PointLayout::Legacy);
    assert_eq!(*field.uniforms(), FlowerUniforms::default());
    assert_eq!(field.uniforms().degree_c, 12.0);
    assert_eq!(field.transform().scale, 1.0);
    assert_eq!(field.transform().model_matrix(), glam::Mat4::IDENTITY);
}

#[test]
fn applying_same_snapshot_twice_is_a_no_op() {
    let mut field = PointField::new(16, PointLayout::Legacy);
    let mut snap = ParameterSnapshot::default();
    snap.uniforms.progression = 2.5;
    snap.size = 0.5;
    snap.transforms.rotation.z = 1.0;

    assert!(field.apply(&snap));
    let after_first = (*field.uniforms(), *field.transform());
    assert!(!field.apply(&snap));
    assert_eq!((*field.uniforms(), *field.transform()), after_first);

    assert_eq!(field.uniforms().progression, 2.5);
    assert_eq!(field.transform().scale, 0.5);
    assert_eq!(field.transform().rotation.z, 1.0);
}

#[test]
fn model_matrix_applies_scale_then_rotation_then_translation() {
    let t = RigidTransform {
        position: glam::Vec3::new(1.0, 0.0, 0.0),
        rotation: glam::Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        scale: 2.0,
    };
    let p = t.model_matrix().transform_point3(glam::Vec3::X);
    // (1,0,0) -> scaled (2,0,0) -> rotated (0,2,0) -> moved (1,2,0)
    assert!((p - glam::Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
}
