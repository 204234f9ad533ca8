// Host-side tests for the sphere mesh, the CPU noise mirror and the camera.

use glam::Vec3;
use pulse_sphere::core::constants::*;
use pulse_sphere::core::noise::{displace, displacement, pnoise, surface_noise};
use pulse_sphere::core::{
    wire_icosphere, CameraRig, PointerOffset, RenderState, SphereUniforms, Theme,
};
use std::collections::HashSet;

#[test]
fn icosphere_has_expected_counts() {
    let mesh = wire_icosphere(SPHERE_RADIUS, SPHERE_DETAIL);
    // 10 n^2 + 2 vertices and 30 n^2 edges for n = detail + 1
    assert_eq!(mesh.vertices.len(), 1692);
    assert_eq!(mesh.edge_count(), 5070);
}

#[test]
fn base_icosahedron_counts() {
    let mesh = wire_icosphere(1.0, 0);
    assert_eq!(mesh.vertices.len(), 12);
    assert_eq!(mesh.edge_count(), 30);
}

#[test]
fn icosphere_vertices_lie_on_radius_with_unit_normals() {
    let mesh = wire_icosphere(SPHERE_RADIUS, SPHERE_DETAIL);
    for v in &mesh.vertices {
        let p = Vec3::from_array(v.position);
        let n = Vec3::from_array(v.normal);
        assert!((p.length() - SPHERE_RADIUS).abs() < 1e-4);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(p.normalize().dot(n) > 0.9999);
    }
}

#[test]
fn icosphere_edges_are_unique_and_in_range() {
    let mesh = wire_icosphere(SPHERE_RADIUS, 3);
    let n = mesh.vertices.len() as u32;
    let mut seen = HashSet::new();
    for pair in mesh.indices.chunks(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a < n && b < n);
        assert_ne!(a, b);
        assert!(seen.insert((a.min(b), a.max(b))), "duplicate edge {a}-{b}");
    }
}

#[test]
fn noise_is_periodic() {
    let rep = Vec3::splat(NOISE_PERIOD);
    let samples = [
        Vec3::new(0.3, 1.7, -2.2),
        Vec3::new(4.9, -0.1, 8.25),
        Vec3::new(-7.6, 3.3, 0.05),
    ];
    for p in samples {
        let base = pnoise(p, rep);
        for k in [1.0, -1.0, 2.0] {
            let shifted = pnoise(p + rep * k, rep);
            assert!((base - shifted).abs() < 1e-3, "{p:?} k={k}: {base} vs {shifted}");
        }
    }
}

#[test]
fn noise_vanishes_on_lattice_points() {
    let rep = Vec3::splat(NOISE_PERIOD);
    for p in [Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 7.0, 9.0)] {
        assert!(pnoise(p, rep).abs() < 1e-6);
    }
}

#[test]
fn noise_is_bounded_and_not_constant() {
    let rep = Vec3::splat(NOISE_PERIOD);
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for i in 0..200 {
        let t = i as f32 * 0.173;
        let v = pnoise(Vec3::new(t, t * 0.7 + 0.31, 1.9 - t * 0.4), rep);
        assert!(v.is_finite());
        assert!(v.abs() < 1.5);
        min = min.min(v);
        max = max.max(v);
    }
    assert!(max - min > 0.1);
}

#[test]
fn surface_noise_scales_by_amplitude() {
    let p = Vec3::new(0.4, 1.1, 2.6);
    let expected = NOISE_AMPLITUDE * pnoise(p + Vec3::splat(2.0), Vec3::splat(NOISE_PERIOD));
    assert!((surface_noise(p, 2.0) - expected).abs() < 1e-6);
}

#[test]
fn silent_audio_leaves_sphere_undisplaced() {
    let p = Vec3::new(0.0, 3.0, 0.0);
    assert_eq!(displacement(p, 12.5, 0.0), 0.0);
    assert_eq!(displace(p, Vec3::Y, 12.5, 0.0), p);
}

#[test]
fn displacement_grows_with_frequency() {
    let p = Vec3::new(1.3, 2.1, 1.4);
    let low = displacement(p, 0.7, 30.0);
    let high = displacement(p, 0.7, 255.0);
    assert!((high - low * 8.5).abs() < 1e-4);
    let moved = displace(p, p.normalize(), 0.7, 255.0);
    assert!(((moved - p).length() - high.abs()).abs() < 1e-4);
}

#[test]
fn camera_starts_at_rest_position() {
    let rig = CameraRig::new(800, 400);
    assert_eq!(rig.position, Vec3::new(0.0, -2.0, 14.0));
    assert!((rig.aspect - 2.0).abs() < 1e-6);
}

#[test]
fn camera_eases_toward_pointer() {
    let mut rig = CameraRig::new(100, 100);
    let pointer = PointerOffset { x: 2.0, y: -1.0 };
    rig.ease_toward(pointer);
    assert!((rig.position.x - 0.1).abs() < 1e-6);
    // y covers half the gap to -pointer.y = 1.0 from -2.0
    assert!((rig.position.y - (-0.5)).abs() < 1e-6);
    assert_eq!(rig.position.z, 14.0);

    for _ in 0..500 {
        rig.ease_toward(pointer);
    }
    assert!((rig.position.x - 2.0).abs() < 1e-3);
    assert!((rig.position.y - 1.0).abs() < 1e-3);
}

#[test]
fn zero_viewport_keeps_aspect() {
    let mut rig = CameraRig::new(1600, 900);
    let before = rig.aspect;
    rig.set_viewport(0, 900);
    assert_eq!(rig.aspect, before);
}

#[test]
fn origin_projects_to_screen_centre() {
    let rig = CameraRig::new(1280, 720);
    let clip = rig.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn pointer_offset_is_relative_to_container_centre() {
    let p = PointerOffset::from_client(350.0, 100.0, [100.0, 50.0, 300.0, 200.0]);
    assert!((p.x - 1.0).abs() < 1e-6);
    assert!((p.y - (-0.5)).abs() < 1e-6);
}

#[test]
fn render_state_keeps_last_magnitude_without_analyser() {
    let mut s = RenderState::default();
    assert_eq!(s.frequency_magnitude, INITIAL_FREQUENCY);
    s.advance(0.5, Vec3::ZERO, Some(80.0));
    s.advance(0.6, Vec3::ZERO, None);
    assert_eq!(s.frequency_magnitude, 80.0);
    assert_eq!(s.elapsed_time, 0.6);
    s.advance(0.7, Vec3::ZERO, Some(999.0));
    assert_eq!(s.frequency_magnitude, MAX_MAGNITUDE);
}

#[test]
fn uniforms_match_shader_block_size() {
    assert_eq!(std::mem::size_of::<SphereUniforms>(), 96);
}

#[test]
fn theme_changes_only_colors_in_uniforms() {
    let rig = CameraRig::new(640, 480);
    let mut state = RenderState::default();
    state.advance(3.25, rig.position, Some(42.0));
    let dark = SphereUniforms::new(rig.view_proj(), &state, &Theme::Dark.preset());
    let light = SphereUniforms::new(rig.view_proj(), &state, &Theme::Light.preset());

    assert_eq!(dark.view_proj, light.view_proj);
    assert_eq!(dark.time, light.time);
    assert_eq!(dark.frequency, light.frequency);
    assert_eq!((dark.red, dark.green, dark.blue), (1.0, 1.0, 1.0));
    assert_eq!((light.red, light.green, light.blue), (0.0, 0.0, 0.0));
}
