//! Concrete tracing scenarios against the photon-tracing engine, each
//! grounded in a known piece of geometry/optics whose outcome can be
//! checked by hand.

use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pvtrace::engine::{simulate, trace_single};
use pvtrace::event::EventKind;
use pvtrace::geometry::{Cuboid, Geometry, Sphere};
use pvtrace::material::component::Luminophore;
use pvtrace::material::phase::Isotropic;
use pvtrace::material::spectrum::{Flat, GaussianEmission};
use pvtrace::material::{Component, Material};
use pvtrace::ray::Ray;
use pvtrace::scene::{Scene, SceneBuilder, Transform};
use pvtrace::sink::InMemorySink;
use pvtrace::TraceConfig;

fn empty_world(radius: f32) -> Scene {
    let mut builder = SceneBuilder::new();
    builder
        .add_root("world", Geometry::Sphere(Sphere::new(radius).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn scenario_1_empty_world_exits_through_outer_sphere() {
    let scene = empty_world(10.0);
    let config = TraceConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let ray = Ray::new(Vec3::new(-1.0, 0.0, 1.1), Vec3::new(1.0, 0.0, 0.0), 555.0, "probe".into());

    let rows = trace_single(&scene, ray, 0, &config, &mut rng);
    let kinds: Vec<EventKind> = rows.iter().map(|(_, e)| e.kind).collect();

    // The world's own outer surface has no adjacent node on the far side, so
    // there's no boundary decision to log before the terminal Exit.
    assert_eq!(kinds, vec![EventKind::Generate, EventKind::Exit]);

    let expected_x = (100.0_f32 - 1.1 * 1.1).sqrt();
    let (final_row, _) = rows.last().unwrap();
    assert!((final_row.position.x - expected_x).abs() < 1.0e-3, "x = {}", final_row.position.x);
    assert!((final_row.position.z - 1.1).abs() < 1.0e-5);
}

#[test]
fn scenario_2_ray_still_hits_outer_sphere_when_it_misses_an_inner_node() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(10.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    // Centered well off the z=1.1 ray line, so this node is never touched.
    let glass = builder
        .add_node("glass", Transform::new(Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY), world)
        .unwrap();
    builder.set_geometry(glass, Geometry::Sphere(Sphere::new(1.0).unwrap()));
    builder.set_material(glass, Arc::new(Material::new("glass", Arc::new(Flat(1.5)), Vec::new())));
    let scene = builder.build().unwrap();

    let config = TraceConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let ray = Ray::new(Vec3::new(-1.0, 0.0, 1.1), Vec3::new(1.0, 0.0, 0.0), 555.0, "probe".into());
    let rows = trace_single(&scene, ray, 0, &config, &mut rng);
    let kinds: Vec<EventKind> = rows.iter().map(|(_, e)| e.kind).collect();

    // This ray never touches the inner glass node, so it exits through the
    // world's own outer surface with no Hit logged beforehand.
    assert_eq!(kinds, vec![EventKind::Generate, EventKind::Exit]);
}

#[test]
fn scenario_3_head_on_transmission_through_sphere_preserves_direction() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(10.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    let glass = builder.add_node("glass", Transform::identity(), world).unwrap();
    builder.set_geometry(glass, Geometry::Sphere(Sphere::new(1.0).unwrap()));
    builder.set_material(glass, Arc::new(Material::new("glass", Arc::new(Flat(1.5)), Vec::new())));
    let scene = builder.build().unwrap();
    let config = TraceConfig::default();

    // A head-on ray crosses both sphere boundaries at normal incidence, so
    // the only randomness is whether a ~4% Fresnel reflection is drawn at
    // each crossing. Filter down to the runs that transmit cleanly through
    // both boundaries and check Snell symmetry on those. The final crossing
    // is through the world's own outer surface, so it goes straight to Exit
    // with no preceding Hit.
    let expected = vec![
        EventKind::Generate,
        EventKind::Hit,
        EventKind::Transmit,
        EventKind::Hit,
        EventKind::Transmit,
        EventKind::Exit,
    ];
    let mut checked = 0;
    for seed in 0..200u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 650.0, "probe".into());
        let rows = trace_single(&scene, ray, seed, &config, &mut rng);
        let kinds: Vec<EventKind> = rows.iter().map(|(_, e)| e.kind).collect();
        if kinds == expected {
            let (final_row, _) = rows.last().unwrap();
            assert!((final_row.direction - Vec3::new(1.0, 0.0, 0.0)).length() < 1.0e-5);
            checked += 1;
        }
    }
    assert!(checked > 100, "expected most head-on rays to transmit cleanly, saw {checked}/200");
}

#[test]
fn scenario_4_luminophore_sphere_absorbs_and_mostly_re_emits() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(10.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    let sphere = builder.add_node("lumophore", Transform::identity(), world).unwrap();
    builder.set_geometry(sphere, Geometry::Sphere(Sphere::new(1.0).unwrap()));
    let luminophore: Arc<dyn Component> = Arc::new(Luminophore {
        name: "dye".to_string(),
        coefficient: Arc::new(Flat(5.0)),
        quantum_yield: 0.98,
        emission: Arc::new(GaussianEmission { peak_nm: 620.0, fwhm_nm: 20.0 }),
        phase_function: Box::new(Isotropic),
    });
    // Index-matched to the world so the boundary never reflects; only the
    // volume interaction is under test.
    builder.set_material(sphere, Arc::new(Material::new("lumophore", Arc::new(Flat(1.0)), vec![luminophore])));
    let scene = builder.build().unwrap();
    let config = TraceConfig::default();

    let n = 4000u64;
    let mut interacted = 0u64;
    let mut re_emitted = 0u64;
    for throw_id in 0..n {
        let mut rng = ChaCha8Rng::seed_from_u64(1_000_000 + throw_id);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 555.0, "probe".into());
        let rows = trace_single(&scene, ray, throw_id, &config, &mut rng);
        let had_emit = rows.iter().any(|(_, e)| e.kind == EventKind::Emit);
        let had_absorb = rows.iter().any(|(_, e)| e.kind == EventKind::Absorb && e.component.is_some());
        if had_emit || had_absorb {
            interacted += 1;
        }
        if had_emit {
            re_emitted += 1;
        }
    }

    // Expected interaction fraction ~= 1 - exp(-alpha * 2r) = 1 - e^-10 ~ 0.9999.
    let interacted_fraction = interacted as f64 / n as f64;
    assert!(interacted_fraction > 0.99, "interacted fraction = {interacted_fraction}");

    // Of those, ~98% should re-emit (qy = 0.98).
    let re_emit_fraction = re_emitted as f64 / interacted as f64;
    assert!((re_emit_fraction - 0.98).abs() < 0.05, "re-emit fraction = {re_emit_fraction}");
}

#[test]
fn scenario_5_lsc_slab_top_face_fresnel_reflection() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(50.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();

    let slab = builder.add_node("slab", Transform::identity(), world).unwrap();
    builder.set_geometry(slab, Geometry::Cuboid(Cuboid::new(Vec3::new(5.0, 5.0, 1.0)).unwrap()));
    let absorber: Arc<dyn Component> = Arc::new(Luminophore {
        name: "dye".to_string(),
        coefficient: Arc::new(Flat(0.05)),
        quantum_yield: 0.98,
        emission: Arc::new(GaussianEmission { peak_nm: 620.0, fwhm_nm: 20.0 }),
        phase_function: Box::new(Isotropic),
    });
    builder.set_material(slab, Arc::new(Material::new("slab", Arc::new(Flat(1.5)), vec![absorber])));

    let source = builder
        .add_node("source", Transform::new(Vec3::new(0.0, 0.0, 5.0), Quat::from_rotation_x(std::f32::consts::PI)), world)
        .unwrap();
    builder.set_light(
        source,
        Arc::new(pvtrace::light::LightSource::new(
            Box::new(pvtrace::light::position::Square { a: 5.0, b: 5.0 }),
            Box::new(pvtrace::light::direction::Collimated),
            Box::new(pvtrace::light::wavelength::Fixed(550.0)),
        )),
    );
    let scene = builder.build().unwrap();
    let config = TraceConfig::default();

    let mut sink = InMemorySink::new();
    let stats = simulate(&scene, source, config, 1000, 42, 4, &mut sink).unwrap();

    let mut reflected = 0u64;
    let mut entering = 0u64;
    for throw_id in 0..1000u64 {
        let events = sink.events_for(throw_id);
        let first_hit_index = events.iter().position(|e| e.kind == EventKind::Hit);
        if let Some(idx) = first_hit_index {
            match events.get(idx + 1).map(|e| e.kind) {
                Some(EventKind::Reflect) => reflected += 1,
                Some(EventKind::Transmit) => entering += 1,
                _ => {}
            }
        }
    }

    let reflected_fraction = reflected as f64 / 1000.0;
    assert!(reflected_fraction > 0.01 && reflected_fraction < 0.10, "reflected fraction = {reflected_fraction}");
    assert!(entering > 850, "entering = {entering}");

    if entering > 0 {
        let killed_fraction = stats.killed as f64 / entering as f64;
        assert!(killed_fraction < 0.05, "killed fraction = {killed_fraction}");
    }
}

#[test]
fn scenario_6_total_internal_reflection_inside_glass_sphere() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(10.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    let glass = builder.add_node("glass", Transform::identity(), world).unwrap();
    builder.set_geometry(glass, Geometry::Sphere(Sphere::new(1.0).unwrap()));
    builder.set_material(glass, Arc::new(Material::new("glass", Arc::new(Flat(1.5)), Vec::new())));
    let scene = builder.build().unwrap();
    let config = TraceConfig::default();

    // Starting near the sphere's edge and travelling almost tangentially
    // produces an angle of incidence far above the ~41.8 deg critical angle
    // for n=1.5 -> n=1.0.
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let ray = Ray::new(Vec3::new(0.99, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 500.0, "probe".into());
    let rows = trace_single(&scene, ray, 0, &config, &mut rng);
    let kinds: Vec<EventKind> = rows.iter().map(|(_, e)| e.kind).collect();

    assert_eq!(kinds[0], EventKind::Generate);
    assert_eq!(kinds[1], EventKind::Hit);
    assert_eq!(kinds[2], EventKind::Reflect);
}

#[test]
fn reproducibility_same_seed_yields_identical_event_log() {
    let mut builder = SceneBuilder::new();
    let world = builder
        .add_root("world", Geometry::Sphere(Sphere::new(10.0).unwrap()), Arc::new(Material::vacuum()))
        .unwrap();
    let source = builder
        .add_node("source", Transform::new(Vec3::new(0.0, 0.0, -5.0), Quat::IDENTITY), world)
        .unwrap();
    builder.set_light(
        source,
        Arc::new(pvtrace::light::LightSource::collimated_point(Box::new(pvtrace::light::wavelength::Fixed(555.0)))),
    );
    let scene = builder.build().unwrap();
    let config = TraceConfig::default();

    let mut sink_1 = InMemorySink::new();
    let mut sink_2 = InMemorySink::new();
    simulate(&scene, source, config, 200, 123, 4, &mut sink_1).unwrap();
    simulate(&scene, source, config, 200, 123, 4, &mut sink_2).unwrap();

    assert_eq!(sink_1.rows.len(), sink_2.rows.len());
    assert_eq!(sink_1.rows, sink_2.rows);
}
