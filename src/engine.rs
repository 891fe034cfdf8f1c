//! The photon-tracing engine: the main per-ray loop.

use std::sync::Arc;

use rand::RngCore;
use rayon::prelude::*;

use crate::config::TraceConfig;
use crate::error::{SinkError, TraceError};
use crate::event::{Event, EventKind};
use crate::intersection::{intersect, resolve_container};
use crate::material::{Component, ComponentKind, Material};
use crate::ray::Ray;
use crate::rng::{uniform_open_below, worker_rng, DynRng};
use crate::scene::{NodeId, Scene};
use crate::sink::{EventSink, RayRow};
use crate::surface::SurfaceDelegate;

/// Aggregate counts over a batch, reported alongside the event stream so a
/// caller can judge whether a run is biased by a large killed fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchStats {
    pub generated: u64,
    pub exited: u64,
    pub killed: u64,
    pub absorbed: u64,
    pub errors: u64,
}

impl BatchStats {
    fn record(&mut self, kind: EventKind) {
        match kind {
            EventKind::Generate => self.generated += 1,
            EventKind::Exit => self.exited += 1,
            EventKind::Kill => self.killed += 1,
            EventKind::Absorb => self.absorbed += 1,
            EventKind::Error => self.errors += 1,
            _ => {}
        }
    }
}

/// Traces `n_rays` independent photons emitted from `light_node`, writing
/// every (ray-state, event) row to `sink` in per-ray emission order.
///
/// Rays are partitioned across `num_workers` rayon tasks, each with its own
/// deterministically-seeded RNG, over a shared read-only scene. Cross-worker
/// ordering is not guaranteed; rows are flushed to `sink` one worker's full
/// output at a time.
pub fn simulate<S: EventSink>(
    scene: &Scene,
    light_node: NodeId,
    config: TraceConfig,
    n_rays: u64,
    master_seed: u64,
    num_workers: usize,
    sink: &mut S,
) -> Result<BatchStats, TraceError> {
    let light = scene
        .node(light_node)
        .light
        .clone()
        .unwrap_or_else(|| panic!("node `{}` carries no light source", scene.node(light_node).name));
    let world_transform = scene.world_transform(light_node);
    let source_name = scene.node(light_node).name.clone();

    let num_workers = num_workers.max(1);
    let per_worker = n_rays / num_workers as u64;
    let remainder = n_rays % num_workers as u64;

    let worker_results: Vec<Vec<(RayRow, Event)>> = (0..num_workers)
        .into_par_iter()
        .map(|worker_index| {
            let count = per_worker + if (worker_index as u64) < remainder { 1 } else { 0 };
            let start = worker_index as u64 * per_worker + (worker_index as u64).min(remainder);
            let mut rng = worker_rng(master_seed, worker_index as u32);
            let mut rows = Vec::new();
            for offset in 0..count {
                let throw_id = start + offset;
                let ray = light.emit(world_transform, source_name.clone(), &mut rng);
                trace_one(scene, ray, throw_id, &config, &mut rng, &mut rows);
            }
            rows
        })
        .collect();

    let mut stats = BatchStats::default();
    for rows in worker_results {
        for (row, event) in rows {
            stats.record(event.kind);
            sink.record(row, event).map_err(|e| TraceError::Sink(SinkError { reason: e.to_string() }))?;
        }
    }
    log::debug!(
        "batch of {n_rays} rays across {num_workers} workers done: {} exited, {} killed, {} absorbed, {} errors",
        stats.exited,
        stats.killed,
        stats.absorbed,
        stats.errors
    );
    Ok(stats)
}

/// Traces a single, already-constructed ray to termination and returns its
/// full (ray-state, event) history. Exposed directly (rather than only via
/// [`simulate`]) so a caller can inject a starting ray that did not come
/// from a [`crate::light::LightSource`] — a fixed test probe, for instance.
pub fn trace_single(scene: &Scene, ray: Ray, throw_id: u64, config: &TraceConfig, rng: &mut dyn RngCore) -> Vec<(RayRow, Event)> {
    let mut rows = Vec::new();
    trace_one(scene, ray, throw_id, config, rng, &mut rows);
    rows
}

/// Traces one ray from generation to termination, appending every
/// (ray-state, event) row produced along the way to `out`.
///
/// Never returns an error: a geometrical impossibility is recorded as an
/// `Error` event and ends this ray's trace, but does not abort the batch.
fn trace_one(scene: &Scene, ray: Ray, throw_id: u64, config: &TraceConfig, rng: &mut dyn RngCore, out: &mut Vec<(RayRow, Event)>) {
    let mut ray = ray;

    if !ray.direction_is_valid() {
        log::warn!("ray {throw_id}: degenerate direction {:?}, killing", ray.direction);
        out.push((RayRow::from_ray(throw_id, &ray), Event::error("unknown")));
        return;
    }

    let mut container = match resolve_container(scene, ray.position, config.epsilon) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("ray {throw_id}: {e} at {:?}, killing", ray.position);
            out.push((RayRow::from_ray(throw_id, &ray), Event::error("unknown")));
            return;
        }
    };
    out.push((RayRow::from_ray(throw_id, &ray), Event::generate(scene.node(container).name.to_string())));

    let mut events = 0u32;
    loop {
        events += 1;
        if events > config.max_events || ray.travelled > config.max_distance {
            ray = ray.kill();
            out.push((RayRow::from_ray(throw_id, &ray), Event::kill(scene.node(container).name.to_string())));
            return;
        }

        let container_name = scene.node(container).name.clone();
        let material = container_material(scene, container);

        let hits = intersect(scene, ray.position, ray.direction, config.epsilon);
        let Some(surf) = hits.first() else {
            log::warn!("ray {throw_id}: no intersection found inside `{container_name}`, killing");
            out.push((RayRow::from_ray(throw_id, &ray), Event::error(container_name.to_string())));
            return;
        };
        let t_surf = surf.t;
        let hit_node = surf.node;
        let hit_facet = surf.facet.clone();

        let t_vol = material.sample_free_flight(ray.wavelength_nm, rng);

        if t_vol < t_surf {
            ray = ray.advance(t_vol, material.refractive_index(ray.wavelength_nm));

            let Some(component) = material.sample_component(ray.wavelength_nm, rng) else {
                log::warn!("ray {throw_id}: volume interaction drawn in `{container_name}` but no component selected, killing");
                out.push((RayRow::from_ray(throw_id, &ray), Event::error(container_name.to_string())));
                return;
            };
            let component = Arc::clone(component);

            let xi = uniform_open_below(&mut DynRng(rng));
            if xi < component.quantum_yield() {
                let new_wavelength = component.sample_emission_wavelength(ray.wavelength_nm, rng);
                let new_direction = component.phase_function().sample(ray.direction, rng);
                if !new_wavelength.is_finite() || new_wavelength <= 0.0 {
                    log::warn!("ray {throw_id}: component `{}` sampled invalid wavelength {new_wavelength}, killing", component.name());
                    out.push((RayRow::from_ray(throw_id, &ray), Event::error(container_name.to_string())));
                    return;
                }
                ray = ray.re_emit(new_wavelength, new_direction);
                let kind = if component.kind() == ComponentKind::Scatterer { EventKind::Scatter } else { EventKind::Emit };
                out.push((RayRow::from_ray(throw_id, &ray), Event::emission(kind, container_name.to_string(), component.name().to_string())));
                // container is unchanged by a volume interaction.
            } else {
                ray = ray.kill();
                out.push((RayRow::from_ray(throw_id, &ray), Event::absorb_component(container_name.to_string(), component.name().to_string())));
                return;
            }
        } else {
            ray = ray.advance(t_surf, material.refractive_index(ray.wavelength_nm));

            let hit_geometry = scene
                .node(hit_node)
                .geometry
                .as_ref()
                .expect("intersection service only reports nodes with geometry");
            let world_transform = scene.world_transform(hit_node);
            let local_point = world_transform.inverse().transform_point(ray.position);
            let (local_normal, _) = hit_geometry.normal_at(local_point);
            let world_normal = world_transform.transform_direction(local_normal).normalize_or_zero();

            let leaving = hit_node == container;
            let adjacent = if leaving { scene.node(container).parent } else { Some(hit_node) };

            let n1 = material.refractive_index(ray.wavelength_nm);
            let n2 = match adjacent {
                Some(id) => container_material(scene, id).refractive_index(ray.wavelength_nm),
                None => 1.0,
            };

            let adjacent_name = adjacent.map(|id| scene.node(id).name.to_string());
            if adjacent.is_some() {
                // A hit against the outermost world surface (no adjacent
                // node on the far side) goes straight to its terminal
                // Reflect/Exit below without a separate Hit event: there is
                // no boundary "decision" to record beyond the terminal one.
                out.push((
                    RayRow::from_ray(throw_id, &ray),
                    Event::hit(container_name.to_string(), scene.node(hit_node).name.to_string(), adjacent_name.clone(), hit_facet.clone(), world_normal),
                ));
            }

            let surface_delegate = scene
                .node(hit_node)
                .surface
                .clone()
                .unwrap_or_else(|| Arc::new(crate::surface::Fresnel) as Arc<dyn SurfaceDelegate>);
            let outcome = surface_delegate.interact(ray.direction, world_normal, n1, n2, rng);
            match outcome {
                crate::surface::SurfaceOutcome::Reflect(direction) => {
                    ray = ray.turn(direction).nudge(config.epsilon);
                    out.push((RayRow::from_ray(throw_id, &ray), Event::reflect(container_name.to_string(), scene.node(hit_node).name.to_string())));
                    // container is unchanged.
                }
                crate::surface::SurfaceOutcome::Refract(direction) => {
                    ray = ray.turn(direction).nudge(config.epsilon);
                    match adjacent {
                        None => {
                            out.push((RayRow::from_ray(throw_id, &ray), Event::exit(container_name.to_string(), scene.node(hit_node).name.to_string(), Some(hit_facet), world_normal)));
                            return;
                        }
                        Some(id) => {
                            out.push((RayRow::from_ray(throw_id, &ray), Event::transmit(container_name.to_string(), scene.node(id).name.to_string())));
                            container = id;
                        }
                    }
                }
                crate::surface::SurfaceOutcome::Absorb => {
                    ray = ray.kill();
                    out.push((RayRow::from_ray(throw_id, &ray), Event::absorb_surface(container_name.to_string(), scene.node(hit_node).name.to_string())));
                    return;
                }
            }
        }
    }
}

fn container_material(scene: &Scene, id: NodeId) -> Arc<Material> {
    scene.node(id).material.clone().unwrap_or_else(|| Arc::new(Material::vacuum()))
}
