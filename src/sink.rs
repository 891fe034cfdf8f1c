//! Event sink trait.
//!
//! The engine does not own the sink; it pushes rows into whatever
//! implementation the caller supplies. A persistent tabular writer (a
//! two-table `ray`/`event` schema) is an out-of-scope external collaborator
//! — only the seam is defined here, plus an in-memory sink for tests.

use crate::event::Event;
use crate::ray::Ray;

/// One row of the `ray` table: the ray's state *after* an event.
#[derive(Debug, Clone, PartialEq)]
pub struct RayRow {
    pub throw_id: u64,
    pub position: glam::Vec3,
    pub direction: glam::Vec3,
    pub wavelength_nm: f32,
    pub source: String,
    pub travelled: f32,
    pub elapsed: f32,
}

impl RayRow {
    pub fn from_ray(throw_id: u64, ray: &Ray) -> Self {
        Self {
            throw_id,
            position: ray.position,
            direction: ray.direction,
            wavelength_nm: ray.wavelength_nm,
            source: ray.source.to_string(),
            travelled: ray.travelled,
            elapsed: ray.elapsed,
        }
    }
}

/// Receives one (ray-state, event) pair per transition, in emission order
/// for a single ray.
pub trait EventSink: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    fn record(&mut self, row: RayRow, event: Event) -> Result<(), Self::Error>;
}

/// An in-process sink that keeps every row, for tests and small batches.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub rows: Vec<(RayRow, Event)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_for(&self, throw_id: u64) -> Vec<&Event> {
        self.rows
            .iter()
            .filter(|(row, _)| row.throw_id == throw_id)
            .map(|(_, event)| event)
            .collect()
    }
}

impl EventSink for InMemorySink {
    type Error = std::convert::Infallible;

    fn record(&mut self, row: RayRow, event: Event) -> Result<(), Self::Error> {
        self.rows.push((row, event));
        Ok(())
    }
}
