//! Statistical photon path tracer core for non-imaging optics: luminescent
//! solar concentrators, down-shifting films, and similar nested-volume
//! light-guiding devices.
//!
//! The crate publishes a scene graph ([`scene`]), the geometry/material/
//! light primitives it is built from, and a single entry point,
//! [`engine::simulate`], that traces a batch of independent photons and
//! writes their causal history to a caller-supplied [`sink::EventSink`].
//!
//! Scene documents, persistence, visualisation, and a spectra catalogue are
//! external collaborators this crate does not provide; see each module's
//! docs for the seam it expects callers to fill in.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod intersection;
pub mod light;
pub mod material;
pub mod ray;
pub mod rng;
pub mod scene;
pub mod sink;
pub mod surface;

pub use config::TraceConfig;
pub use engine::{simulate, trace_single, BatchStats};
pub use error::TraceError;
pub use event::{Event, EventKind};
pub use ray::Ray;
pub use scene::{Scene, SceneBuilder};
pub use sink::{EventSink, InMemorySink, RayRow};
