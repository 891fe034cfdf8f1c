//! Error taxonomy for the tracer.
//!
//! `SafetyKill` is deliberately absent here: a safety-threshold kill is a
//! diagnostic `Event`, not a `Result::Err`.

use thiserror::Error;

/// Errors raised while building a [`crate::scene::Scene`] or a [`crate::material::Material`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("node `{0}` references unknown parent `{1}`")]
    UnknownParent(String, String),
    #[error("cycle detected in node parent graph at `{0}`")]
    ParentCycle(String),
    #[error("scene has no root (\"world\") node")]
    MissingRoot,
    #[error("scene has more than one root-level node; exactly one \"world\" node is required")]
    AmbiguousRoot,
    #[error("node `{0}` carries a scale factor in its local transform, which is not supported")]
    ScaledTransform(String),
    #[error("node `{0}` duplicates name `{1}`")]
    DuplicateName(String, String),
    #[error("world geometry too small: node `{0}`'s geometry is not contained by the world node")]
    WorldTooSmall(String),
    #[error("material `{0}` is empty but required for node `{1}`")]
    MissingMaterial(String, String),
}

/// Errors raised while constructing a geometry primitive.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("box extents must be positive, got {0:?}")]
    NonPositiveExtents([f32; 3]),
    #[error("cylinder radius and length must be positive, got radius={0}, length={1}")]
    NonPositiveCylinder(f32, f32),
    #[error("mesh is not closed (found {0} boundary edge(s))")]
    OpenMesh(usize),
    #[error("mesh has no triangles")]
    EmptyMesh,
}

/// Numerical degeneracies encountered mid-trace.
///
/// These never abort a batch: the engine catches them, emits an
/// [`crate::event::EventKind::Error`] event, and kills only the offending ray.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericalDegeneracy {
    #[error("ray direction has zero or non-finite length")]
    DegenerateDirection,
    #[error("sampled wavelength is NaN or non-positive")]
    InvalidWavelength,
    #[error("container resolution found no containing node for a point supposedly inside the world")]
    NoContainer,
    #[error("intersection list was empty for a ray supposedly inside the world")]
    EmptyIntersectionList,
    #[error("repeated identical intersection roots at t={0}")]
    RepeatedIntersection(f32),
}

/// Failure writing to an [`crate::sink::EventSink`].
///
/// Unlike per-ray numerical errors, a sink failure aborts the whole batch: the
/// caller must not be handed a silently truncated event log.
#[derive(Debug, Error)]
#[error("event sink failed to record an event: {reason}")]
pub struct SinkError {
    pub reason: String,
}

/// Top-level error type a caller of [`crate::engine::simulate`] may see.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
