//! Ambient tracing configuration.
//!
//! Kept as a plain struct constructed in code, the way the GPU path tracer
//! this crate grew out of constructs its `TracingConfig` in code rather than
//! parsing it from a file — configuration loading from a document is an
//! out-of-scope external collaborator.

/// Safety and batch-shape knobs for a single call to [`crate::engine::simulate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// Maximum events recorded for a single ray before it is killed.
    pub max_events: u32,
    /// Maximum cumulative travelled distance before a ray is killed.
    pub max_distance: f32,
    /// Numerical tolerance epsilon used for self-intersection avoidance,
    /// tie-breaking, and on-surface tests. Conceptually ≈1e-9 in scene
    /// units, relaxed here to a value workable with f32 geometry.
    pub epsilon: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_events: 1000,
            max_distance: 1.0e6,
            epsilon: 1.0e-6,
        }
    }
}
