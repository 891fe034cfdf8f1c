//! Events emitted during a single ray's trace.

use glam::Vec3;

/// The kind tag of an [`Event`].
///
/// `Scatter` is structurally identical to `Emit` — it is the variant used
/// when the causing component is a scatterer (qy = 1, emission pdf = incoming
/// wavelength) rather than a luminophore, an alias kept for readability in
/// the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Generate,
    Travel,
    Hit,
    Reflect,
    Transmit,
    Emit,
    Scatter,
    Absorb,
    Exit,
    Kill,
    /// A geometrical impossibility: the ray's trace is aborted but the
    /// batch proceeds.
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Generate => "GENERATE",
            EventKind::Travel => "TRAVEL",
            EventKind::Hit => "HIT",
            EventKind::Reflect => "REFLECT",
            EventKind::Transmit => "TRANSMIT",
            EventKind::Emit => "EMIT",
            EventKind::Scatter => "SCATTER",
            EventKind::Absorb => "ABSORB",
            EventKind::Exit => "EXIT",
            EventKind::Kill => "KILL",
            EventKind::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `event` table: an immutable record of a single
/// transition in a ray's causal history.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Name of the component that caused this event, if it was a volume
    /// interaction (`Emit`, `Scatter`, or an `Absorb` caused by a component).
    pub component: Option<String>,
    /// Name of the node whose geometry this event occurred on (the hit node).
    pub hit: Option<String>,
    /// Name of the container node immediately before the event.
    pub container: String,
    /// Name of the node on the far side of a boundary crossing, if any.
    pub adjacent: Option<String>,
    /// Opaque facet identifier (triangle index, box face code, ...).
    pub facet: Option<String>,
    /// Surface normal at the event, if applicable.
    pub normal: Option<Vec3>,
}

impl Event {
    pub fn generate(container: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Generate,
            component: None,
            hit: None,
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    pub fn exit(container: impl Into<String>, hit: impl Into<String>, facet: Option<String>, normal: Vec3) -> Self {
        Self {
            kind: EventKind::Exit,
            component: None,
            hit: Some(hit.into()),
            container: container.into(),
            adjacent: None,
            facet,
            normal: Some(normal),
        }
    }

    pub fn kill(container: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Kill,
            component: None,
            hit: None,
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    pub fn error(container: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Error,
            component: None,
            hit: None,
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    /// A boundary reached, before the surface delegate's decision is known.
    pub fn hit(container: impl Into<String>, hit: impl Into<String>, adjacent: Option<String>, facet: impl Into<String>, normal: Vec3) -> Self {
        Self {
            kind: EventKind::Hit,
            component: None,
            hit: Some(hit.into()),
            container: container.into(),
            adjacent,
            facet: Some(facet.into()),
            normal: Some(normal),
        }
    }

    pub fn reflect(container: impl Into<String>, hit: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Reflect,
            component: None,
            hit: Some(hit.into()),
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    pub fn transmit(container: impl Into<String>, adjacent: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Transmit,
            component: None,
            hit: None,
            container: container.into(),
            adjacent: Some(adjacent.into()),
            facet: None,
            normal: None,
        }
    }

    /// A volume re-emission: `Emit` for a luminophore, `Scatter` when the
    /// causing component is a scatterer.
    pub fn emission(kind: EventKind, container: impl Into<String>, component: impl Into<String>) -> Self {
        debug_assert!(matches!(kind, EventKind::Emit | EventKind::Scatter));
        Self {
            kind,
            component: Some(component.into()),
            hit: None,
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    /// An absorption caused by a volume component (`qy` roll failed).
    pub fn absorb_component(container: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Absorb,
            component: Some(component.into()),
            hit: None,
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }

    /// An absorption caused by a surface delegate (an absorbing coating).
    pub fn absorb_surface(container: impl Into<String>, hit: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Absorb,
            component: None,
            hit: Some(hit.into()),
            container: container.into(),
            adjacent: None,
            facet: None,
            normal: None,
        }
    }
}
