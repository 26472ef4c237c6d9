use serde::{Deserialize, Serialize};

/// Neutral value every component starts from
pub const BASELINE: i32 = 3;
/// Lowest value a normalized component may take
pub const MIN_COMPONENT: i32 = 1;
/// Highest value a normalized component may take
pub const MAX_COMPONENT: i32 = 5;
/// Number of components across both metric groups
pub const COMPONENT_COUNT: usize = 10;

/// What a game offers the player on the inside (1-5 each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalMetrics {
    pub aesthetic: i32,
    pub challenge: i32,
    pub pass_time: i32,
    pub narrative: i32,
    pub discovery: i32,
    pub chance: i32,
}

/// How players interact with each other (1-5 each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMetrics {
    pub confrontation: i32,
    pub manipulation: i32,
    pub accumulation: i32,
    pub teamwork: i32,
}

impl InternalMetrics {
    pub fn uniform(value: i32) -> Self {
        Self {
            aesthetic: value,
            challenge: value,
            pass_time: value,
            narrative: value,
            discovery: value,
            chance: value,
        }
    }
}

impl ExternalMetrics {
    pub fn uniform(value: i32) -> Self {
        Self {
            confrontation: value,
            manipulation: value,
            accumulation: value,
            teamwork: value,
        }
    }
}

/// Wire shape of a metric vector. Any `len` sent alongside is ignored.
#[derive(Debug, Deserialize)]
struct MetricComponents {
    internal: InternalMetrics,
    external: ExternalMetrics,
}

impl From<MetricComponents> for MetricVector {
    fn from(raw: MetricComponents) -> Self {
        MetricVector::new(raw.internal, raw.external)
    }
}

/// A ten-component taste or game profile with its magnitude
///
/// `len` is derived from the components on every construction path, so a
/// stored vector can never carry a magnitude that disagrees with its values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MetricComponents")]
pub struct MetricVector {
    internal: InternalMetrics,
    external: ExternalMetrics,
    len: f64,
}

impl Default for MetricVector {
    fn default() -> Self {
        Self::baseline()
    }
}

impl MetricVector {
    /// Builds a vector and computes its magnitude
    pub fn new(internal: InternalMetrics, external: ExternalMetrics) -> Self {
        let mut vector = Self {
            internal,
            external,
            len: 0.0,
        };
        vector.len = magnitude(&vector.components().map(f64::from));
        vector
    }

    /// All components set to the neutral value
    pub fn baseline() -> Self {
        Self::uniform(BASELINE)
    }

    pub fn uniform(value: i32) -> Self {
        Self::new(InternalMetrics::uniform(value), ExternalMetrics::uniform(value))
    }

    /// Builds a vector from components in canonical order
    pub fn from_components(c: [i32; COMPONENT_COUNT]) -> Self {
        Self::new(
            InternalMetrics {
                aesthetic: c[0],
                challenge: c[1],
                pass_time: c[2],
                narrative: c[3],
                discovery: c[4],
                chance: c[5],
            },
            ExternalMetrics {
                confrontation: c[6],
                manipulation: c[7],
                accumulation: c[8],
                teamwork: c[9],
            },
        )
    }

    /// Components in canonical order: the internal group, then the external group
    pub fn components(&self) -> [i32; COMPONENT_COUNT] {
        let i = &self.internal;
        let e = &self.external;
        [
            i.aesthetic,
            i.challenge,
            i.pass_time,
            i.narrative,
            i.discovery,
            i.chance,
            e.confrontation,
            e.manipulation,
            e.accumulation,
            e.teamwork,
        ]
    }

    pub fn internal(&self) -> &InternalMetrics {
        &self.internal
    }

    pub fn external(&self) -> &ExternalMetrics {
        &self.external
    }

    /// Euclidean magnitude of the components
    pub fn len(&self) -> f64 {
        self.len
    }

    /// Sum of elementwise products, in canonical order
    pub fn dot(&self, other: &MetricVector) -> i64 {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| i64::from(*a) * i64::from(*b))
            .sum()
    }

    /// Whether every component lies within the normalized range
    pub fn is_normalized(&self) -> bool {
        self.components()
            .iter()
            .all(|c| (MIN_COMPONENT..=MAX_COMPONENT).contains(c))
    }
}

/// sqrt of the sum of squares
pub fn magnitude(components: &[f64]) -> f64 {
    components.iter().map(|c| c * c).sum::<f64>().sqrt()
}
