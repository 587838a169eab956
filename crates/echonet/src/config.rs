use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Every tunable of the generation pipeline.
///
/// Missing fields in a JSON document fall back to the defaults below, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    pub placement: PlacementConfig,
    pub augment: AugmentConfig,
    pub relax: RelaxConfig,
    pub repair: RepairConfig,
    pub roles: RoleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance from every canvas side inside which no node is scattered.
    pub margin: f64,
    /// Preferred minimum distance between any two scattered nodes.
    pub min_separation: f64,
    /// Samples per node before the last sample is accepted regardless of separation.
    pub max_tries: usize,
    /// Lower bound (inclusive) of the random number of non-hub nodes.
    pub min_nodes: usize,
    /// Upper bound (inclusive) of the random number of non-hub nodes.
    pub max_nodes: usize,
    /// Fixed number of non-hub nodes; skips the random draw when set.
    pub node_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Degree cap honored by every stage that adds edges.
    pub max_degree: usize,
    /// Minimum distance between an added edge and any third node.
    pub clearance: f64,
    /// Minimum angle between two edges sharing an endpoint.
    pub min_angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxConfig {
    pub max_steps: usize,
    /// Pairwise repulsion constant (force = repulsion / distance^2).
    pub repulsion: f64,
    /// Rest length of every edge spring.
    pub spring_length: f64,
    pub spring_k: f64,
    /// Scale applied to the accumulated force to get the step displacement.
    pub damping: f64,
    /// Added to every distance so coincident nodes never divide by zero.
    pub epsilon: f64,
    /// The simulation stops once no node moves more than this in a step.
    pub min_movement: f64,
    /// Relaxed nodes are clamped this far inside the canvas.
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    pub max_iterations: usize,
    pub leaf_max_iterations: usize,
    /// Never break spanning-tree edges while repairing crossings.
    pub protect_spanning_tree: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub min_cpu_nodes: usize,
    pub max_cpu_nodes: usize,
    pub min_data_caches: usize,
    pub max_data_caches: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            placement: PlacementConfig::default(),
            augment: AugmentConfig::default(),
            relax: RelaxConfig::default(),
            repair: RepairConfig::default(),
            roles: RoleConfig::default(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            min_separation: 40.0,
            max_tries: 100,
            min_nodes: 25,
            max_nodes: 35,
            node_count: None,
        }
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            max_degree: 3,
            clearance: 26.0,
            min_angle_deg: 25.0,
        }
    }
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            max_steps: 250,
            repulsion: 12000.0,
            spring_length: 120.0,
            spring_k: 0.08,
            damping: 0.75,
            epsilon: 0.1,
            min_movement: 0.2,
            margin: 60.0,
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            leaf_max_iterations: 100,
            protect_spanning_tree: false,
        }
    }
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            min_cpu_nodes: 1,
            max_cpu_nodes: 2,
            min_data_caches: 1,
            max_data_caches: 2,
        }
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        message: message.into(),
    }
}

fn require_finite_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("must be finite and >= 0, got {value}")));
    }
    Ok(())
}

impl GeneratorConfig {
    /// Defaults with a different canvas size.
    pub fn with_bounds(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(invalid("width", format!("must be > 0, got {}", self.width)));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(invalid("height", format!("must be > 0, got {}", self.height)));
        }

        let p = &self.placement;
        require_finite_non_negative("placement.margin", p.margin)?;
        if 2.0 * p.margin >= self.width.min(self.height) {
            return Err(invalid(
                "placement.margin",
                format!(
                    "margin {} leaves no interior on a {}x{} canvas",
                    p.margin, self.width, self.height
                ),
            ));
        }
        require_finite_non_negative("placement.min_separation", p.min_separation)?;
        if p.max_tries == 0 {
            return Err(invalid("placement.max_tries", "must be >= 1"));
        }
        if p.min_nodes > p.max_nodes {
            return Err(invalid(
                "placement.min_nodes",
                format!("{} exceeds max_nodes {}", p.min_nodes, p.max_nodes),
            ));
        }

        let a = &self.augment;
        if a.max_degree == 0 {
            return Err(invalid("augment.max_degree", "must be >= 1"));
        }
        require_finite_non_negative("augment.clearance", a.clearance)?;
        if !(0.0..=180.0).contains(&a.min_angle_deg) {
            return Err(invalid(
                "augment.min_angle_deg",
                format!("must be within [0, 180], got {}", a.min_angle_deg),
            ));
        }

        let r = &self.relax;
        require_finite_non_negative("relax.repulsion", r.repulsion)?;
        require_finite_non_negative("relax.spring_length", r.spring_length)?;
        require_finite_non_negative("relax.spring_k", r.spring_k)?;
        require_finite_non_negative("relax.min_movement", r.min_movement)?;
        if !(r.damping > 0.0 && r.damping <= 1.0) {
            return Err(invalid(
                "relax.damping",
                format!("must be within (0, 1], got {}", r.damping),
            ));
        }
        if !(r.epsilon.is_finite() && r.epsilon > 0.0) {
            return Err(invalid(
                "relax.epsilon",
                format!("must be > 0, got {}", r.epsilon),
            ));
        }
        require_finite_non_negative("relax.margin", r.margin)?;
        if 2.0 * r.margin > self.width.min(self.height) {
            return Err(invalid(
                "relax.margin",
                format!(
                    "margin {} leaves no interior on a {}x{} canvas",
                    r.margin, self.width, self.height
                ),
            ));
        }

        let roles = &self.roles;
        if roles.min_cpu_nodes > roles.max_cpu_nodes {
            return Err(invalid(
                "roles.min_cpu_nodes",
                format!(
                    "{} exceeds max_cpu_nodes {}",
                    roles.min_cpu_nodes, roles.max_cpu_nodes
                ),
            ));
        }
        if roles.min_data_caches > roles.max_data_caches {
            return Err(invalid(
                "roles.min_data_caches",
                format!(
                    "{} exceeds max_data_caches {}",
                    roles.min_data_caches, roles.max_data_caches
                ),
            ));
        }
        Ok(())
    }
}
