#![deny(clippy::all, clippy::pedantic)]
//! External-collaborator layer: parses the JSON setup file and the
//! initial-position table, and assembles a ready [`ReachEnv`].
//!
//! The setup file mirrors the reference experiment description: arm variant
//! name, timestep, sensorimotor delay depth, noise switch and coefficients,
//! target zone, and the cost/termination block. The position table is a
//! whitespace-separated list of `x y` rows; `#` starts a comment.

use anyhow::{bail, Context, Result};
use arm::{ArmParameters, ArmVariant, BoundPolicy, JointBounds, MuscleFilter, MusclesParameters};
use env::{CostConfig, ReachConfig, ReachEnv, TargetSpec, ToleranceMode};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct SetupConfig {
    /// Arm model variant name, resolved through the variant registry.
    #[serde(default = "default_arm")]
    pub arm: String,
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Sensorimotor delay depth in steps.
    #[serde(default = "default_delay")]
    pub delay: usize,
    /// Deterministic run: true disables actuation noise entirely.
    #[serde(default)]
    pub det: bool,
    #[serde(default = "default_knoise")]
    pub knoise: [f32; 6],
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub cost: CostSection,
    /// Optional override of the variant's joint limits.
    #[serde(default)]
    pub bounds: Option<BoundsSection>,
    #[serde(default)]
    pub bounds_policy: BoundsPolicySection,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            arm: default_arm(),
            dt: default_dt(),
            delay: default_delay(),
            det: false,
            knoise: default_knoise(),
            smoothing: default_smoothing(),
            max_speed: default_max_speed(),
            target: TargetSection::default(),
            cost: CostSection::default(),
            bounds: None,
            bounds_policy: BoundsPolicySection::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct TargetSection {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Default for TargetSection {
    fn default() -> Self {
        Self { x: 0.0, y: 0.55, size: 0.04 }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceSection {
    Lateral,
    Radial,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct CostSection {
    #[serde(default = "default_mode")]
    pub mode: ToleranceSection,
    #[serde(default = "default_effort_weight")]
    pub effort_weight: f32,
    #[serde(default = "default_success_reward")]
    pub success_reward: f32,
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    #[serde(default = "default_max_time")]
    pub max_time: f32,
}

impl Default for CostSection {
    fn default() -> Self {
        Self {
            mode: ToleranceSection::Lateral,
            effort_weight: default_effort_weight(),
            success_reward: default_success_reward(),
            time_scale: default_time_scale(),
            max_steps: default_max_steps(),
            max_time: default_max_time(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BoundsSection {
    pub lower: [f32; 2],
    pub upper: [f32; 2],
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicySection {
    #[default]
    Clamp,
    Reject,
}

fn default_arm() -> String {
    "arm26".to_string()
}
fn default_dt() -> f32 {
    0.01
}
fn default_delay() -> usize {
    3
}
fn default_knoise() -> [f32; 6] {
    [0.25; 6]
}
fn default_smoothing() -> f32 {
    0.5
}
fn default_max_speed() -> f32 {
    5.0
}
fn default_mode() -> ToleranceSection {
    ToleranceSection::Lateral
}
fn default_effort_weight() -> f32 {
    1e-4
}
fn default_success_reward() -> f32 {
    10.0
}
fn default_time_scale() -> f32 {
    0.5
}
fn default_max_steps() -> u32 {
    1000
}
fn default_max_time() -> f32 {
    10.0
}

impl SetupConfig {
    /// # Errors
    ///
    /// Returns a deserialization error for malformed JSON.
    pub fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading setup file {}", path.display()))?;
        Self::from_str(&text).with_context(|| format!("parsing setup file {}", path.display()))
    }
}

/// Parses an initial-position table: one `x y` pair per line, blank lines
/// and `#` comments skipped. A single-row table is valid.
///
/// # Errors
///
/// Fails on rows without exactly two numeric fields and on empty tables.
pub fn parse_position_table(text: &str) -> Result<Vec<[f32; 2]>> {
    let mut table = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            bail!("position table line {}: expected `x y`, got {line:?}", lineno + 1);
        }
        let x: f32 = fields[0]
            .parse()
            .with_context(|| format!("position table line {}", lineno + 1))?;
        let y: f32 = fields[1]
            .parse()
            .with_context(|| format!("position table line {}", lineno + 1))?;
        table.push([x, y]);
    }
    if table.is_empty() {
        bail!("position table holds no entries");
    }
    Ok(table)
}

/// # Errors
///
/// Fails when the file cannot be read or parsed.
pub fn load_position_table(path: &Path) -> Result<Vec<[f32; 2]>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading position table {}", path.display()))?;
    parse_position_table(&text)
        .with_context(|| format!("parsing position table {}", path.display()))
}

/// Assembles the environment: variant lookup by name, parameter overrides,
/// seeded muscle filter, loop configuration.
///
/// # Errors
///
/// Fails on unknown variant names and invalid physical parameters.
pub fn build_env(config: &SetupConfig, table: Vec<[f32; 2]>, seed: u64) -> Result<ReachEnv> {
    let mut arm_params = ArmParameters::default();
    if let Some(bounds) = config.bounds {
        arm_params.bounds = JointBounds { lower: bounds.lower, upper: bounds.upper };
    }
    arm_params.bound_policy = match config.bounds_policy {
        BoundsPolicySection::Clamp => BoundPolicy::Clamp,
        BoundsPolicySection::Reject => BoundPolicy::Reject,
    };
    let muscle_params = MusclesParameters {
        knoise: config.knoise,
        smoothing: config.smoothing,
        ..MusclesParameters::default()
    };

    let mut model = ArmVariant::build(&config.arm, arm_params, muscle_params)
        .with_context(|| format!("building arm variant {:?}", config.arm))?;
    model.set_noise(config.knoise);

    let filter = MuscleFilter::new(config.knoise, config.smoothing, !config.det, seed);
    let reach = ReachConfig {
        dt: config.dt,
        delay: config.delay,
        max_speed: config.max_speed,
        target: TargetSpec {
            x: config.target.x,
            y: config.target.y,
            size: config.target.size,
        },
        cost: CostConfig {
            mode: match config.cost.mode {
                ToleranceSection::Lateral => ToleranceMode::Lateral,
                ToleranceSection::Radial => ToleranceMode::Radial,
            },
            effort_weight: config.cost.effort_weight,
            success_reward: config.cost.success_reward,
            time_scale: config.cost.time_scale,
            max_steps: config.cost.max_steps,
            max_time: config.cost.max_time,
        },
    };
    Ok(ReachEnv::new(model, filter, table, reach))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_takes_reference_defaults() {
        let c = SetupConfig::from_str("{}").unwrap();
        assert_eq!(c.arm, "arm26");
        assert!((c.dt - 0.01).abs() < f32::EPSILON);
        assert_eq!(c.delay, 3);
        assert!(!c.det);
        assert_eq!(c.knoise, [0.25; 6]);
        assert!((c.target.y - 0.55).abs() < f32::EPSILON);
    }

    #[test]
    fn full_config_round_trips() {
        let c = SetupConfig::from_str(
            r#"{
                "arm": "arm26",
                "dt": 0.002,
                "delay": 10,
                "det": true,
                "knoise": [0.1, 0.1, 0.1, 0.1, 0.1, 0.1],
                "max_speed": 4.0,
                "target": { "x": 0.05, "y": 0.5, "size": 0.02 },
                "cost": { "mode": "radial", "max_steps": 200 },
                "bounds": { "lower": [-0.5, 0.0], "upper": [2.0, 2.5] },
                "bounds_policy": "reject"
            }"#,
        )
        .unwrap();
        assert!(c.det);
        assert_eq!(c.delay, 10);
        assert!(matches!(c.cost.mode, ToleranceSection::Radial));
        assert_eq!(c.cost.max_steps, 200);
        assert!((c.cost.max_time - 10.0).abs() < f32::EPSILON);
        assert!(matches!(c.bounds_policy, BoundsPolicySection::Reject));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(SetupConfig::from_str("{ \"dt\": \"fast\" }").is_err());
    }

    #[test]
    fn table_parses_rows_and_comments() {
        let table = parse_position_table("# start points\n0.3 0.35\n\n0.0  0.45\n").unwrap();
        assert_eq!(table, vec![[0.3, 0.35], [0.0, 0.45]]);
    }

    #[test]
    fn single_row_table_is_valid() {
        let table = parse_position_table("0.3 0.35").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn bad_table_rows_are_rejected() {
        assert!(parse_position_table("0.3").is_err());
        assert!(parse_position_table("0.3 x").is_err());
        assert!(parse_position_table("# only comments\n").is_err());
    }

    #[test]
    fn build_env_rejects_unknown_variants() {
        let mut c = SetupConfig::default();
        c.arm = "arm38".to_string();
        assert!(build_env(&c, vec![[0.3, 0.35]], 0).is_err());
    }

    #[test]
    fn built_env_runs_an_episode_step() {
        let c = SetupConfig::default();
        let mut env = build_env(&c, vec![[0.3, 0.35]], 1).unwrap();
        env.reset(0).unwrap();
        let out = env.step(&[0.5; 6]).unwrap();
        assert!(!out.done);
    }
}
