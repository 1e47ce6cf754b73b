//! Tuning constants, loaded from TOML the way the rest of this crate's
//! ancestry loads game settings — see `Settings` in the original game
//! crate's `game.rs`, minus the asset-hot-reload wiring that belongs to the
//! rendering layer this crate has no business depending on.

use serde::Deserialize;

use crate::error::CoreError;

/// Height of a goal cylinder above its base, in world units.
pub const GOAL_HEIGHT: f32 = 2.0;
/// Height of a jump cylinder above its base, in world units.
pub const JUMP_HEIGHT: f32 = 2.0;
/// Height of a switch cylinder above its base, in world units.
pub const SWCH_HEIGHT: f32 = 2.0;
/// Sentinel item type meaning "already taken".
pub const ITEM_NONE: i32 = -1;
/// Lump flag marking a non-solid (collision-skipped) lump.
pub const L_DETAIL: u32 = 1 << 0;

/// "No contact" sentinel time returned by the sweep functions in `sweep.rs`.
pub const LARGE: f32 = 1e5;
/// Lower bound below which a quantity is treated as zero by the sweeps.
pub const SMALL: f32 = 1e-3;

/// Tuning constants for the integrator and bounce resolution (spec.md §6).
///
/// Always passed explicitly; there is no process-wide singleton (spec.md
/// §9, "Global state: None").
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Restitution coefficient `kappa` used in `sol_bounce` (spec.md §4.E).
    /// Intentionally sub-elastic; do not "correct" to the nominal elastic
    /// value of 2.0.
    pub restitution: f32,
    /// Friction-probe contact-time threshold, in seconds (spec.md §4.E step 1).
    pub friction_probe_threshold: f32,
    /// Cosine of the maximum angle between a contact normal and gravity for
    /// the contact to be treated as "flat" for rolling friction.
    pub rest_alignment_cos: f32,
    /// Hard cap on collision-resolution iterations per `step` call.
    pub iteration_cap: u32,
    /// Pendulum bob mass (spec.md §4.F).
    pub pendulum_mass: f32,
    /// Pendulum linear coupling coefficient `k_a`.
    pub pendulum_k_a: f32,
    /// Pendulum angular damping coefficient `k_d`.
    pub pendulum_k_d: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restitution: 1.7,
            friction_probe_threshold: 0.0005,
            rest_alignment_cos: 0.999,
            iteration_cap: 16,
            pendulum_mass: 5.0,
            pendulum_k_a: 0.5,
            pendulum_k_d: 0.995,
        }
    }
}

impl Config {
    /// Parses a config from a TOML document. Missing fields fall back to
    /// [`Config::default`].
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a config file from disk.
    pub fn from_file(path: &std::path::Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let c = Config::default();
        assert_eq!(c.restitution, 1.7);
        assert_eq!(c.friction_probe_threshold, 0.0005);
        assert_eq!(c.rest_alignment_cos, 0.999);
        assert_eq!(c.iteration_cap, 16);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let c = Config::from_toml_str("restitution = 1.9\n").unwrap();
        assert_eq!(c.restitution, 1.9);
        assert_eq!(c.iteration_cap, 16);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("not valid [[[ toml").is_err());
    }
}
