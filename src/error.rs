// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for thermostat configuration.
//!
//! All numeric preconditions (temperature, timesteps, friction strengths,
//! piston mass) are checked at the boundary where users set parameters, so
//! coefficient computation downstream only ever sees validated values and
//! never produces NaN prefactors from bad input. Callers can pattern-match
//! on the failure mode rather than parsing opaque strings.

use std::fmt;

/// Errors arising from thermostat parameter configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatbathError {
    /// Temperature must be non-negative (energy units).
    NegativeTemperature(f64),

    /// The primary integration timestep must be strictly positive.
    NonPositiveTimeStep(f64),

    /// The smaller (multi-timestep) timestep must be non-negative;
    /// zero disables the multi-timestep branch.
    NegativeSmallerTimeStep(f64),

    /// A friction coefficient (or one of its per-axis components)
    /// must be non-negative. Carries the offending component value.
    NegativeFriction(f64),

    /// The NPT piston mass must be non-negative. Zero is accepted here
    /// and handled by scheme self-deactivation during `init()`.
    NegativePistonMass(f64),
}

impl fmt::Display for HeatbathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTemperature(t) => {
                write!(f, "temperature must be >= 0, got {t}")
            }
            Self::NonPositiveTimeStep(dt) => {
                write!(f, "time step must be > 0, got {dt}")
            }
            Self::NegativeSmallerTimeStep(dt) => {
                write!(f, "smaller time step must be >= 0 (0 disables), got {dt}")
            }
            Self::NegativeFriction(g) => {
                write!(f, "friction coefficient must be >= 0, got component {g}")
            }
            Self::NegativePistonMass(m) => {
                write!(f, "piston mass must be >= 0, got {m}")
            }
        }
    }
}

impl std::error::Error for HeatbathError {}
