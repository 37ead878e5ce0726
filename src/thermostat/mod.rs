// SPDX-License-Identifier: AGPL-3.0-only

//! Thermostat coefficient engine.
//!
//! Turns macroscopic control parameters (temperature, timestep(s),
//! per-scheme friction coefficients) into the deterministic and stochastic
//! prefactors the time integrator applies every step.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `friction` | scalar / per-axis friction values with an explicit unset state |
//! | `langevin` | canonical dynamics drag/noise pair, heat-up protocol |
//! | `brownian` | overdamped positional/velocity dispersions |
//! | `npt` | isotropic constant-pressure piston coupling |
//! | `external` | dispatch contract for GHMC / DPD collaborators |
//! | `registry` | active-scheme set and ordered dispatch |

pub mod brownian;
pub mod external;
pub mod friction;
pub mod langevin;
pub mod npt;
pub mod registry;

use serde::{Deserialize, Serialize};

/// Tag identifying one of the combinable thermostat schemes.
///
/// Replaces the legacy bitmask switch; membership in the registry's active
/// set is mutated only by `enable`/`disable` or by a scheme deactivating
/// itself (NPT with an immovable piston).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeTag {
    /// Langevin drag/noise thermostat.
    Langevin,
    /// Dissipative particle dynamics (external collaborator).
    Dpd,
    /// Isotropic constant-pressure piston coupling.
    NptIsotropic,
    /// Generalized hybrid Monte Carlo (external collaborator).
    Ghmc,
    /// Overdamped Brownian dynamics.
    Brownian,
}

/// Fixed dispatch order for registry operations.
///
/// The schemes are numerically independent, so the order has no effect on
/// the coefficients; it is fixed purely for reproducible diagnostics.
pub const DISPATCH_ORDER: [SchemeTag; 5] = [
    SchemeTag::Langevin,
    SchemeTag::Dpd,
    SchemeTag::NptIsotropic,
    SchemeTag::Ghmc,
    SchemeTag::Brownian,
];
