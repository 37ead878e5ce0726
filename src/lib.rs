// SPDX-License-Identifier: AGPL-3.0-only

//! heatbath — thermostat coefficient engine for molecular dynamics.
//!
//! Turns macroscopic control parameters (temperature, integration
//! timestep(s), per-scheme friction coefficients) into the deterministic
//! and stochastic prefactors a time integrator applies every step to
//! realize a chosen statistical ensemble: canonical dynamics via Langevin
//! or Brownian noise, isotropic constant-pressure dynamics via a piston
//! variable, and a dispatch contract for hybrid Monte-Carlo (GHMC) and
//! DPD collaborators.
//!
//! The crate is purely computational: it does not integrate forces, store
//! particles, or draw random numbers. The integrator reads the derived
//! prefactors each step; configuration happens through validated setters
//! on [`ThermostatRegistry`] and the scheme structs it owns.
//!
//! ## Modules
//!   - `params` — shared temperature / timestep controls
//!   - `thermostat` — friction types, the four scheme modules, registry
//!   - `error` — typed configuration errors
//!   - `tolerances` — documented comparison constants for tests
//!
//! ## Example
//!
//! ```
//! use heatbath::{FrictionCoefficient, GlobalParameters, SchemeTag, ThermostatRegistry};
//!
//! let params = GlobalParameters::new(1.0, 0.01)?;
//! let mut reg = ThermostatRegistry::new(params);
//! reg.langevin.set_gamma(FrictionCoefficient::Scalar(1.0))?;
//! reg.enable(SchemeTag::Langevin);
//! reg.init();
//!
//! // Drag prefactor -gamma / dt = -100.
//! assert_eq!(reg.langevin.pref1(), heatbath::Gamma::Scalar(-100.0));
//! # Ok::<(), heatbath::HeatbathError>(())
//! ```

pub mod error;
pub mod params;
pub mod thermostat;
pub mod tolerances;

pub use error::HeatbathError;
pub use params::GlobalParameters;
pub use thermostat::brownian::{BrownianScheme, PositionSigmaInverse};
pub use thermostat::external::ExternalScheme;
pub use thermostat::friction::{FrictionCoefficient, Gamma};
pub use thermostat::langevin::{LangevinScheme, SmallStepPrefactors};
pub use thermostat::npt::{NptIsotropicScheme, PistonState};
pub use thermostat::registry::ThermostatRegistry;
pub use thermostat::{SchemeTag, DISPATCH_ORDER};
