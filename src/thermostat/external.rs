// SPDX-License-Identifier: AGPL-3.0-only

//! Dispatch contract for externally owned thermostat schemes (GHMC, DPD).
//!
//! These schemes keep their own coefficient state; this crate only
//! guarantees that each registered collaborator is called exactly once per
//! corresponding registry operation, in the registry's fixed dispatch
//! order, and only while its tag is active. Their internals are opaque
//! here.

use crate::params::GlobalParameters;

/// Hooks an external scheme exposes to the registry dispatch.
///
/// `heat_up`/`cool_down` default to no-ops for schemes that do not take
/// part in the correlated-noise correction protocol.
pub trait ExternalScheme {
    /// Recompute the scheme's coefficients from the global parameters.
    fn init(&mut self, params: &GlobalParameters);

    /// Temporarily amplify noise amplitudes around integrator re-entry.
    fn heat_up(&mut self) {}

    /// Restore the amplitudes saved by the matching `heat_up()`.
    fn cool_down(&mut self) {}
}
