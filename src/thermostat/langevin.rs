// SPDX-License-Identifier: AGPL-3.0-only

//! Langevin thermostat coefficients.
//!
//! Canonical (fixed-temperature) dynamics via an Ornstein-Uhlenbeck style
//! drag/noise pair. For friction γ, temperature T and timestep dt the
//! integrator-facing prefactors are
//!
//! ```text
//!   pref1 = -γ / dt                   (deterministic drag)
//!   pref2 = sqrt(24 T γ / dt)         (uniform-noise amplitude)
//! ```
//!
//! The factor 24 comes from scaling a zero-mean uniform draw (variance
//! 1/12) to the target noise variance 2 T γ / dt.
//!
//! Under multi-timestep integration a second `_small` pair is derived from
//! the smaller timestep. The rotational noise prefactor always uses the
//! primary timestep, independent of the multi-timestep branch.
//!
//! Correlated random sequences cool the system slightly on integrator
//! re-entry; [`LangevinScheme::heat_up`] temporarily amplifies the noise
//! prefactors by √3 to compensate and [`LangevinScheme::cool_down`]
//! restores the saved values.

use log::debug;

use crate::error::HeatbathError;
use crate::params::GlobalParameters;
use crate::thermostat::friction::{FrictionCoefficient, Gamma};

/// Noise amplification applied between `heat_up()` and `cool_down()`.
fn heat_up_factor() -> f64 {
    3.0_f64.sqrt()
}

/// Drag/noise pair for the smaller timestep of a multi-timestep run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmallStepPrefactors {
    /// Deterministic drag prefactor, `-γ / smaller_time_step`.
    pub pref1: Gamma,
    /// Noise prefactor, `sqrt(24 T γ / smaller_time_step)`.
    pub pref2: Gamma,
}

/// Saved noise prefactors; valid between a `heat_up()` and its matching
/// `cool_down()`. A second `heat_up()` overwrites the slot and the
/// original values are permanently lost.
#[derive(Clone, Copy, Debug)]
struct NoiseBuffer {
    pref2: Gamma,
    pref2_rotation: Gamma,
    pref2_small: Option<Gamma>,
}

/// Langevin thermostat: friction configuration and derived prefactors.
///
/// Prefactors are recomputed only by an explicit [`LangevinScheme::init`];
/// they go stale when temperature, timestep, or friction change until the
/// next init.
#[derive(Clone, Debug, Default)]
pub struct LangevinScheme {
    gamma: FrictionCoefficient,
    gamma_rotation: FrictionCoefficient,
    /// Apply the thermostat to translational degrees of freedom.
    pub translation_enabled: bool,
    /// Apply the thermostat to rotational degrees of freedom.
    pub rotation_enabled: bool,
    pref1: Gamma,
    pref2: Gamma,
    pref2_rotation: Gamma,
    small_step: Option<SmallStepPrefactors>,
    buffer: Option<NoiseBuffer>,
}

impl LangevinScheme {
    /// A scheme with both branches enabled and no friction configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            translation_enabled: true,
            rotation_enabled: true,
            ..Self::default()
        }
    }

    /// Set the translational friction coefficient.
    ///
    /// # Errors
    /// Returns `Err` if any component is negative or NaN.
    pub fn set_gamma(&mut self, gamma: FrictionCoefficient) -> Result<(), HeatbathError> {
        gamma.validate()?;
        self.gamma = gamma;
        Ok(())
    }

    /// Set the rotational friction coefficient. Leave `Unset` to inherit
    /// the translational value at the next `init()`.
    ///
    /// # Errors
    /// Returns `Err` if any component is negative or NaN.
    pub fn set_gamma_rotation(&mut self, gamma: FrictionCoefficient) -> Result<(), HeatbathError> {
        gamma.validate()?;
        self.gamma_rotation = gamma;
        Ok(())
    }

    /// Translational friction as configured.
    #[must_use]
    pub const fn gamma(&self) -> FrictionCoefficient {
        self.gamma
    }

    /// Rotational friction; `Unset` until explicitly set or inherited
    /// during `init()`.
    #[must_use]
    pub const fn gamma_rotation(&self) -> FrictionCoefficient {
        self.gamma_rotation
    }

    /// Deterministic drag prefactor `-γ / time_step`.
    #[must_use]
    pub const fn pref1(&self) -> Gamma {
        self.pref1
    }

    /// Noise prefactor `sqrt(24 T γ / time_step)`.
    #[must_use]
    pub const fn pref2(&self) -> Gamma {
        self.pref2
    }

    /// Rotational noise prefactor; always derived from the primary
    /// timestep.
    #[must_use]
    pub const fn pref2_rotation(&self) -> Gamma {
        self.pref2_rotation
    }

    /// Small-timestep prefactor pair; `Some` only while multi-timestep
    /// integration is configured.
    #[must_use]
    pub const fn small_step(&self) -> Option<SmallStepPrefactors> {
        self.small_step
    }

    /// Recompute all prefactors from the current parameters.
    ///
    /// An unset rotational friction permanently inherits the translational
    /// value here. An unset translational friction is treated as zero
    /// coupling (drag-free, noise-free) without being mutated.
    pub fn init(&mut self, params: &GlobalParameters) {
        let t = params.temperature();
        let dt = params.time_step();
        let gamma = self.gamma.value_or(Gamma::ZERO);

        self.pref1 = gamma.map(|g| -g / dt);
        self.pref2 = gamma.map(|g| (24.0 * t * g / dt).sqrt());

        self.small_step = if params.multi_timestep() {
            let dt_small = params.smaller_time_step();
            Some(SmallStepPrefactors {
                pref1: gamma.map(|g| -g / dt_small),
                pref2: gamma.map(|g| (24.0 * t * g / dt_small).sqrt()),
            })
        } else {
            None
        };

        // Rotational friction inherits the translational value when unset.
        let gamma_rotation = self.gamma_rotation.resolve(gamma);
        self.pref2_rotation = gamma_rotation.map(|g| (24.0 * t * g / dt).sqrt());

        debug!(
            "langevin init: pref1={:?} pref2={:?} pref2_rotation={:?} small_step={:?}",
            self.pref1, self.pref2, self.pref2_rotation, self.small_step
        );
    }

    /// Save the noise prefactors, then amplify each live value by √3.
    ///
    /// At most one unmatched `heat_up()` is supported: a second call before
    /// `cool_down()` overwrites the saved slot with the already-amplified
    /// values, and the originals are permanently lost.
    pub fn heat_up(&mut self) {
        self.buffer = Some(NoiseBuffer {
            pref2: self.pref2,
            pref2_rotation: self.pref2_rotation,
            pref2_small: self.small_step.map(|s| s.pref2),
        });
        let f = heat_up_factor();
        self.pref2 = self.pref2.scaled(f);
        self.pref2_rotation = self.pref2_rotation.scaled(f);
        if let Some(s) = &mut self.small_step {
            s.pref2 = s.pref2.scaled(f);
        }
    }

    /// Restore the noise prefactors saved by the matching `heat_up()`.
    ///
    /// Restoration is buffered, not recomputed, so it is bit-identical.
    /// Without a prior `heat_up()` the buffer is empty and this is a
    /// logged no-op.
    pub fn cool_down(&mut self) {
        let Some(buf) = self.buffer.take() else {
            debug!("langevin cool_down without matching heat_up; ignored");
            return;
        };
        self.pref2 = buf.pref2;
        self.pref2_rotation = buf.pref2_rotation;
        if let (Some(s), Some(p2)) = (&mut self.small_step, buf.pref2_small) {
            s.pref2 = p2;
        }
    }
}
