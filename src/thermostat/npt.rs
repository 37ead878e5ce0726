// SPDX-License-Identifier: AGPL-3.0-only

//! Isotropic NPT (constant-pressure) thermostat coefficients.
//!
//! The simulation box volume is an additional dynamical degree of freedom
//! driven by a piston with its own friction/noise coupling. Particle
//! degrees of freedom couple through `gamma0` (pref1/pref2), the piston
//! through `gammav` (pref3/pref4).
//!
//! With a smaller multi-timestep configured, only the outer multiplier of
//! pref2 switches to the smaller timestep while its square-root argument
//! keeps the primary one, and pref1/pref3/pref4 do not switch at all.
//! Integrators depend on this exact asymmetric scaling; do not fold the
//! two multipliers together.

use log::debug;

use crate::error::HeatbathError;
use crate::params::GlobalParameters;

/// Piston state owned by the pressure-coupling collaborator.
///
/// A piston mass of zero means the box volume cannot move; the NPT scheme
/// self-deactivates during `init()` in that case rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PistonState {
    mass: f64,
    decoupled: bool,
}

impl PistonState {
    /// Piston with the given mass, coupled.
    ///
    /// # Errors
    /// Returns `Err` if `mass < 0` or NaN. Zero is accepted and handled by
    /// scheme self-deactivation.
    pub fn with_mass(mass: f64) -> Result<Self, HeatbathError> {
        if !(mass >= 0.0) {
            return Err(HeatbathError::NegativePistonMass(mass));
        }
        Ok(Self {
            mass,
            decoupled: false,
        })
    }

    /// Piston mass.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the piston mass.
    ///
    /// # Errors
    /// Returns `Err` if `mass < 0` or NaN.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), HeatbathError> {
        if !(mass >= 0.0) {
            return Err(HeatbathError::NegativePistonMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Switch pressure coupling off without losing the mass.
    pub fn decouple(&mut self) {
        self.decoupled = true;
    }

    /// Switch pressure coupling back on.
    pub fn couple(&mut self) {
        self.decoupled = false;
    }

    /// Whether box-volume dynamics can run: coupled and mass > 0.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.decoupled && self.mass > 0.0
    }
}

/// Isotropic NPT thermostat: particle and piston friction coefficients
/// plus the four derived prefactors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NptIsotropicScheme {
    gamma0: f64,
    gammav: f64,
    pref1: f64,
    pref2: f64,
    pref3: f64,
    pref4: f64,
}

impl NptIsotropicScheme {
    /// A scheme with zero couplings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the particle friction coefficient.
    ///
    /// # Errors
    /// Returns `Err` if `gamma0 < 0` or NaN.
    pub fn set_gamma0(&mut self, gamma0: f64) -> Result<(), HeatbathError> {
        if !(gamma0 >= 0.0) {
            return Err(HeatbathError::NegativeFriction(gamma0));
        }
        self.gamma0 = gamma0;
        Ok(())
    }

    /// Set the piston friction coefficient.
    ///
    /// # Errors
    /// Returns `Err` if `gammav < 0` or NaN.
    pub fn set_gammav(&mut self, gammav: f64) -> Result<(), HeatbathError> {
        if !(gammav >= 0.0) {
            return Err(HeatbathError::NegativeFriction(gammav));
        }
        self.gammav = gammav;
        Ok(())
    }

    /// Particle friction coefficient.
    #[must_use]
    pub const fn gamma0(&self) -> f64 {
        self.gamma0
    }

    /// Piston friction coefficient.
    #[must_use]
    pub const fn gammav(&self) -> f64 {
        self.gammav
    }

    /// Particle drag prefactor `-gamma0 * 0.5 * time_step`.
    #[must_use]
    pub const fn pref1(&self) -> f64 {
        self.pref1
    }

    /// Particle noise prefactor
    /// `sqrt(12 T gamma0 time_step) * m`, where `m` is the smaller
    /// timestep when configured and the primary one otherwise.
    #[must_use]
    pub const fn pref2(&self) -> f64 {
        self.pref2
    }

    /// Piston drag prefactor `-gammav / piston_mass * 0.5 * time_step`.
    #[must_use]
    pub const fn pref3(&self) -> f64 {
        self.pref3
    }

    /// Piston noise prefactor `sqrt(12 T gammav time_step)`.
    #[must_use]
    pub const fn pref4(&self) -> f64 {
        self.pref4
    }

    /// Recompute the four prefactors from the current parameters.
    ///
    /// Returns `false` when the piston cannot move (mass 0 or decoupled);
    /// the registry clears the scheme tag in that case. This is a
    /// self-correcting transition, not a failure.
    pub fn init(&mut self, params: &GlobalParameters, piston: &PistonState) -> bool {
        if !piston.is_ready() {
            debug!(
                "npt isotropic init: piston not ready (mass={}), scheme deactivates",
                piston.mass()
            );
            return false;
        }

        let t = params.temperature();
        let dt = params.time_step();
        let outer = if params.multi_timestep() {
            params.smaller_time_step()
        } else {
            dt
        };

        self.pref1 = -self.gamma0 * 0.5 * dt;
        self.pref2 = (12.0 * t * self.gamma0 * dt).sqrt() * outer;
        self.pref3 = -self.gammav / piston.mass() * 0.5 * dt;
        self.pref4 = (12.0 * t * self.gammav * dt).sqrt();

        debug!(
            "npt isotropic init: pref1={} pref2={} pref3={} pref4={}",
            self.pref1, self.pref2, self.pref3, self.pref4
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerances::EXACT_F64;

    fn params(t: f64, dt: f64) -> GlobalParameters {
        GlobalParameters::new(t, dt).expect("valid params")
    }

    fn piston(mass: f64) -> PistonState {
        PistonState::with_mass(mass).expect("valid piston")
    }

    #[test]
    fn prefactors_reference_values() {
        let mut scheme = NptIsotropicScheme::new();
        scheme.set_gamma0(1.0).expect("valid");
        scheme.set_gammav(2.0).expect("valid");
        assert!(scheme.init(&params(1.0, 0.01), &piston(4.0)));

        assert!((scheme.pref1() - (-0.005)).abs() < EXACT_F64);
        let expected2 = (12.0 * 0.01_f64).sqrt() * 0.01;
        assert!((scheme.pref2() - expected2).abs() < EXACT_F64);
        assert!((scheme.pref3() - (-2.0 / 4.0 * 0.5 * 0.01)).abs() < EXACT_F64);
        assert!((scheme.pref4() - (12.0 * 2.0 * 0.01_f64).sqrt()).abs() < EXACT_F64);
    }

    #[test]
    fn pref2_outer_multiplier_switches_to_smaller_timestep() {
        let mut p = params(1.0, 0.01);
        p.set_smaller_time_step(0.005).expect("valid");
        let mut scheme = NptIsotropicScheme::new();
        scheme.set_gamma0(1.0).expect("valid");
        scheme.set_gammav(1.0).expect("valid");
        assert!(scheme.init(&p, &piston(1.0)));

        // Only the outer multiplier switches; the sqrt argument and the
        // other three prefactors keep the primary timestep.
        let expected2 = (12.0 * 0.01_f64).sqrt() * 0.005;
        assert!((scheme.pref2() - expected2).abs() < EXACT_F64);
        assert!((scheme.pref1() - (-0.005)).abs() < EXACT_F64);
        assert!((scheme.pref4() - (12.0 * 0.01_f64).sqrt()).abs() < EXACT_F64);
    }

    #[test]
    fn zero_piston_mass_deactivates() {
        let mut scheme = NptIsotropicScheme::new();
        scheme.set_gamma0(1.0).expect("valid");
        assert!(!scheme.init(&params(1.0, 0.01), &piston(0.0)));
    }

    #[test]
    fn decoupled_piston_deactivates() {
        let mut p = piston(3.0);
        p.decouple();
        let mut scheme = NptIsotropicScheme::new();
        assert!(!scheme.init(&params(1.0, 0.01), &p));
        p.couple();
        assert!(scheme.init(&params(1.0, 0.01), &p));
    }

    #[test]
    fn negative_couplings_rejected() {
        let mut scheme = NptIsotropicScheme::new();
        assert_eq!(
            scheme.set_gamma0(-1.0),
            Err(HeatbathError::NegativeFriction(-1.0))
        );
        assert_eq!(
            scheme.set_gammav(-0.5),
            Err(HeatbathError::NegativeFriction(-0.5))
        );
        assert_eq!(
            PistonState::with_mass(-1.0),
            Err(HeatbathError::NegativePistonMass(-1.0))
        );
    }
}
