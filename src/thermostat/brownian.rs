// SPDX-License-Identifier: AGPL-3.0-only

//! Brownian (overdamped) thermostat coefficients.
//!
//! Brownian dynamics updates positions directly from noise, bypassing
//! explicit velocity integration, so the outputs here are dispersions
//! rather than drag/noise pairs. The integrator applies its own time
//! interval factor to the positional term later.
//!
//! The velocity dispersion is `sqrt(T)`; the translational variant carries
//! an extra `time_step` factor to match the dimensionless velocity
//! convention, and the rotational variant omits it. Integrators depend on
//! that asymmetry.

use log::debug;

use crate::error::HeatbathError;
use crate::params::GlobalParameters;
use crate::thermostat::friction::{FrictionCoefficient, Gamma};

/// Inverse positional dispersion `sqrt(γ / 2T)`.
///
/// At `T == 0` positional diffusion vanishes and the inverse dispersion
/// diverges; that limit is an explicit variant instead of a NaN from a
/// silent division by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionSigmaInverse {
    /// Finite inverse dispersion, component-wise `sqrt(γ / 2T)`.
    Finite(Gamma),
    /// Zero-temperature limit: no positional diffusion at all.
    InfiniteStiffness,
}

impl PositionSigmaInverse {
    /// The finite value, if any.
    #[must_use]
    pub const fn finite(&self) -> Option<Gamma> {
        match self {
            Self::Finite(g) => Some(*g),
            Self::InfiniteStiffness => None,
        }
    }

    /// Whether this is the zero-temperature limit.
    #[must_use]
    pub const fn is_infinite_stiffness(&self) -> bool {
        matches!(self, Self::InfiniteStiffness)
    }
}

/// Brownian thermostat: friction configuration and derived dispersions.
#[derive(Clone, Debug)]
pub struct BrownianScheme {
    gamma: FrictionCoefficient,
    gamma_rotation: FrictionCoefficient,
    sigma_velocity: f64,
    sigma_velocity_rotation: f64,
    sigma_position_inverse: PositionSigmaInverse,
    sigma_position_rotation_inverse: PositionSigmaInverse,
}

impl Default for BrownianScheme {
    fn default() -> Self {
        Self {
            gamma: FrictionCoefficient::Unset,
            gamma_rotation: FrictionCoefficient::Unset,
            sigma_velocity: 0.0,
            sigma_velocity_rotation: 0.0,
            sigma_position_inverse: PositionSigmaInverse::Finite(Gamma::ZERO),
            sigma_position_rotation_inverse: PositionSigmaInverse::Finite(Gamma::ZERO),
        }
    }
}

impl BrownianScheme {
    /// A scheme with no friction configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Rotational friction; `Unset` until explicitly set or inherited.
    #[must_use]
    pub const fn gamma_rotation(&self) -> FrictionCoefficient {
        self.gamma_rotation
    }

    /// Translational velocity dispersion `sqrt(T) * time_step`.
    #[must_use]
    pub const fn sigma_velocity(&self) -> f64 {
        self.sigma_velocity
    }

    /// Rotational velocity dispersion `sqrt(T)` (no timestep factor).
    #[must_use]
    pub const fn sigma_velocity_rotation(&self) -> f64 {
        self.sigma_velocity_rotation
    }

    /// Inverse translational positional dispersion.
    #[must_use]
    pub const fn sigma_position_inverse(&self) -> PositionSigmaInverse {
        self.sigma_position_inverse
    }

    /// Inverse rotational positional dispersion.
    #[must_use]
    pub const fn sigma_position_rotation_inverse(&self) -> PositionSigmaInverse {
        self.sigma_position_rotation_inverse
    }

    /// Recompute all dispersions from the current parameters.
    ///
    /// Both positional inverse dispersions are derived from the
    /// translational friction; the rotational friction is resolved by
    /// inheritance here but enters only through the integrator's viscous
    /// terms.
    pub fn init(&mut self, params: &GlobalParameters) {
        let t = params.temperature();
        let gamma = self.gamma.value_or(Gamma::ZERO);

        self.sigma_velocity = t.sqrt() * params.time_step();
        self.sigma_velocity_rotation = t.sqrt();
        self.gamma_rotation.resolve(gamma);

        let position_inverse = if t > 0.0 {
            PositionSigmaInverse::Finite(gamma.map(|g| (g / (2.0 * t)).sqrt()))
        } else {
            PositionSigmaInverse::InfiniteStiffness
        };
        self.sigma_position_inverse = position_inverse;
        self.sigma_position_rotation_inverse = position_inverse;

        debug!(
            "brownian init: sigma_velocity={} sigma_velocity_rotation={} sigma_position_inverse={:?}",
            self.sigma_velocity, self.sigma_velocity_rotation, self.sigma_position_inverse
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerances::EXACT_F64;

    fn params(t: f64, dt: f64) -> GlobalParameters {
        GlobalParameters::new(t, dt).expect("valid params")
    }

    #[test]
    fn velocity_dispersions_asymmetric_in_timestep() {
        let mut scheme = BrownianScheme::new();
        scheme.set_gamma(FrictionCoefficient::Scalar(1.0)).expect("valid");
        scheme.init(&params(4.0, 0.01));

        // Translational carries the timestep factor, rotational does not.
        assert!((scheme.sigma_velocity() - 2.0 * 0.01).abs() < EXACT_F64);
        assert!((scheme.sigma_velocity_rotation() - 2.0).abs() < EXACT_F64);
    }

    #[test]
    fn position_inverse_dispersion_finite_case() {
        let mut scheme = BrownianScheme::new();
        scheme.set_gamma(FrictionCoefficient::Scalar(3.0)).expect("valid");
        scheme.init(&params(1.5, 0.01));

        let g = scheme
            .sigma_position_inverse()
            .finite()
            .expect("T > 0 gives a finite dispersion");
        let expected = (3.0f64 / (2.0 * 1.5)).sqrt();
        assert_eq!(g, Gamma::Scalar(1.0));
        assert!((expected - 1.0).abs() < EXACT_F64);
    }

    #[test]
    fn zero_temperature_yields_infinite_stiffness() {
        let mut scheme = BrownianScheme::new();
        scheme.set_gamma(FrictionCoefficient::Scalar(1.0)).expect("valid");
        scheme.init(&params(0.0, 0.01));

        assert!(scheme.sigma_position_inverse().is_infinite_stiffness());
        assert!(scheme.sigma_position_rotation_inverse().is_infinite_stiffness());
        // Velocity dispersions degrade gracefully to zero, not NaN.
        assert!((scheme.sigma_velocity() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rotation_inherits_translation_when_unset() {
        let mut scheme = BrownianScheme::new();
        scheme
            .set_gamma(FrictionCoefficient::PerAxis([1.0, 2.0, 3.0]))
            .expect("valid");
        scheme.init(&params(1.0, 0.01));
        assert_eq!(
            scheme.gamma_rotation(),
            FrictionCoefficient::PerAxis([1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn rotational_position_inverse_uses_translational_friction() {
        let mut scheme = BrownianScheme::new();
        scheme.set_gamma(FrictionCoefficient::Scalar(2.0)).expect("valid");
        scheme
            .set_gamma_rotation(FrictionCoefficient::Scalar(8.0))
            .expect("valid");
        scheme.init(&params(1.0, 0.01));

        // Both positional dispersions derive from the translational γ=2.
        let expected = (2.0 / 2.0_f64).sqrt();
        let rot = scheme
            .sigma_position_rotation_inverse()
            .finite()
            .expect("finite");
        assert_eq!(rot, Gamma::Scalar(expected));
        assert_eq!(scheme.sigma_position_inverse().finite(), Some(rot));
    }

    #[test]
    fn per_axis_friction_gives_per_axis_dispersion() {
        let mut scheme = BrownianScheme::new();
        scheme
            .set_gamma(FrictionCoefficient::PerAxis([2.0, 8.0, 18.0]))
            .expect("valid");
        scheme.init(&params(1.0, 0.01));

        let Some(Gamma::PerAxis(inv)) = scheme.sigma_position_inverse().finite() else {
            panic!("expected per-axis dispersion");
        };
        assert!((inv[0] - 1.0).abs() < EXACT_F64);
        assert!((inv[1] - 2.0).abs() < EXACT_F64);
        assert!((inv[2] - 3.0).abs() < EXACT_F64);
    }
}
