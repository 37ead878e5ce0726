// SPDX-License-Identifier: AGPL-3.0-only

//! Friction coefficient representation: isotropic scalar, per-axis tensor,
//! or explicitly unset.
//!
//! The explicit unset state avoids reserving a negative magic value. An
//! unset coefficient is resolved during `init()` by the inheritance rule
//! (rotational friction inherits the translational value).
//!
//! [`Gamma`] is the resolved counterpart: always concrete, closed under the
//! component-wise maps used to derive drag and noise prefactors, so a
//! prefactor derived from a per-axis friction is itself per-axis.

use serde::{Deserialize, Serialize};

use crate::error::HeatbathError;

/// A friction coefficient as configured: scalar, per-axis, or not yet set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrictionCoefficient {
    /// Not explicitly configured; resolved during `init()` by inheritance.
    Unset,
    /// Isotropic drag strength.
    Scalar(f64),
    /// Anisotropic drag, one component per body axis.
    PerAxis([f64; 3]),
}

impl Default for FrictionCoefficient {
    fn default() -> Self {
        Self::Unset
    }
}

impl FrictionCoefficient {
    /// Check that every component is non-negative (NaN rejected).
    ///
    /// `Unset` passes: it carries no value yet.
    ///
    /// # Errors
    /// Returns `Err` with the first offending component.
    pub fn validate(&self) -> Result<(), HeatbathError> {
        match self {
            Self::Unset => Ok(()),
            Self::Scalar(g) => {
                if *g >= 0.0 {
                    Ok(())
                } else {
                    Err(HeatbathError::NegativeFriction(*g))
                }
            }
            Self::PerAxis(gs) => {
                for g in gs {
                    if !(*g >= 0.0) {
                        return Err(HeatbathError::NegativeFriction(*g));
                    }
                }
                Ok(())
            }
        }
    }

    /// Whether this coefficient still awaits resolution.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The concrete value, if one has been set.
    #[must_use]
    pub const fn value(&self) -> Option<Gamma> {
        match self {
            Self::Unset => None,
            Self::Scalar(g) => Some(Gamma::Scalar(*g)),
            Self::PerAxis(gs) => Some(Gamma::PerAxis(*gs)),
        }
    }

    /// The concrete value, or `fallback` if unset. Does not mutate.
    #[must_use]
    pub const fn value_or(&self, fallback: Gamma) -> Gamma {
        match self.value() {
            Some(g) => g,
            None => fallback,
        }
    }

    /// Resolve in place: an unset coefficient permanently inherits
    /// `fallback`. Returns the resolved value either way.
    pub fn resolve(&mut self, fallback: Gamma) -> Gamma {
        if self.is_unset() {
            *self = fallback.into();
        }
        // Resolved above, value() cannot be None here.
        self.value_or(fallback)
    }
}

impl From<Gamma> for FrictionCoefficient {
    fn from(g: Gamma) -> Self {
        match g {
            Gamma::Scalar(v) => Self::Scalar(v),
            Gamma::PerAxis(vs) => Self::PerAxis(vs),
        }
    }
}

/// A resolved friction-shaped value: scalar or per-axis.
///
/// Derived prefactors share the shape of the friction they came from, so
/// this type doubles as the prefactor representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Gamma {
    /// Isotropic value.
    Scalar(f64),
    /// One value per body axis.
    PerAxis([f64; 3]),
}

impl Gamma {
    /// Zero coupling (drag-free, noise-free).
    pub const ZERO: Self = Self::Scalar(0.0);

    /// Apply `f` to every component, preserving shape.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(g) => Self::Scalar(f(g)),
            Self::PerAxis([x, y, z]) => Self::PerAxis([f(x), f(y), f(z)]),
        }
    }

    /// Multiply every component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        self.map(|g| g * factor)
    }
}

impl Default for Gamma {
    fn default() -> Self {
        Self::ZERO
    }
}
