// SPDX-License-Identifier: AGPL-3.0-only

//! Simulation-wide thermostat control parameters.
//!
//! Temperature and timestep(s) shared by every scheme. In a distributed run
//! each process holds an identical copy and derives identical coefficients;
//! consistency comes from determinism of inputs, not communication. The
//! struct is serde-serializable so a driver can persist and replay the
//! exact parameter set of a run.
//!
//! Mutating any field does **not** invalidate previously derived
//! prefactors; callers must re-invoke `ThermostatRegistry::init()` after
//! any mutation. There is no dirty-bit tracking.

use serde::{Deserialize, Serialize};

use crate::error::HeatbathError;

/// Global thermostat inputs: temperature and integration timestep(s).
///
/// Fields are private so that every mutation path runs the boundary
/// validation; invalid values are rejected with [`HeatbathError`] instead
/// of silently yielding NaN coefficients downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameters {
    /// Target temperature (energy units), >= 0.
    temperature: f64,
    /// Primary integration timestep, > 0.
    time_step: f64,
    /// Optional smaller timestep for multi-timestep integration.
    /// Zero disables the multi-timestep branch.
    smaller_time_step: f64,
}

impl GlobalParameters {
    /// Create a validated parameter set with multi-timestep disabled.
    ///
    /// # Errors
    /// Returns `Err` if `temperature < 0` or `time_step <= 0`.
    pub fn new(temperature: f64, time_step: f64) -> Result<Self, HeatbathError> {
        if !(temperature >= 0.0) {
            return Err(HeatbathError::NegativeTemperature(temperature));
        }
        if !(time_step > 0.0) {
            return Err(HeatbathError::NonPositiveTimeStep(time_step));
        }
        Ok(Self {
            temperature,
            time_step,
            smaller_time_step: 0.0,
        })
    }

    /// Target temperature (energy units).
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Primary integration timestep.
    #[must_use]
    pub const fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Smaller multi-timestep value; 0 means disabled.
    #[must_use]
    pub const fn smaller_time_step(&self) -> f64 {
        self.smaller_time_step
    }

    /// Whether the multi-timestep branch is configured.
    #[must_use]
    pub fn multi_timestep(&self) -> bool {
        self.smaller_time_step > 0.0
    }

    /// Set the target temperature.
    ///
    /// # Errors
    /// Returns `Err` if `temperature < 0` (NaN is rejected too).
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), HeatbathError> {
        if !(temperature >= 0.0) {
            return Err(HeatbathError::NegativeTemperature(temperature));
        }
        self.temperature = temperature;
        Ok(())
    }

    /// Set the primary integration timestep.
    ///
    /// # Errors
    /// Returns `Err` if `time_step <= 0` (NaN is rejected too).
    pub fn set_time_step(&mut self, time_step: f64) -> Result<(), HeatbathError> {
        if !(time_step > 0.0) {
            return Err(HeatbathError::NonPositiveTimeStep(time_step));
        }
        self.time_step = time_step;
        Ok(())
    }

    /// Set the smaller multi-timestep value; 0 disables the branch.
    ///
    /// # Errors
    /// Returns `Err` if `smaller_time_step < 0` (NaN is rejected too).
    pub fn set_smaller_time_step(&mut self, smaller_time_step: f64) -> Result<(), HeatbathError> {
        if !(smaller_time_step >= 0.0) {
            return Err(HeatbathError::NegativeSmallerTimeStep(smaller_time_step));
        }
        self.smaller_time_step = smaller_time_step;
        Ok(())
    }
}
