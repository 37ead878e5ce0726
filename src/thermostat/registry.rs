// SPDX-License-Identifier: AGPL-3.0-only

//! Process-wide thermostat state and ordered dispatch.
//!
//! The registry owns the global parameters, the active-scheme set, the
//! built-in schemes (Langevin, Brownian, isotropic NPT) and optional
//! registration slots for the external GHMC/DPD collaborators. It is an
//! explicit context object owned by the simulation session and passed by
//! reference into the integrator each step; there is no hidden global.
//!
//! `init()` dispatches once per active scheme in the fixed order
//! Langevin, DPD, NPT, GHMC, Brownian. Mutating temperature, timestep, or
//! a friction coefficient does **not** implicitly recompute anything;
//! callers must re-invoke `init()` afterwards. `heat_up()`/`cool_down()`
//! must be paired by the caller; there is no reentrancy guard.

use std::collections::HashSet;

use log::debug;

use crate::error::HeatbathError;
use crate::params::GlobalParameters;
use crate::thermostat::brownian::BrownianScheme;
use crate::thermostat::external::ExternalScheme;
use crate::thermostat::langevin::LangevinScheme;
use crate::thermostat::npt::{NptIsotropicScheme, PistonState};
use crate::thermostat::SchemeTag;

/// Session-owned thermostat registry.
pub struct ThermostatRegistry {
    params: GlobalParameters,
    active: HashSet<SchemeTag>,
    /// Langevin thermostat state and prefactors.
    pub langevin: LangevinScheme,
    /// Brownian thermostat state and dispersions.
    pub brownian: BrownianScheme,
    /// Isotropic NPT thermostat state and prefactors.
    pub npt: NptIsotropicScheme,
    /// Piston state from the pressure-coupling collaborator.
    pub piston: PistonState,
    ghmc: Option<Box<dyn ExternalScheme>>,
    dpd: Option<Box<dyn ExternalScheme>>,
}

impl ThermostatRegistry {
    /// A registry with no active schemes.
    #[must_use]
    pub fn new(params: GlobalParameters) -> Self {
        Self {
            params,
            active: HashSet::new(),
            langevin: LangevinScheme::new(),
            brownian: BrownianScheme::new(),
            npt: NptIsotropicScheme::new(),
            piston: PistonState::default(),
            ghmc: None,
            dpd: None,
        }
    }

    /// The shared global parameters.
    #[must_use]
    pub const fn params(&self) -> &GlobalParameters {
        &self.params
    }

    /// Set the target temperature. Prefactors stay stale until the next
    /// `init()`.
    ///
    /// # Errors
    /// Returns `Err` if `temperature < 0`.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), HeatbathError> {
        self.params.set_temperature(temperature)
    }

    /// Set the primary timestep. Prefactors stay stale until the next
    /// `init()`.
    ///
    /// # Errors
    /// Returns `Err` if `time_step <= 0`.
    pub fn set_time_step(&mut self, time_step: f64) -> Result<(), HeatbathError> {
        self.params.set_time_step(time_step)
    }

    /// Set the smaller multi-timestep value; 0 disables the branch.
    ///
    /// # Errors
    /// Returns `Err` if `smaller_time_step < 0`.
    pub fn set_smaller_time_step(&mut self, smaller_time_step: f64) -> Result<(), HeatbathError> {
        self.params.set_smaller_time_step(smaller_time_step)
    }

    /// Register the GHMC collaborator for dispatch.
    pub fn register_ghmc(&mut self, scheme: Box<dyn ExternalScheme>) {
        self.ghmc = Some(scheme);
    }

    /// Register the DPD collaborator for dispatch.
    pub fn register_dpd(&mut self, scheme: Box<dyn ExternalScheme>) {
        self.dpd = Some(scheme);
    }

    /// Add a scheme tag to the active set.
    pub fn enable(&mut self, tag: SchemeTag) {
        self.active.insert(tag);
    }

    /// Remove a scheme tag from the active set.
    pub fn disable(&mut self, tag: SchemeTag) {
        self.active.remove(&tag);
    }

    /// Whether a scheme is currently enforced.
    #[must_use]
    pub fn is_active(&self, tag: SchemeTag) -> bool {
        self.active.contains(&tag)
    }

    /// Recompute coefficients for every active scheme, once each, in the
    /// fixed order Langevin, DPD, NPT, GHMC, Brownian.
    ///
    /// A no-op when no scheme is active. NPT clears its own tag when the
    /// piston cannot move (mass 0 or decoupled); this is a state
    /// transition, not a failure, so `init()` cannot fail.
    pub fn init(&mut self) {
        if self.active.is_empty() {
            return;
        }
        debug!("thermostat init: active={:?}", self.active);

        if self.is_active(SchemeTag::Langevin) {
            self.langevin.init(&self.params);
        }
        if self.is_active(SchemeTag::Dpd) {
            if let Some(dpd) = &mut self.dpd {
                dpd.init(&self.params);
            }
        }
        if self.is_active(SchemeTag::NptIsotropic) && !self.npt.init(&self.params, &self.piston) {
            self.active.remove(&SchemeTag::NptIsotropic);
            debug!("thermostat init: npt isotropic switched itself off");
        }
        if self.is_active(SchemeTag::Ghmc) {
            if let Some(ghmc) = &mut self.ghmc {
                ghmc.init(&self.params);
            }
        }
        if self.is_active(SchemeTag::Brownian) {
            self.brownian.init(&self.params);
        }
    }

    /// Amplify noise prefactors of every active, heat-capable scheme
    /// (Langevin, DPD, GHMC, in dispatch order) to counter the cooling
    /// artifact of correlated random sequences on integrator re-entry.
    pub fn heat_up(&mut self) {
        if self.is_active(SchemeTag::Langevin) {
            self.langevin.heat_up();
        }
        if self.is_active(SchemeTag::Dpd) {
            if let Some(dpd) = &mut self.dpd {
                dpd.heat_up();
            }
        }
        if self.is_active(SchemeTag::Ghmc) {
            if let Some(ghmc) = &mut self.ghmc {
                ghmc.heat_up();
            }
        }
    }

    /// Exact inverse of `heat_up()` via buffered restoration.
    pub fn cool_down(&mut self) {
        if self.is_active(SchemeTag::Langevin) {
            self.langevin.cool_down();
        }
        if self.is_active(SchemeTag::Dpd) {
            if let Some(dpd) = &mut self.dpd {
                dpd.cool_down();
            }
        }
        if self.is_active(SchemeTag::Ghmc) {
            if let Some(ghmc) = &mut self.ghmc {
                ghmc.cool_down();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermostat::friction::FrictionCoefficient;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn registry(t: f64, dt: f64) -> ThermostatRegistry {
        ThermostatRegistry::new(GlobalParameters::new(t, dt).expect("valid params"))
    }

    /// Records every dispatched call into a shared log for order checks.
    struct Recorder {
        name: &'static str,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ExternalScheme for Recorder {
        fn init(&mut self, _params: &GlobalParameters) {
            self.calls.borrow_mut().push(format!("{}:init", self.name));
        }
        fn heat_up(&mut self) {
            self.calls.borrow_mut().push(format!("{}:heat", self.name));
        }
        fn cool_down(&mut self) {
            self.calls.borrow_mut().push(format!("{}:cool", self.name));
        }
    }

    #[test]
    fn enable_disable_is_active() {
        let mut reg = registry(1.0, 0.01);
        assert!(!reg.is_active(SchemeTag::Langevin));
        reg.enable(SchemeTag::Langevin);
        reg.enable(SchemeTag::Brownian);
        assert!(reg.is_active(SchemeTag::Langevin));
        assert!(reg.is_active(SchemeTag::Brownian));
        reg.disable(SchemeTag::Langevin);
        assert!(!reg.is_active(SchemeTag::Langevin));
        assert!(reg.is_active(SchemeTag::Brownian));
    }

    #[test]
    fn init_with_empty_set_is_noop() {
        let mut reg = registry(1.0, 0.01);
        reg.langevin
            .set_gamma(FrictionCoefficient::Scalar(1.0))
            .expect("valid");
        reg.init();
        // Langevin was never dispatched: rotational friction stays unset.
        assert!(reg.langevin.gamma_rotation().is_unset());
    }

    #[test]
    fn init_skips_inactive_schemes() {
        let mut reg = registry(1.0, 0.01);
        reg.langevin
            .set_gamma(FrictionCoefficient::Scalar(1.0))
            .expect("valid");
        reg.enable(SchemeTag::Brownian);
        reg.init();
        assert!(
            reg.langevin.gamma_rotation().is_unset(),
            "inactive langevin must not be initialized"
        );
    }

    #[test]
    fn npt_clears_its_own_tag_on_zero_piston_mass() {
        let mut reg = registry(1.0, 0.01);
        reg.enable(SchemeTag::NptIsotropic);
        reg.enable(SchemeTag::Langevin);
        reg.init();
        assert!(
            !reg.is_active(SchemeTag::NptIsotropic),
            "NPT must deactivate itself when the piston cannot move"
        );
        assert!(reg.is_active(SchemeTag::Langevin), "others stay active");
    }

    #[test]
    fn npt_stays_active_with_movable_piston() {
        let mut reg = registry(1.0, 0.01);
        reg.piston.set_mass(4.0).expect("valid");
        reg.npt.set_gamma0(1.0).expect("valid");
        reg.enable(SchemeTag::NptIsotropic);
        reg.init();
        assert!(reg.is_active(SchemeTag::NptIsotropic));
        assert!(reg.npt.pref1() < 0.0);
    }

    #[test]
    fn external_schemes_called_once_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut reg = registry(1.0, 0.01);
        reg.register_dpd(Box::new(Recorder {
            name: "dpd",
            calls: Rc::clone(&calls),
        }));
        reg.register_ghmc(Box::new(Recorder {
            name: "ghmc",
            calls: Rc::clone(&calls),
        }));
        reg.enable(SchemeTag::Dpd);
        reg.enable(SchemeTag::Ghmc);

        reg.init();
        reg.heat_up();
        reg.cool_down();

        assert_eq!(
            *calls.borrow(),
            vec![
                "dpd:init", "ghmc:init", "dpd:heat", "ghmc:heat", "dpd:cool", "ghmc:cool"
            ],
            "each hook exactly once, DPD before GHMC"
        );
    }

    #[test]
    fn inactive_external_schemes_not_dispatched() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut reg = registry(1.0, 0.01);
        reg.register_dpd(Box::new(Recorder {
            name: "dpd",
            calls: Rc::clone(&calls),
        }));
        reg.enable(SchemeTag::Langevin);
        reg.init();
        reg.heat_up();
        reg.cool_down();
        assert!(calls.borrow().is_empty(), "inactive DPD must never run");
    }

    #[test]
    fn parameter_mutation_does_not_recompute() {
        let mut reg = registry(1.0, 0.01);
        reg.langevin
            .set_gamma(FrictionCoefficient::Scalar(1.0))
            .expect("valid");
        reg.enable(SchemeTag::Langevin);
        reg.init();
        let pref1_before = reg.langevin.pref1();

        reg.set_time_step(0.02).expect("valid");
        assert_eq!(
            reg.langevin.pref1(),
            pref1_before,
            "no dirty-bit tracking: prefactors stale until explicit init()"
        );

        reg.init();
        assert_ne!(reg.langevin.pref1(), pref1_before);
    }

    #[test]
    fn heat_up_only_touches_active_langevin() {
        let mut reg = registry(1.0, 0.01);
        reg.langevin
            .set_gamma(FrictionCoefficient::Scalar(1.0))
            .expect("valid");
        reg.enable(SchemeTag::Langevin);
        reg.init();
        reg.disable(SchemeTag::Langevin);

        let pref2 = reg.langevin.pref2();
        reg.heat_up();
        assert_eq!(reg.langevin.pref2(), pref2, "inactive scheme untouched");
    }

    #[test]
    fn dispatch_order_is_fixed() {
        use crate::thermostat::DISPATCH_ORDER;
        assert_eq!(
            DISPATCH_ORDER,
            [
                SchemeTag::Langevin,
                SchemeTag::Dpd,
                SchemeTag::NptIsotropic,
                SchemeTag::Ghmc,
                SchemeTag::Brownian,
            ]
        );
    }

    #[test]
    fn setters_delegate_boundary_validation() {
        let mut reg = registry(1.0, 0.01);
        assert!(reg.set_temperature(-1.0).is_err());
        assert!(reg.set_time_step(0.0).is_err());
        assert!(reg.set_smaller_time_step(-0.1).is_err());
        assert!(reg.set_temperature(2.0).is_ok());
    }
}
