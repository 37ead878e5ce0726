// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized comparison tolerances with numerical justification.
//!
//! Every tolerance used in tests is defined here with its origin. No ad-hoc
//! magic numbers at assertion sites.

/// Tolerance for operations that should be exact in f64 arithmetic.
///
/// f64 has ~15.9 significant digits; 1e-10 allows several digits of
/// accumulated rounding in short compositions of exact operations
/// (divide, multiply, square root).
pub const EXACT_F64: f64 = 1e-10;

/// Relative tolerance for squared noise prefactors.
///
/// Checking `pref2^2 == 24 T gamma / dt` squares one rounding step of the
/// square root, so the relative error doubles but stays within a few ulps.
/// 1e-12 relative leaves ~3 orders of margin on quantities of order 1e3.
pub const SQUARED_PREFACTOR_REL: f64 = 1e-12;
