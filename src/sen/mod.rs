//! This module and its submodules contain the SEN-SFP arithmetic kernel: a deterministic,
//! structure-preserving floating point format whose mantissa is a string of balanced ±1
//! digits (with a cyclic X/Y/Z axis label per position) instead of a conventional binary
//! fraction.
//!
//! The layering is strict, earlier modules never depend on later ones:
//!
//!   - [`digit`], [`flags`], [`config`], [`trace`]: the data model;
//!   - [`specials`]: the total NaN/Inf/Zero tables each operation consults first;
//!   - [`carry`], [`round`]: balanced carry resolution and the five rounding modes;
//!   - [`normalize`]: the strip → round → canonicalize → finalize pipeline every operation
//!     funnels through;
//!   - [`ops`]: add/sub/mul and the Newton–Raphson division;
//!   - [`compare`], [`rational`], [`export`], [`suite`]: ordering, the exact rational value,
//!     serialization, and the deterministic self-test suite.
//!
//! Some notation used in the comments:
//!
//!   - **Digit 0 / leading digit**: the most significant digit, weight `2^scale`.
//!   - **Working mantissa**: the tri-state digit buffer used between raw arithmetic and
//!     canonicalization; see [`digit`].

mod digit;
mod flags;
mod config;
mod trace;

/// Constructors, accessors and invariants of [`Sen`].
mod basics;

/// Compact `Debug` renderings.
mod fmt;

/// The NaN/Inf/Zero tables.
mod specials;

/// Balanced carry resolution.
mod carry;

/// Rounding to precision.
mod round;

/// The normalization pipeline.
mod normalize;

/// The four arithmetic operations.
mod ops;

/// Total order with an unordered case.
mod compare;

/// Exact value of a finite number as a rational.
mod rational;

/// Canonical JSON, pole strings, rational and decimal projections.
mod export;

/// Deterministic test-case construction and evaluation.
mod suite;


pub use config::{Config, ConfigError, RoundMode, MAX_PRECISION, MAX_SCALE};
pub use digit::{Axis, Digit, Mantissa, ParseMantissaError, Pole};
pub use flags::Flags;
pub use trace::{CollectingTracer, NullTracer, Phase, TraceEvent, TraceLevel, Tracer};

pub use basics::BuildError;
pub use compare::Comparison;
pub use export::ExportBundle;
pub use rational::NotFinite;
pub use suite::{build_core_test_suite, run_test_suite, Op, TestCase, TestResult};

pub(crate) use digit::Working;

use serde::Serialize;

/// Which of the four value classes a [`Sen`] belongs to. Anything but `Normal` short-circuits
/// digit arithmetic entirely.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Special {
  Normal,
  Zero,
  Inf,
  Nan,
}

/// A SEN-SFP number.
///
/// For a `Normal` number the represented value is
/// `sign · Σ pole_i · 2^(scale − i)` over the mantissa digits, most significant first; the
/// mantissa is nonempty and leads with a positive pole. For every other [`Special`] the
/// mantissa is empty and the scale is zero.
///
/// Equality (`==`) is structural and includes the accumulated [`Flags`]; use
/// [`compare`](Sen::compare) for numeric ordering.
///
/// ```
/// use sen_sfp::{Config, Pole, Sen};
///
/// let a = Sen::normal(Pole::Pos, 0, &[Pole::Pos; 4]).unwrap();
/// let sum = a.add(&a, &Config::SIMPLE);
/// assert_eq!(sum.scale(), 1);
/// assert_eq!(sum.mantissa().poles(), a.mantissa().poles());
/// assert!(!sum.flags().any());
/// ```
#[derive(Clone)]
#[derive(Eq, PartialEq, Hash)]
pub struct Sen {
  special: Special,
  sign: Pole,
  scale: i64,
  mantissa: Mantissa,
  flags: Flags,
}
