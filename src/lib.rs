//! This crate provides a correct, deterministic, and fully inspectable software
//! implementation of SEN-SFP arithmetic: a structure-preserving floating point format whose
//! mantissa is a balanced digit string (poles of ±1, with a transient 0 inside raw
//! arithmetic) under a cyclic X/Y/Z axis labelling, instead of a conventional binary
//! fraction.
//!
//! # Introduction
//!
//! A [`Sen`] number is `{special, sign, scale, mantissa, flags}`: a value class
//! (normal/zero/infinity/NaN), a sign, an unbiased power-of-two scale, the digit string, and
//! the six status flags the computation accumulated. Addition, subtraction, multiplication
//! and division all follow the same shape: consult the special-value tables, produce a raw
//! digit sequence (alignment and digit-wise addition, or convolution, or Newton–Raphson
//! reciprocal followed by convolution), then feed it through one normalization pipeline that
//! strips, rounds under a configurable mode, canonicalizes, and applies the scale bounds.
//! Every phase can report a structured [`TraceEvent`] to a caller-owned [`Tracer`], which is
//! what makes the kernel pleasant to debug and to teach with.
//!
//! Operations are pure functions of their operands and a validated [`Config`]; there is no
//! shared or global state, and any number of operations may run concurrently.
//!
//! # Usage
//!
//! ```
//! use sen_sfp::{CollectingTracer, Comparison, Config, Pole, Sen};
//!
//! let cfg = Config::SIMPLE;
//! let a = Sen::normal(Pole::Pos, 0, &[Pole::Pos; 4]).unwrap();
//!
//! // Doubling a canonical mantissa just shifts its scale; nothing is rounded.
//! let sum = a.add(&a, &cfg);
//! assert_eq!(sum.scale(), 1);
//! assert!(!sum.flags().any());
//!
//! // Inspect every phase of an operation.
//! let mut tracer = CollectingTracer::new();
//! let product = a.mul_traced(&sum, &cfg, &mut tracer);
//! assert!(!tracer.events().is_empty());
//!
//! // Results order like numbers and export exactly.
//! assert_eq!(a.compare(&product), Comparison::Lt);
//! let bundle = product.export_all();
//! assert_eq!(bundle.decimal_string, "7.5");
//! ```
//!
//! The crate also ships its own deterministic scenario suite
//! ([`build_core_test_suite`]/[`run_test_suite`]), consumed by external runners.

mod sen;

pub use sen::{
  build_core_test_suite, run_test_suite, Axis, BuildError, CollectingTracer, Comparison, Config,
  ConfigError, Digit, ExportBundle, Flags, Mantissa, NotFinite, NullTracer, Op,
  ParseMantissaError, Phase, Pole, RoundMode, Sen, Special, TestCase, TestResult, TraceEvent,
  TraceLevel, Tracer, MAX_PRECISION, MAX_SCALE,
};

/// How many cases each proptest property runs; kept moderate so the whole suite stays quick.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = 256;
