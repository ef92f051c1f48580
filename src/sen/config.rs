use serde::Serialize;

/// How the kept digit window is adjusted when discarded digits are nonzero. See
/// [the rounding module](crate::Sen::add) for the exact decision rules.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundMode {
  NearestEven,
  TowardZero,
  Up,
  Down,
  Stochastic,
}

/// The immutable per-call configuration: precision (digit count), scale bounds, subnormal
/// handling, rounding mode and the stochastic-rounding seed.
///
/// A `Config` is validated once, at construction; no operation re-checks or mutates it.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash)]
pub struct Config {
  precision: u32,
  e_min: i64,
  e_max: i64,
  subnormal: bool,
  round_mode: RoundMode,
  stoch_seed: u64,
}

/// Upper bound on the precision a `Config` accepts. Well above anything useful; it exists so a
/// typo cannot demand gigabyte mantissas.
pub const MAX_PRECISION: u32 = 1 << 12;

/// Upper bound on scale magnitudes, for config bounds and operand scales alike. Far beyond
/// any preset; it keeps scale alignment a small allocation for anything a caller can build.
pub const MAX_SCALE: i64 = 1 << 20;

/// The error returned for a malformed [`Config`].
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq)]
pub enum ConfigError {
  /// `precision` must be at least 1.
  ZeroPrecision,
  /// `precision` exceeded [`MAX_PRECISION`].
  PrecisionTooLarge { precision: u32 },
  /// `e_min` was greater than `e_max`.
  ReversedBounds { e_min: i64, e_max: i64 },
  /// A bound's magnitude exceeded [`MAX_SCALE`].
  BoundsOutOfRange { e_min: i64, e_max: i64 },
}

impl core::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      ConfigError::ZeroPrecision => write!(f, "precision must be at least 1 digit"),
      ConfigError::PrecisionTooLarge { precision } => {
        write!(f, "precision {precision} exceeds the maximum of {MAX_PRECISION}")
      }
      ConfigError::ReversedBounds { e_min, e_max } => {
        write!(f, "scale bounds are reversed: e_min {e_min} > e_max {e_max}")
      }
      ConfigError::BoundsOutOfRange { e_min, e_max } => {
        write!(f, "scale bounds [{e_min}, {e_max}] exceed ±{MAX_SCALE}")
      }
    }
  }
}

impl std::error::Error for ConfigError {}

impl Config {
  /// A small configuration handy for tracing and tests: 4 digits, scales in ±10, no
  /// subnormals, round to nearest-even.
  pub const SIMPLE: Config = Config {
    precision: 4,
    e_min: -10,
    e_max: 10,
    subnormal: false,
    round_mode: RoundMode::NearestEven,
    stoch_seed: 0,
  };

  /// A single-precision-like configuration: 8 digits, scales in [−126, 127], subnormals on.
  pub const SFP32: Config = Config {
    precision: 8,
    e_min: -126,
    e_max: 127,
    subnormal: true,
    round_mode: RoundMode::NearestEven,
    stoch_seed: 0,
  };

  /// A double-precision-like configuration: 16 digits, scales in [−1022, 1023], subnormals on.
  pub const SFP64: Config = Config {
    precision: 16,
    e_min: -1022,
    e_max: 1023,
    subnormal: true,
    round_mode: RoundMode::NearestEven,
    stoch_seed: 0,
  };

  pub fn new(
    precision: u32,
    e_min: i64,
    e_max: i64,
    subnormal: bool,
    round_mode: RoundMode,
    stoch_seed: u64,
  ) -> Result<Config, ConfigError> {
    if precision == 0 {
      return Err(ConfigError::ZeroPrecision);
    }
    if precision > MAX_PRECISION {
      return Err(ConfigError::PrecisionTooLarge { precision });
    }
    if e_min > e_max {
      return Err(ConfigError::ReversedBounds { e_min, e_max });
    }
    if e_min < -MAX_SCALE || e_max > MAX_SCALE {
      return Err(ConfigError::BoundsOutOfRange { e_min, e_max });
    }
    Ok(Config { precision, e_min, e_max, subnormal, round_mode, stoch_seed })
  }

  /// Same digits and rounding, but with the scale bounds thrown wide open and subnormals off.
  /// The reciprocal iteration normalizes its intermediates under this so that a caller's tight
  /// `e_min`/`e_max` cannot clamp values mid-iteration; only the final quotient sees the real
  /// bounds.
  pub(crate) fn widened(&self) -> Config {
    Config { e_min: i64::MIN / 2, e_max: i64::MAX / 2, subnormal: false, ..*self }
  }

  /// Same config with truncating rounding; used between reciprocal iterates, where an
  /// increment would only add noise to the convergence.
  pub(crate) fn truncating(&self) -> Config {
    Config { round_mode: RoundMode::TowardZero, ..*self }
  }

  pub fn precision(&self) -> u32 {
    self.precision
  }

  pub fn e_min(&self) -> i64 {
    self.e_min
  }

  pub fn e_max(&self) -> i64 {
    self.e_max
  }

  pub fn subnormal_enabled(&self) -> bool {
    self.subnormal
  }

  pub fn round_mode(&self) -> RoundMode {
    self.round_mode
  }

  pub fn stoch_seed(&self) -> u64 {
    self.stoch_seed
  }

  /// Builder-style adjustments; a `Config` itself is never mutated in place.
  pub fn with_round_mode(self, round_mode: RoundMode) -> Config {
    Config { round_mode, ..self }
  }

  pub fn with_subnormal(self, subnormal: bool) -> Config {
    Config { subnormal, ..self }
  }

  pub fn with_stoch_seed(self, stoch_seed: u64) -> Config {
    Config { stoch_seed, ..self }
  }
}
