use super::*;

use serde_json::{json, Value};

/// The error returned when an operand cannot be constructed.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq)]
pub enum BuildError {
  /// A `Normal` number needs at least one mantissa digit.
  EmptyMantissa,
  /// The mantissa had more digits than [`MAX_PRECISION`].
  MantissaTooLong { len: usize },
  /// The scale magnitude exceeded [`MAX_SCALE`].
  ScaleOutOfRange { scale: i64 },
}

impl core::fmt::Display for BuildError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      BuildError::EmptyMantissa => write!(f, "a normal number needs a nonempty mantissa"),
      BuildError::MantissaTooLong { len } => {
        write!(f, "mantissa of {len} digits exceeds the maximum of {MAX_PRECISION}")
      }
      BuildError::ScaleOutOfRange { scale } => {
        write!(f, "scale {scale} is outside ±{MAX_SCALE}")
      }
    }
  }
}

impl std::error::Error for BuildError {}

impl Sen {
  /// A zero of the given sign. Zero carries a sign but compares equal regardless of it.
  pub fn zero(sign: Pole) -> Sen {
    Sen { special: Special::Zero, sign, scale: 0, mantissa: Mantissa::empty(), flags: Flags::NONE }
  }

  /// An infinity of the given sign.
  pub fn inf(sign: Pole) -> Sen {
    Sen { special: Special::Inf, sign, scale: 0, mantissa: Mantissa::empty(), flags: Flags::NONE }
  }

  /// Not-a-number. Carries the `invalid` flag from birth.
  pub fn nan() -> Sen {
    Sen {
      special: Special::Nan,
      sign: Pole::Pos,
      scale: 0,
      mantissa: Mantissa::empty(),
      flags: Flags { invalid: true, ..Flags::NONE },
    }
  }

  /// The multiplicative unit: the single digit `+` at scale 0, value exactly 1. Convolving any
  /// mantissa with it reproduces that mantissa.
  pub fn one() -> Sen {
    Sen {
      special: Special::Normal,
      sign: Pole::Pos,
      scale: 0,
      mantissa: Mantissa::from_poles(vec![Pole::Pos]),
      flags: Flags::NONE,
    }
  }

  /// Build a `Normal` number from a sign, a scale, and a pole list (most significant first).
  ///
  /// The digit string is canonicalized on the way in, exactly as the pipeline would leave it:
  /// a leading negative pole flips every pole and the sign, and a redundant leading pair
  /// `[d, −d]` compresses to `[d]` one scale down (`d·2w − d·w = d·w`). Numerically equal
  /// inputs therefore get the same structural form, which ordering and the identity laws rely
  /// on. This is where the operand contract is enforced; the pipeline never re-validates it.
  pub fn normal(sign: Pole, scale: i64, poles: &[Pole]) -> Result<Sen, BuildError> {
    if poles.is_empty() {
      return Err(BuildError::EmptyMantissa);
    }
    if poles.len() > MAX_PRECISION as usize {
      return Err(BuildError::MantissaTooLong { len: poles.len() });
    }
    if scale > MAX_SCALE || scale < -MAX_SCALE {
      return Err(BuildError::ScaleOutOfRange { scale });
    }
    let (sign, mut poles) = if poles[0] == Pole::Neg {
      (-sign, poles.iter().map(|&p| -p).collect::<Vec<_>>())
    } else {
      (sign, poles.to_vec())
    };
    let mut scale = scale;
    while poles.len() >= 2 && poles[1] == -poles[0] {
      poles.remove(1);
      scale -= 1;
    }
    // Compression cannot flip the leading pole.
    debug_assert_eq!(poles[0], Pole::Pos);
    Ok(Sen {
      special: Special::Normal,
      sign,
      scale,
      mantissa: Mantissa::from_poles(poles),
      flags: Flags::NONE,
    })
  }

  pub(crate) fn from_parts(
    special: Special,
    sign: Pole,
    scale: i64,
    mantissa: Mantissa,
    flags: Flags,
  ) -> Sen {
    debug_assert!(
      special == Special::Normal || (mantissa.is_empty() && scale == 0),
      "special values must carry an empty mantissa and scale 0",
    );
    Sen { special, sign, scale, mantissa, flags }
  }

  pub fn special(&self) -> Special {
    self.special
  }

  pub fn sign(&self) -> Pole {
    self.sign
  }

  pub fn scale(&self) -> i64 {
    self.scale
  }

  pub fn mantissa(&self) -> &Mantissa {
    &self.mantissa
  }

  pub fn flags(&self) -> Flags {
    self.flags
  }

  pub fn is_normal(&self) -> bool {
    self.special == Special::Normal
  }

  pub fn is_zero(&self) -> bool {
    self.special == Special::Zero
  }

  pub fn is_inf(&self) -> bool {
    self.special == Special::Inf
  }

  pub fn is_nan(&self) -> bool {
    self.special == Special::Nan
  }

  /// The additive inverse: same digits, opposite sign. NaN stays NaN.
  pub fn negated(&self) -> Sen {
    if self.is_nan() {
      return self.clone();
    }
    Sen { sign: -self.sign, ..self.clone() }
  }

  /// Merge extra flags into a result (flags only ever accumulate).
  pub(crate) fn with_flags(mut self, flags: Flags) -> Sen {
    self.flags |= flags;
    self
  }

  /// A compact snapshot for trace events.
  pub(crate) fn preview(&self) -> Value {
    json!({
      "special": self.special,
      "sign": self.sign.as_str(),
      "scale": self.scale,
      "mantissa_len": self.mantissa.len(),
      "flags": self.flags,
    })
  }
}
