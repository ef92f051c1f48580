use super::*;

use core::str::FromStr;
use serde::Serialize;

/// One of the three cyclic presentation labels attached to digit positions.
///
/// Axes carry **no numeric weight**. They exist so that renderings of a mantissa can show the
/// X/Y/Z cycle the format is named for, and they are always derived from a digit's *position*,
/// never stored: storing them alongside poles (as the reference implementation did) leaves them
/// stale as soon as a mantissa is shifted or padded.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash, Serialize)]
pub enum Axis {
  X,
  Y,
  Z,
}

impl Axis {
  /// The axis of a 1-indexed digit position: positions cycle X, Y, Z, X, Y, Z, ...
  pub fn of_position(pos: usize) -> Axis {
    debug_assert!(pos >= 1, "digit positions are 1-indexed");
    match (pos - 1) % 3 {
      0 => Axis::X,
      1 => Axis::Y,
      _ => Axis::Z,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Axis::X => "X",
      Axis::Y => "Y",
      Axis::Z => "Z",
    }
  }
}

/// A canonical digit value (and also the sign of a whole number): −1 or +1.
///
/// The transient 0 pole that raw arithmetic needs is only representable in a [`Working`]
/// mantissa, never in a canonical one.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash)]
pub enum Pole {
  Neg,
  Pos,
}

impl Pole {
  pub fn value(self) -> i32 {
    match self {
      Pole::Neg => -1,
      Pole::Pos => 1,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Pole::Neg => "-",
      Pole::Pos => "+",
    }
  }

}

impl core::ops::Neg for Pole {
  type Output = Pole;

  fn neg(self) -> Pole {
    match self {
      Pole::Neg => Pole::Pos,
      Pole::Pos => Pole::Neg,
    }
  }
}

impl core::ops::Mul for Pole {
  type Output = Pole;

  /// Sign product: used for the result sign of multiplication and division.
  fn mul(self, rhs: Pole) -> Pole {
    if self == rhs { Pole::Pos } else { Pole::Neg }
  }
}

/// A rendered digit: a pole together with the axis its position carries. Produced by
/// [`Mantissa::digits`] for export and display; not stored anywhere.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq)]
pub struct Digit {
  pub axis: Axis,
  pub pole: Pole,
}

/// A canonical mantissa: an ordered digit string, most significant first, every pole ±1.
///
/// The represented magnitude of a number with scale `s` is `Σ pole_i · 2^(s − i)`, digit 0
/// contributing `2^s`.
#[derive(Clone, Default)]
#[derive(Eq, PartialEq, Hash)]
pub struct Mantissa(Vec<Pole>);

impl Mantissa {
  pub const fn empty() -> Mantissa {
    Mantissa(Vec::new())
  }

  pub fn from_poles(poles: Vec<Pole>) -> Mantissa {
    Mantissa(poles)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn poles(&self) -> &[Pole] {
    &self.0
  }

  /// Iterate the digits together with their positional axes.
  pub fn digits(&self) -> impl Iterator<Item = Digit> + '_ {
    self.0.iter().enumerate().map(|(i, &pole)| Digit { axis: Axis::of_position(i + 1), pole })
  }

  pub(crate) fn to_working(&self) -> Working {
    Working(self.0.iter().map(|p| p.value()).collect())
  }
}

/// The error returned when a pole list cannot be parsed from text.
#[derive(Debug)]
#[derive(Eq, PartialEq)]
pub struct ParseMantissaError {
  offending: String,
}

impl core::fmt::Display for ParseMantissaError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "invalid pole token {:?}: expected +, -, +1 or -1", self.offending)
  }
}

impl std::error::Error for ParseMantissaError {}

impl FromStr for Mantissa {
  type Err = ParseMantissaError;

  /// Parse a pole list as entered at the UI boundary: tokens `+`/`-` (or `+1`/`1`/`-1`),
  /// separated by commas and/or whitespace. `"+,-,+"` and `"+ - +"` both parse.
  fn from_str(s: &str) -> Result<Mantissa, ParseMantissaError> {
    let mut poles = Vec::new();
    for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
      match token.trim() {
        "" => continue,
        "+" | "+1" | "1" => poles.push(Pole::Pos),
        "-" | "-1" => poles.push(Pole::Neg),
        other => return Err(ParseMantissaError { offending: other.to_string() }),
      }
    }
    Ok(Mantissa(poles))
  }
}

/// A working mantissa: the tri-state (and, inside raw arithmetic, unbounded-integer) digit
/// buffer that addition and convolution produce before carry resolution squeezes it back into
/// {−1, 0, +1}. Only the arithmetic kernels and the normalization pipeline see this type.
#[derive(Clone, Debug)]
#[derive(Eq, PartialEq)]
pub(crate) struct Working(pub(crate) Vec<i32>);

impl Working {
  pub(crate) fn len(&self) -> usize {
    self.0.len()
  }

  /// Flip every pole. Subtraction is negated addition.
  pub(crate) fn negated(mut self) -> Working {
    for d in &mut self.0 {
      *d = -*d;
    }
    self
  }

  /// Scale-preserving denormalization: prepend `k` zero digits, moving every existing digit
  /// `k` positions down in weight. Used to align operand scales and to denormalize subnormals.
  pub(crate) fn right_shifted(self, k: usize) -> Working {
    if k == 0 {
      return self;
    }
    let mut digits = vec![0; k];
    digits.extend(self.0);
    Working(digits)
  }

  /// Pad with zero digits at the least-significant end up to `len`. After two operands have
  /// been brought to a common scale their index-0 digits share a weight, so the only honest
  /// place to make lengths equal is the tail.
  pub(crate) fn pad_tail(&mut self, len: usize) {
    if self.0.len() < len {
      self.0.resize(len, 0);
    }
  }

  /// If the leading digit is negative, flip every pole and the sign. Idempotent; guarantees
  /// the canonical leading-positive form for any mantissa that is not all zeros.
  pub(crate) fn normalize_sign(&mut self, sign: Pole) -> Pole {
    match self.0.first() {
      Some(&d) if d < 0 => {
        for d in &mut self.0 {
          *d = -*d;
        }
        -sign
      }
      _ => sign,
    }
  }

  /// Convert to a canonical mantissa. Trailing zero digits contribute nothing and are dropped
  /// exactly. A zero anywhere else cannot be represented in ±1 digits: it becomes `Neg` and
  /// raises `inexact`. (Carry resolution rewrites interior zeros away, so in practice only the
  /// trailing case occurs.)
  pub(crate) fn into_canonical(self, flags: &mut Flags) -> Mantissa {
    let end = self.0.iter().rposition(|&d| d != 0).map_or(0, |i| i + 1);
    let poles = self.0[..end]
      .iter()
      .map(|&d| {
        if d > 0 {
          Pole::Pos
        } else if d < 0 {
          Pole::Neg
        } else {
          flags.inexact = true;
          Pole::Neg
        }
      })
      .collect();
    Mantissa(poles)
  }
}
