use super::*;

use malachite::Integer;
use malachite::base::num::arithmetic::traits::PowerOf2;
use serde::Serialize;

/// How many fractional digits the decimal projection prints before giving up on a repeating
/// or very deep expansion. Denominators here are powers of two, so expansions terminate; the
/// cap only bites for scales far below zero.
const DECIMAL_DIGITS: usize = 80;

/// Every export format of one number, bundled: the canonical JSON rendering, the two digit
/// strings, the exact rational projection (`None` for `Inf`/`NaN`), and its decimal
/// expansion.
#[derive(Clone, Debug)]
#[derive(Eq, PartialEq)]
pub struct ExportBundle {
  pub json: String,
  pub pole_string: String,
  pub axis_pole_string: String,
  pub decimal_string: String,
  pub numerator: Option<Integer>,
  pub denominator: Option<Integer>,
}

/// The canonical JSON projection. Serde keeps declaration order, which is the stable field
/// order the format promises.
#[derive(Serialize)]
struct JsonNumber {
  special: Special,
  sign: &'static str,
  scale: i64,
  mantissa: Vec<JsonDigit>,
  flags: Flags,
}

#[derive(Serialize)]
struct JsonDigit {
  axis: Axis,
  pole: &'static str,
}

impl Sen {
  /// Render every export format at once.
  pub fn export_all(&self) -> ExportBundle {
    let (numerator, denominator) = match self.rational_parts() {
      Some((n, d)) => (Some(n), Some(d)),
      None => (None, None),
    };
    let decimal_string = match (self.special(), &numerator, &denominator) {
      (Special::Inf, ..) => {
        if self.sign() == Pole::Pos { "+Infinity".to_string() } else { "-Infinity".to_string() }
      }
      (Special::Nan, ..) => "NaN".to_string(),
      (_, Some(n), Some(d)) => decimal_of(n, d),
      _ => unreachable!("finite numbers always project to a rational"),
    };
    ExportBundle {
      json: self.to_canonical_json(),
      pole_string: self.pole_string(),
      axis_pole_string: self.axis_pole_string(),
      decimal_string,
      numerator,
      denominator,
    }
  }

  /// Canonical JSON with stable field order and poles rendered as `"+"`/`"-"`.
  pub fn to_canonical_json(&self) -> String {
    let projection = JsonNumber {
      special: self.special(),
      sign: self.sign().as_str(),
      scale: self.scale(),
      mantissa: self
        .mantissa()
        .digits()
        .map(|d| JsonDigit { axis: d.axis, pole: d.pole.as_str() })
        .collect(),
      flags: self.flags(),
    };
    serde_json::to_string_pretty(&projection).expect("projection structs always serialize")
  }

  /// The mantissa as a space-joined pole string, `"+ - +"`; `"(empty)"` for specials.
  pub fn pole_string(&self) -> String {
    if self.mantissa().is_empty() {
      return "(empty)".to_string();
    }
    let poles: Vec<&str> = self.mantissa().poles().iter().map(|p| p.as_str()).collect();
    poles.join(" ")
  }

  /// The mantissa with positional axes, `"+X -Y +Z"`; `"(empty)"` for specials.
  pub fn axis_pole_string(&self) -> String {
    if self.mantissa().is_empty() {
      return "(empty)".to_string();
    }
    let digits: Vec<String> = self
      .mantissa()
      .digits()
      .map(|d| format!("{}{}", d.pole.as_str(), d.axis.as_str()))
      .collect();
    digits.join(" ")
  }

  /// The exact value as an integer pair, or `None` for `Inf`/`NaN`.
  ///
  /// The digits share one power-of-two denominator, `2^(len−1−scale)` (clamped at 1), every
  /// digit contributing an integer term to the numerator. For a canonical mantissa the last
  /// digit is ±1, so the numerator is odd and the pair is already in lowest terms.
  pub fn rational_parts(&self) -> Option<(Integer, Integer)> {
    match self.special() {
      Special::Inf | Special::Nan => None,
      Special::Zero => Some((Integer::from(0), Integer::from(1))),
      Special::Normal => {
        let len = self.mantissa().len() as i64;
        // When the scale reaches past the last digit the value is an even integer; the spare
        // factor moves into the numerator instead.
        let numerator_shift = (self.scale() - (len - 1)).max(0) as u64;
        let denominator_power = ((len - 1) - self.scale()).max(0) as u64;

        let mut numerator = Integer::from(0);
        for (i, pole) in self.mantissa().poles().iter().enumerate() {
          let term = Integer::power_of_2((len - 1 - i as i64) as u64 + numerator_shift);
          numerator = match pole {
            Pole::Pos => numerator + term,
            Pole::Neg => numerator - term,
          };
        }
        if self.sign() == Pole::Neg {
          numerator = -numerator;
        }
        Some((numerator, Integer::power_of_2(denominator_power)))
      }
    }
  }
}

/// Long division of `numerator / denominator` to at most [`DECIMAL_DIGITS`] fractional
/// digits, stopping early when the remainder hits zero.
fn decimal_of(numerator: &Integer, denominator: &Integer) -> String {
  let zero = Integer::from(0);
  let negative = *numerator < zero;
  let mut magnitude = if negative { -numerator.clone() } else { numerator.clone() };

  let integer_part = &magnitude / denominator;
  magnitude = magnitude - &integer_part * denominator;

  let mut out = String::new();
  if negative {
    out.push('-');
  }
  out.push_str(&integer_part.to_string());

  if magnitude != zero {
    out.push('.');
    let ten = Integer::from(10);
    let mut emitted = 0;
    while magnitude != zero && emitted < DECIMAL_DIGITS {
      magnitude = magnitude * &ten;
      let digit = &magnitude / denominator;
      out.push_str(&digit.to_string());
      magnitude = magnitude - &digit * denominator;
      emitted += 1;
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use Pole::{Neg, Pos};

  fn sen(sign: Pole, scale: i64, poles: &[Pole]) -> Sen {
    Sen::normal(sign, scale, poles).unwrap()
  }

  #[test]
  fn pole_strings() {
    let x = sen(Pos, 0, &[Pos, Pos, Neg, Pos]);
    assert_eq!(x.pole_string(), "+ + - +");
    assert_eq!(x.axis_pole_string(), "+X +Y -Z +X");
    assert_eq!(Sen::zero(Pos).pole_string(), "(empty)");
    assert_eq!(Sen::inf(Neg).axis_pole_string(), "(empty)");
  }

  #[test]
  fn rational_parts_examples() {
    // [+,+,+,+] at scale 0 is 15/8.
    let (n, d) = sen(Pos, 0, &[Pos; 4]).rational_parts().unwrap();
    assert_eq!((n, d), (Integer::from(15), Integer::from(8)));

    // Scale past the digits: [+,+] at scale 4 is 8 + 16 = 24, denominator 1.
    let (n, d) = sen(Pos, 4, &[Pos, Pos]).rational_parts().unwrap();
    assert_eq!((n, d), (Integer::from(24), Integer::from(1)));

    let (n, d) = sen(Neg, 0, &[Pos, Pos, Neg, Neg]).rational_parts().unwrap();
    assert_eq!((n, d), (Integer::from(-9), Integer::from(8)));

    let (n, d) = Sen::zero(Neg).rational_parts().unwrap();
    assert_eq!((n, d), (Integer::from(0), Integer::from(1)));

    assert_eq!(Sen::inf(Pos).rational_parts(), None);
    assert_eq!(Sen::nan().rational_parts(), None);
  }

  #[test]
  fn rational_parts_match_the_oracle() {
    use malachite::rational::Rational;

    for x in [
      sen(Pos, 0, &[Pos; 4]),
      sen(Neg, 3, &[Pos, Pos, Neg, Pos]),
      sen(Pos, -7, &[Pos, Pos]),
      sen(Pos, 9, &[Pos, Pos, Neg]),
    ] {
      let (n, d) = x.rational_parts().unwrap();
      let from_parts = Rational::from_integers(n, d);
      assert_eq!(from_parts, Rational::try_from(&x).unwrap(), "{x:?}");
    }
  }

  #[test]
  fn decimal_examples() {
    assert_eq!(sen(Pos, 0, &[Pos; 4]).export_all().decimal_string, "1.875");
    assert_eq!(sen(Pos, 1, &[Pos; 4]).export_all().decimal_string, "3.75");
    assert_eq!(sen(Neg, 0, &[Pos, Pos, Neg, Neg]).export_all().decimal_string, "-1.125");
    assert_eq!(sen(Pos, 4, &[Pos, Pos]).export_all().decimal_string, "24");
    assert_eq!(Sen::zero(Pos).export_all().decimal_string, "0");
    assert_eq!(Sen::inf(Pos).export_all().decimal_string, "+Infinity");
    assert_eq!(Sen::inf(Neg).export_all().decimal_string, "-Infinity");
    assert_eq!(Sen::nan().export_all().decimal_string, "NaN");
  }

  #[test]
  fn decimal_round_trips_through_parsing() {
    use malachite::rational::Rational;

    for x in [
      sen(Pos, 0, &[Pos; 4]),
      sen(Neg, 2, &[Pos, Pos, Neg, Pos]),
      sen(Pos, -8, &[Pos, Pos, Neg, Neg]),
    ] {
      let bundle = x.export_all();
      // The denominator is a power of two well inside the digit cap, so the expansion is
      // exact and parses back to precisely numerator/denominator.
      let parsed = decimal_to_rational(&bundle.decimal_string);
      let exact = Rational::from_integers(
        bundle.numerator.clone().unwrap(),
        bundle.denominator.clone().unwrap(),
      );
      assert_eq!(parsed, exact, "{x:?} rendered as {}", bundle.decimal_string);
    }
  }

  fn decimal_to_rational(s: &str) -> malachite::rational::Rational {
    use malachite::rational::Rational;
    let (sign, body) = match s.strip_prefix('-') {
      Some(rest) => (-1i64, rest),
      None => (1i64, s),
    };
    let (int_part, frac_part) = match body.split_once('.') {
      Some((i, f)) => (i, f),
      None => (body, ""),
    };
    let mut numerator = Integer::from(0);
    let ten = Integer::from(10);
    for c in int_part.chars().chain(frac_part.chars()) {
      numerator = numerator * &ten + Integer::from(c.to_digit(10).unwrap());
    }
    let mut denominator = Integer::from(1);
    for _ in 0..frac_part.len() {
      denominator = denominator * &ten;
    }
    Rational::from_integers(Integer::from(sign) * numerator, denominator)
  }

  #[test]
  fn canonical_json_shape() {
    let x = sen(Pos, 1, &[Pos, Pos, Neg]);
    let json = x.to_canonical_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["special"], "NORMAL");
    assert_eq!(value["sign"], "+");
    assert_eq!(value["scale"], 1);
    assert_eq!(value["mantissa"][0]["axis"], "X");
    assert_eq!(value["mantissa"][0]["pole"], "+");
    assert_eq!(value["mantissa"][2]["axis"], "Z");
    assert_eq!(value["mantissa"][2]["pole"], "-");
    assert_eq!(value["flags"]["inexact"], false);

    // Stable field order: the rendered text itself starts with `special`.
    let first_field = json.splitn(3, '"').nth(1).unwrap();
    assert_eq!(first_field, "special");
  }

  #[test]
  fn json_for_specials() {
    let value: serde_json::Value =
      serde_json::from_str(&Sen::nan().to_canonical_json()).unwrap();
    assert_eq!(value["special"], "NAN");
    assert_eq!(value["mantissa"].as_array().unwrap().len(), 0);
    assert_eq!(value["flags"]["invalid"], true);
  }
}
