use super::*;

use malachite::rational::Rational;
use malachite::base::num::arithmetic::traits::PowerOf2;

/// The error type returned when a [`Sen`] cannot be converted to a [`Rational`] because it has
/// no finite numeric value (`Inf` or `NaN`).
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq)]
pub struct NotFinite;

impl core::fmt::Display for NotFinite {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Inf and NaN have no rational value")
  }
}

impl std::error::Error for NotFinite {}

impl TryFrom<&Sen> for Rational {
  type Error = NotFinite;

  /// The **exact** value `sign · Σ pole_i · 2^(scale − i)`.
  ///
  /// This is the deliberately obvious rendition of the value model; the digit kernels are
  /// checked against it in the tests, the way an optimised implementation is checked against
  /// an oracle.
  fn try_from(x: &Sen) -> Result<Rational, NotFinite> {
    match x.special() {
      Special::Inf | Special::Nan => Err(NotFinite),
      Special::Zero => Ok(Rational::from(0)),
      Special::Normal => {
        let mut value = Rational::from(0);
        for (i, pole) in x.mantissa().poles().iter().enumerate() {
          let term = Rational::power_of_2(x.scale() - i as i64);
          value = match pole {
            Pole::Pos => value + term,
            Pole::Neg => value - term,
          };
        }
        if x.sign() == Pole::Neg {
          value = -value;
        }
        Ok(value)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use Pole::{Neg, Pos};

  fn sen(sign: Pole, scale: i64, poles: &[Pole]) -> Sen {
    Sen::normal(sign, scale, poles).unwrap()
  }

  #[test]
  fn specials() {
    assert_eq!(Rational::try_from(&Sen::zero(Pos)), Ok(Rational::from(0)));
    assert_eq!(Rational::try_from(&Sen::zero(Neg)), Ok(Rational::from(0)));
    assert_eq!(Rational::try_from(&Sen::inf(Pos)), Err(NotFinite));
    assert_eq!(Rational::try_from(&Sen::nan()), Err(NotFinite));
  }

  #[test]
  fn examples() {
    assert_eq!(Rational::try_from(&Sen::one()), Ok(Rational::from(1)));
    // [+,+,+,+] at scale 0: 1 + 1/2 + 1/4 + 1/8 = 15/8.
    assert_eq!(
      Rational::try_from(&sen(Pos, 0, &[Pos; 4])),
      Ok(Rational::from_signeds(15, 8)),
    );
    // The same digits one scale up double it.
    assert_eq!(
      Rational::try_from(&sen(Pos, 1, &[Pos; 4])),
      Ok(Rational::from_signeds(15, 4)),
    );
    // [+,+,−,−] at scale 0: 1 + 1/2 − 1/4 − 1/8 = 9/8, negated by the sign.
    assert_eq!(
      Rational::try_from(&sen(Neg, 0, &[Pos, Pos, Neg, Neg])),
      Ok(Rational::from_signeds(-9, 8)),
    );
    // A subnormal-shaped value: [+,−,−] at scale −10 is 2^−12.
    assert_eq!(
      Rational::try_from(&sen(Pos, -10, &[Pos, Neg, Neg])),
      Ok(Rational::power_of_2(-12i64)),
    );
  }

  #[test]
  fn negation_is_exact() {
    let x = sen(Pos, 3, &[Pos, Pos, Neg, Pos]);
    assert_eq!(
      Rational::try_from(&x.negated()).unwrap(),
      -Rational::try_from(&x).unwrap(),
    );
  }

  /// The additive kernel against the oracle: exact whenever no digits are discarded, and
  /// within the window's last-digit weight otherwise.
  #[test]
  fn add_tracks_the_oracle() {
    use malachite::base::num::arithmetic::traits::Abs;

    let cfg = Config::SIMPLE;
    let values = [
      sen(Pos, 0, &[Pos; 4]),
      sen(Pos, 1, &[Pos, Pos, Neg, Pos]),
      sen(Neg, 2, &[Pos, Pos]),
      sen(Pos, -3, &[Pos, Pos, Neg, Pos]),
    ];
    for a in &values {
      for b in &values {
        let out = a.add(b, &cfg);
        let exact = Rational::try_from(a).unwrap() + Rational::try_from(b).unwrap();
        match out.special() {
          Special::Zero => assert_eq!(exact, Rational::from(0)),
          Special::Normal => {
            let got = Rational::try_from(&out).unwrap();
            let tolerance = Rational::power_of_2(out.scale() - cfg.precision() as i64 + 2);
            assert!(
              (got - &exact).abs() <= tolerance,
              "{a:?} + {b:?}: exact {exact}",
            );
          }
          other => panic!("unexpected {other:?} for {a:?} + {b:?}"),
        }
      }
    }
  }
}
