use super::*;

/// The outcome of comparing two numbers. NaN is unordered against everything, itself
/// included.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash)]
pub enum Comparison {
  Lt,
  Eq,
  Gt,
  Unordered,
}

impl Comparison {
  fn flip_if(self, negative: bool) -> Comparison {
    match (self, negative) {
      (Comparison::Lt, true) => Comparison::Gt,
      (Comparison::Gt, true) => Comparison::Lt,
      (other, _) => other,
    }
  }
}

impl Sen {
  /// Total order over `{−Inf, finite values, +Inf}` with zeros collapsing to a single 0
  /// regardless of sign; any NaN operand is unordered.
  ///
  /// Same-sign normal values compare by scale first (a canonical mantissa's fraction lies in
  /// [1, 2), so scales partition magnitudes into disjoint binades), then digit by digit. A
  /// missing trailing digit is an exact zero — trailing zeros are dropped on
  /// canonicalization — and reads as sitting between a negative and a positive pole.
  pub fn compare(&self, other: &Sen) -> Comparison {
    use Special::*;

    match (self.special(), other.special()) {
      (Nan, _) | (_, Nan) => Comparison::Unordered,

      (Inf, Inf) => {
        if self.sign() == other.sign() {
          Comparison::Eq
        } else if self.sign() == Pole::Neg {
          Comparison::Lt
        } else {
          Comparison::Gt
        }
      }
      (Inf, _) => {
        if self.sign() == Pole::Neg { Comparison::Lt } else { Comparison::Gt }
      }
      (_, Inf) => {
        if other.sign() == Pole::Neg { Comparison::Gt } else { Comparison::Lt }
      }

      (Zero, Zero) => Comparison::Eq,
      (Zero, Normal) => {
        if other.sign() == Pole::Neg { Comparison::Gt } else { Comparison::Lt }
      }
      (Normal, Zero) => {
        if self.sign() == Pole::Neg { Comparison::Lt } else { Comparison::Gt }
      }

      (Normal, Normal) => {
        if self.sign() != other.sign() {
          return if self.sign() == Pole::Neg { Comparison::Lt } else { Comparison::Gt };
        }
        let negative = self.sign() == Pole::Neg;

        if self.scale() != other.scale() {
          let by_scale =
            if self.scale() < other.scale() { Comparison::Lt } else { Comparison::Gt };
          return by_scale.flip_if(negative);
        }

        let a = self.mantissa().poles();
        let b = other.mantissa().poles();
        for i in 0..a.len().max(b.len()) {
          let pa = a.get(i).map_or(0, |p| p.value());
          let pb = b.get(i).map_or(0, |p| p.value());
          if pa != pb {
            let by_digit = if pa < pb { Comparison::Lt } else { Comparison::Gt };
            return by_digit.flip_if(negative);
          }
        }
        Comparison::Eq
      }
    }
  }
}
