use serde::Serialize;

/// The six status bits a computation accumulates. Flags are monotonic within one call chain:
/// every stage may set bits, none may clear them, and merging is a field-wise OR.
#[derive(Clone, Copy, Debug, Default)]
#[derive(Eq, PartialEq, Hash, Serialize)]
pub struct Flags {
  pub inexact: bool,
  pub underflow: bool,
  pub overflow: bool,
  pub rounded: bool,
  pub subnormal: bool,
  pub invalid: bool,
}

impl Flags {
  pub const NONE: Flags = Flags {
    inexact: false,
    underflow: false,
    overflow: false,
    rounded: false,
    subnormal: false,
    invalid: false,
  };

  /// Field-wise OR of two flag sets.
  pub fn merge(self, other: Flags) -> Flags {
    Flags {
      inexact: self.inexact || other.inexact,
      underflow: self.underflow || other.underflow,
      overflow: self.overflow || other.overflow,
      rounded: self.rounded || other.rounded,
      subnormal: self.subnormal || other.subnormal,
      invalid: self.invalid || other.invalid,
    }
  }

  pub fn any(self) -> bool {
    self != Flags::NONE
  }
}

impl core::ops::BitOr for Flags {
  type Output = Flags;

  fn bitor(self, rhs: Flags) -> Flags {
    self.merge(rhs)
  }
}

impl core::ops::BitOrAssign for Flags {
  fn bitor_assign(&mut self, rhs: Flags) {
    *self = self.merge(rhs);
  }
}
