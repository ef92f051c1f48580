use super::*;

use core::fmt::Debug;

impl Debug for Mantissa {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for pole in self.poles() {
      f.write_str(pole.as_str())?;
    }
    Ok(())
  }
}

impl Debug for Sen {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self.special() {
      Special::Zero => f.debug_tuple("Sen").field(&format_args!("{}0", self.sign().as_str())).finish(),
      Special::Inf => f.debug_tuple("Sen").field(&format_args!("{}Inf", self.sign().as_str())).finish(),
      Special::Nan => f.debug_tuple("Sen").field(&format_args!("NaN")).finish(),
      Special::Normal => f
        .debug_tuple("Sen")
        .field(&format_args!(
          "{}[{:?}] × 2^{}",
          self.sign().as_str(),
          self.mantissa(),
          self.scale(),
        ))
        .finish(),
    }
  }
}
