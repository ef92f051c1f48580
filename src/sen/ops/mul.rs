use super::*;

use super::super::{normalize, specials};

impl Sen {
  /// `self × other` under `cfg`, without tracing.
  pub fn mul(&self, other: &Sen, cfg: &Config) -> Sen {
    self.mul_traced(other, cfg, &mut NullTracer)
  }

  /// `self × other`: convolution of the pole sequences at the summed scale. Convolution is
  /// polynomial multiplication in the digit weights, so it is exact; only the pipeline's
  /// rounding loses anything.
  pub fn mul_traced(&self, other: &Sen, cfg: &Config, tracer: &mut dyn Tracer) -> Sen {
    tracing::debug!(precision = cfg.precision(), "sen mul");
    emit(tracer, TraceLevel::Info, Phase::Op, "MUL start", json!({
      "a": self.preview(),
      "b": other.preview(),
    }));

    if let Some(result) = specials::handle_mul(self, other, tracer) {
      return result;
    }

    let sign = self.sign() * other.sign();
    let wa = self.mantissa().to_working();
    let wb = other.mantissa().to_working();
    let (prod, adjust) = mul_working(&wa, &wb, tracer);
    let scale = self.scale().saturating_add(other.scale()).saturating_add(adjust);
    normalize::pipeline(prod, sign, scale, cfg, tracer)
  }
}
