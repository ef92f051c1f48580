use super::*;

use super::super::{normalize, specials};

/// The digit-domain reciprocal of a normalized divisor mantissa: digits and scale such that
/// `2^scale · Σ digit_i · 2^(−i) ≈ 1/d`, plus the flags the iteration accumulated.
struct Reciprocal {
  digits: Working,
  scale: i64,
  flags: Flags,
}

/// Newton–Raphson reciprocal: iterate `x ← x·(2 − d·x)`, everything expressed in digits.
///
/// `d` is the divisor's canonical digit string taken at scale 0, i.e. a fraction in (0, 2);
/// the divisor's true scale is handled by the caller. The seed is the all-ones mantissa one
/// scale down (≈0.94), the all-ones value closest to 1 — seeded at scale 0 (≈1.9) the
/// iteration diverges for fractions above ~1.07. Iterates are normalized under widened scale
/// bounds with truncating rounding, so the caller's bounds and mode only shape the final
/// quotient.
fn reciprocal(d: &Working, cfg: &Config, tracer: &mut dyn Tracer) -> Reciprocal {
  let internal = cfg.widened().truncating();
  let precision = cfg.precision();
  emit(tracer, TraceLevel::Info, Phase::Recip, "reciprocal start", json!({
    "precision": precision,
  }));

  let mut x = Working(vec![1; precision as usize]);
  let mut x_scale: i64 = -1;
  let mut flags = Flags::NONE;

  // Quadratic convergence: each pass roughly doubles the correct digits.
  let iterations = if precision <= 16 {
    2
  } else if precision <= 32 {
    3
  } else {
    4
  };

  for iteration in 1..=iterations {
    emit(tracer, TraceLevel::Debug, Phase::Recip, "iteration", json!({
      "iteration": iteration,
    }));

    // d·x, normalized back to a plain digit string.
    let (raw, adjust) = mul_working(d, &x, tracer);
    let dx = normalize::pipeline(raw, Pole::Pos, x_scale.saturating_add(adjust), &internal, tracer);
    if !dx.is_normal() {
      break;
    }
    flags |= dx.flags();

    // e = 2 − d·x; the exact two is the single digit [+] at scale 1.
    let two = (Working(vec![1]), 1);
    let neg_dx = (dx.mantissa().to_working().negated(), dx.scale());
    let (raw, e_scale) = add_raw(two, neg_dx, tracer);
    let e = normalize::pipeline(raw, Pole::Pos, e_scale, &internal, tracer);
    if !e.is_normal() {
      break;
    }
    flags |= e.flags();

    // x ← x·e.
    let (raw, adjust) = mul_working(&x, &e.mantissa().to_working(), tracer);
    let next = normalize::pipeline(
      raw,
      Pole::Pos,
      x_scale.saturating_add(e.scale()).saturating_add(adjust),
      &internal,
      tracer,
    );
    if !next.is_normal() {
      break;
    }
    flags |= next.flags();
    x = next.mantissa().to_working();
    x_scale = next.scale();
  }

  emit(tracer, TraceLevel::Info, Phase::Recip, "reciprocal converged", json!({
    "scale": x_scale,
  }));
  Reciprocal { digits: x, scale: x_scale, flags }
}

impl Sen {
  /// `self / other` under `cfg`, without tracing.
  pub fn div(&self, other: &Sen, cfg: &Config) -> Sen {
    self.div_traced(other, cfg, &mut NullTracer)
  }

  /// `self / other`: multiply by the Newton–Raphson reciprocal of the divisor's digits, at
  /// scale `scale(a) − scale(b)` plus whatever scale the reciprocal carries.
  pub fn div_traced(&self, other: &Sen, cfg: &Config, tracer: &mut dyn Tracer) -> Sen {
    tracing::debug!(precision = cfg.precision(), "sen div");
    emit(tracer, TraceLevel::Info, Phase::Op, "DIV start", json!({
      "a": self.preview(),
      "b": other.preview(),
    }));

    if let Some(result) = specials::handle_div(self, other, tracer) {
      return result;
    }

    let sign = self.sign() * other.sign();
    let recip = reciprocal(&other.mantissa().to_working(), cfg, tracer);

    let (quot, adjust) = mul_working(&self.mantissa().to_working(), &recip.digits, tracer);
    let scale = self
      .scale()
      .saturating_sub(other.scale())
      .saturating_add(recip.scale)
      .saturating_add(adjust);
    normalize::pipeline(quot, sign, scale, cfg, tracer).with_flags(recip.flags)
  }
}
