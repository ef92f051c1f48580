use super::*;

use super::trace::{emit, Phase, TraceLevel};
use serde_json::json;

/// Special-value table for `a + b`. `None` means both operands are `Normal` and digit
/// arithmetic has to run. These tables are consulted before any scale alignment, since the
/// scale and mantissa of special values are meaningless.
pub(crate) fn handle_add(a: &Sen, b: &Sen, tracer: &mut dyn Tracer) -> Option<Sen> {
  use Special::*;
  let result = match (a.special(), b.special()) {
    (Nan, _) | (_, Nan) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "NaN operand in ADD", json!({
        "a_special": a.special(), "b_special": b.special(),
      }));
      Sen::nan()
    }
    (Inf, Inf) if a.sign() != b.sign() => {
      emit(tracer, TraceLevel::Info, Phase::Special, "Inf + (-Inf) is NaN", json!({}));
      Sen::nan()
    }
    (Inf, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "a is Inf", json!({"sign": a.sign().as_str()}));
      Sen::inf(a.sign())
    }
    (_, Inf) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "b is Inf", json!({"sign": b.sign().as_str()}));
      Sen::inf(b.sign())
    }
    (Zero, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "a is zero, returning b", json!({}));
      b.clone()
    }
    (_, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "b is zero, returning a", json!({}));
      a.clone()
    }
    (Normal, Normal) => return None,
  };
  Some(result)
}

/// Special-value table for `a - b`.
pub(crate) fn handle_sub(a: &Sen, b: &Sen, tracer: &mut dyn Tracer) -> Option<Sen> {
  use Special::*;
  let result = match (a.special(), b.special()) {
    (Nan, _) | (_, Nan) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "NaN operand in SUB", json!({
        "a_special": a.special(), "b_special": b.special(),
      }));
      Sen::nan()
    }
    (Inf, Inf) if a.sign() == b.sign() => {
      emit(tracer, TraceLevel::Info, Phase::Special, "Inf - Inf is NaN", json!({}));
      Sen::nan()
    }
    (Inf, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "a is Inf", json!({"sign": a.sign().as_str()}));
      Sen::inf(a.sign())
    }
    (_, Inf) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "b is Inf, negated", json!({
        "sign": (-b.sign()).as_str(),
      }));
      Sen::inf(-b.sign())
    }
    (Zero, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "0 - 0 is +0", json!({}));
      Sen::zero(Pole::Pos)
    }
    (Zero, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "a is zero, returning -b", json!({}));
      b.negated()
    }
    (_, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "b is zero, returning a", json!({}));
      a.clone()
    }
    (Normal, Normal) => return None,
  };
  Some(result)
}

/// Special-value table for `a × b`.
pub(crate) fn handle_mul(a: &Sen, b: &Sen, tracer: &mut dyn Tracer) -> Option<Sen> {
  use Special::*;
  let sign = a.sign() * b.sign();
  let result = match (a.special(), b.special()) {
    (Nan, _) | (_, Nan) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "NaN operand in MUL", json!({
        "a_special": a.special(), "b_special": b.special(),
      }));
      Sen::nan()
    }
    (Zero, Inf) | (Inf, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "0 × Inf is NaN", json!({}));
      Sen::nan()
    }
    (Inf, _) | (_, Inf) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "Inf in MUL", json!({"sign": sign.as_str()}));
      Sen::inf(sign)
    }
    (Zero, _) | (_, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "zero in MUL", json!({"sign": sign.as_str()}));
      Sen::zero(sign)
    }
    (Normal, Normal) => return None,
  };
  Some(result)
}

/// Special-value table for `a / b`.
pub(crate) fn handle_div(a: &Sen, b: &Sen, tracer: &mut dyn Tracer) -> Option<Sen> {
  use Special::*;
  let sign = a.sign() * b.sign();
  let result = match (a.special(), b.special()) {
    (Nan, _) | (_, Nan) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "NaN operand in DIV", json!({
        "a_special": a.special(), "b_special": b.special(),
      }));
      Sen::nan()
    }
    (Zero, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "0 / 0 is NaN", json!({}));
      Sen::nan()
    }
    (_, Zero) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "division by zero", json!({
        "sign": sign.as_str(),
      }));
      Sen::inf(sign)
    }
    (Inf, Inf) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "Inf / Inf is NaN", json!({}));
      Sen::nan()
    }
    (Inf, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "Inf / x is Inf", json!({
        "sign": sign.as_str(),
      }));
      Sen::inf(sign)
    }
    (_, Inf) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "x / Inf is zero", json!({
        "sign": sign.as_str(),
      }));
      Sen::zero(sign)
    }
    (Zero, _) => {
      emit(tracer, TraceLevel::Info, Phase::Special, "0 / x is zero", json!({
        "sign": sign.as_str(),
      }));
      Sen::zero(sign)
    }
    (Normal, Normal) => return None,
  };
  Some(result)
}
