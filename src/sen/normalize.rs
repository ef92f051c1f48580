use super::*;

use super::carry;
use super::round::{round_to_precision, Rounded};
use super::trace::{emit, Phase, TraceLevel};
use serde_json::json;

/// Hard bound on pipeline re-entries. The subnormal branch re-enters exactly once (with the
/// scale floor pinned it cannot trigger again), so hitting this bound means the configuration
/// or the pipeline itself is inconsistent; the result degrades to NaN rather than recursing.
const MAX_PASSES: u32 = 4;

/// The single entry point every operation funnels its raw digits through:
/// strip → round → canonicalize sign → canonical conversion → finalize.
pub(crate) fn pipeline(
  w: Working,
  sign: Pole,
  scale: i64,
  cfg: &Config,
  tracer: &mut dyn Tracer,
) -> Sen {
  run(w, sign, scale, cfg, tracer, None, 0)
}

fn run(
  mut w: Working,
  mut sign: Pole,
  mut scale: i64,
  cfg: &Config,
  tracer: &mut dyn Tracer,
  scale_floor: Option<i64>,
  pass: u32,
) -> Sen {
  if pass >= MAX_PASSES {
    emit(tracer, TraceLevel::Info, Phase::Normalize, "pass limit hit, degrading to NaN", json!({
      "pass": pass,
    }));
    return Sen::nan();
  }

  emit(tracer, TraceLevel::Info, Phase::Normalize, "start", json!({
    "scale_in": scale,
    "len_in": w.len(),
    "pass": pass,
  }));
  let mut flags = Flags::NONE;

  // Strip: remove leading zero digits, and compress redundant leading pairs [d, −d] (the pair
  // has the same value as the single digit one position down). Both lower the scale by one per
  // step. During subnormal re-entry the scale is pinned at the floor and this stage is inert.
  let mut stripped = 0usize;
  loop {
    if let Some(floor) = scale_floor
      && scale <= floor
    {
      break;
    }
    if w.0.first() == Some(&0) {
      w.0.remove(0);
    } else if w.0.len() >= 2 && w.0[1] == -w.0[0] {
      w.0.remove(1);
    } else {
      break;
    }
    scale -= 1;
    stripped += 1;
  }

  if w.0.iter().all(|&d| d == 0) {
    // Everything cancelled: the canonical zero, sign reset to positive.
    emit(tracer, TraceLevel::Info, Phase::Normalize, "all digits cancelled", json!({}));
    return Sen::zero(Pole::Pos);
  }
  emit(tracer, TraceLevel::Debug, Phase::Normalize, "stripped", json!({
    "stripped": stripped,
    "scale": scale,
    "len": w.len(),
  }));

  // Round to precision.
  let Rounded { working, flags: round_flags, scale_adjust } =
    round_to_precision(w, sign, cfg, tracer);
  w = working;
  flags |= round_flags;
  scale = scale.saturating_add(scale_adjust);

  // Canonicalize the sign, then the digits.
  sign = w.normalize_sign(sign);
  emit(tracer, TraceLevel::Debug, Phase::Normalize, "sign canonicalized", json!({
    "sign": sign.as_str(),
    "scale": scale,
  }));
  let mantissa = w.into_canonical(&mut flags);

  finalize(sign, scale, mantissa, flags, cfg, tracer, pass)
}

/// Overflow, underflow and subnormal handling; the terminal stage of the pipeline.
fn finalize(
  sign: Pole,
  scale: i64,
  mantissa: Mantissa,
  mut flags: Flags,
  cfg: &Config,
  tracer: &mut dyn Tracer,
  pass: u32,
) -> Sen {
  if scale > cfg.e_max() {
    flags.overflow = true;
    emit(tracer, TraceLevel::Info, Phase::Finalize, "overflow to Inf", json!({
      "scale": scale,
      "e_max": cfg.e_max(),
    }));
    return Sen::inf(sign).with_flags(flags);
  }

  if scale < cfg.e_min() {
    if !cfg.subnormal_enabled() {
      flags.underflow = true;
      emit(tracer, TraceLevel::Info, Phase::Finalize, "underflow to zero", json!({
        "scale": scale,
        "e_min": cfg.e_min(),
      }));
      return Sen::zero(sign).with_flags(flags);
    }

    // Denormalize: shift the digits down so the leading weight sits at e_min, then re-enter
    // the pipeline with the scale pinned there. The prepended zeros are rewritten away
    // exactly, so the re-entry strips nothing and cannot underflow again. A shift deeper than
    // the precision only feeds the sticky digit, so it is capped.
    let shift = (cfg.e_min().saturating_sub(scale)).min(cfg.precision() as i64 + 2) as usize;
    flags.subnormal = true;
    emit(tracer, TraceLevel::Info, Phase::Finalize, "denormalizing to subnormal", json!({
      "scale": scale,
      "e_min": cfg.e_min(),
      "shift": shift,
    }));
    let mut w = mantissa.to_working().right_shifted(shift);
    carry::eliminate_zeros(&mut w);
    return run(w, sign, cfg.e_min(), cfg, tracer, Some(cfg.e_min()), pass + 1)
      .with_flags(flags);
  }

  emit(tracer, TraceLevel::Info, Phase::Finalize, "complete", json!({
    "scale": scale,
    "sign": sign.as_str(),
    "flags": flags,
  }));
  Sen::from_parts(Special::Normal, sign, scale, mantissa, flags)
}
