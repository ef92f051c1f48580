use super::*;

use super::carry;
use super::trace::{emit, Phase, TraceLevel};
use serde_json::json;

/// The outcome of rounding a working mantissa to the configured precision.
pub(crate) struct Rounded {
  /// At most `P` digits (trailing zeros may later be dropped by canonicalization).
  pub working: Working,
  pub flags: Flags,
  /// +1 when an increment carried out of the most significant kept digit.
  pub scale_adjust: i64,
}

/// Pad or truncate to exactly `P` kept digits and decide, per rounding mode, whether the kept
/// window is incremented to account for the discarded tail.
///
/// Guard is the first discarded digit, sticky whether any further discarded digit is nonzero.
/// In a balanced-digit mantissa the tail has a *direction*: a negative guard means the kept
/// window already over-represents the value, so nearest-style rounding never increments on a
/// negative tail (the directed modes keep their one-sided contracts and stay as specified).
pub(crate) fn round_to_precision(
  w: Working,
  sign: Pole,
  cfg: &Config,
  tracer: &mut dyn Tracer,
) -> Rounded {
  let p = cfg.precision() as usize;
  let mut kept = w.0;
  let mut flags = Flags::NONE;

  if kept.len() < p {
    kept.resize(p, 0);
  }
  let tail = kept.split_off(p);

  if tail.iter().all(|&d| d == 0) {
    emit(tracer, TraceLevel::Debug, Phase::Round, "no rounding needed", json!({
      "precision": p,
    }));
    return Rounded { working: Working(kept), flags, scale_adjust: 0 };
  }

  let guard = tail[0];
  let sticky = tail[1..].iter().any(|&d| d != 0);
  flags.inexact = guard != 0 || sticky;

  let increment = match cfg.round_mode() {
    RoundMode::TowardZero => false,
    RoundMode::Up => sign == Pole::Pos && (guard != 0 || sticky),
    RoundMode::Down => sign == Pole::Neg && (guard != 0 || sticky),
    RoundMode::NearestEven => {
      let direction = tail.iter().copied().find(|&d| d != 0).unwrap_or(0);
      if direction <= 0 {
        false
      } else if guard != 0 && !sticky {
        // Exact tie: round to the "even" pattern, where a kept last pole of +1 counts as odd.
        kept.last() == Some(&1)
      } else {
        true
      }
    }
    RoundMode::Stochastic => stochastic_decision(&tail, cfg.stoch_seed()),
  };

  emit(tracer, TraceLevel::Debug, Phase::Round, "rounding decision", json!({
    "guard": guard,
    "sticky": sticky,
    "increment": increment,
    "mode": cfg.round_mode(),
  }));

  let mut scale_adjust = 0;
  if increment {
    flags.rounded = true;
    // One unit at the kept least-significant weight, pushed through the same balanced carry
    // machinery as any other raw digit value. A carry out of digit 0 prepends and bumps the
    // scale; the window is then re-truncated to `P` (only just-created zeros can fall off).
    kept[p - 1] += 1;
    let (incremented, adjust) = carry::resolve_carries(Working(kept), tracer);
    kept = incremented.0;
    scale_adjust = adjust;
    kept.truncate(p);
  }

  Rounded { working: Working(kept), flags, scale_adjust }
}

/// The stochastic-rounding decision: a deterministic multiplicative hash of the seed and the
/// discarded tail, thresholded by how much of the tail is nonzero. Same seed and same tail
/// always produce the same answer; that determinism is part of the contract.
fn stochastic_decision(tail: &[i32], seed: u64) -> bool {
  let mut h = seed;
  for &d in tail {
    h = h.wrapping_mul(33) ^ (d + 2) as u64;
  }
  let magnitude = tail.iter().filter(|&&d| d != 0).count() as u64;
  h % 256 < magnitude * 256 / tail.len() as u64
}
