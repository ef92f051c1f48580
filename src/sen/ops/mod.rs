use super::*;

use super::carry;
use super::trace::{emit, Phase, TraceLevel};
use serde_json::json;

/// Addition and subtraction (`a - b` is `a + (-b)` after its own special table).
mod add;

/// Convolution multiplication.
mod mul;

/// Division via Newton–Raphson reciprocal.
mod div;

/// Bring two operands to a common scale. Each working mantissa is right-shifted (zeros
/// prepended) by the distance between its scale and the larger one, then both are padded at
/// the least-significant end to a common length so the digit-wise sum lines up index by index.
pub(super) fn align(a: &Sen, b: &Sen, tracer: &mut dyn Tracer) -> (Working, Working, i64) {
  let common = a.scale().max(b.scale());
  let shift_a = (common - a.scale()) as usize;
  let shift_b = (common - b.scale()) as usize;

  emit(tracer, TraceLevel::Info, Phase::Align, "aligning scales", json!({
    "a_scale": a.scale(),
    "b_scale": b.scale(),
    "common": common,
    "shift_a": shift_a,
    "shift_b": shift_b,
  }));

  let mut wa = a.mantissa().to_working().right_shifted(shift_a);
  let mut wb = b.mantissa().to_working().right_shifted(shift_b);
  let len = wa.len().max(wb.len());
  wa.pad_tail(len);
  wb.pad_tail(len);
  (wa, wb, common)
}

/// Digit-wise sum of two equal-length working mantissas, fed through carry resolution.
/// Returns the resolved digits and the scale adjustment from any carry out of digit 0.
pub(super) fn add_working(mut a: Working, b: &Working, tracer: &mut dyn Tracer) -> (Working, i64) {
  debug_assert_eq!(a.len(), b.len(), "operands must be aligned before the digit-wise sum");
  for (x, &y) in a.0.iter_mut().zip(&b.0) {
    *x += y;
  }
  emit(tracer, TraceLevel::Debug, Phase::AddRaw, "digit-wise sum", json!({"len": a.len()}));
  carry::resolve_carries(a, tracer)
}

/// Raw addition of two (digits, scale) pairs that are not yet aligned; the number-level add
/// wraps this, and the reciprocal iteration uses it directly for `2 − d·x`.
pub(super) fn add_raw(
  a: (Working, i64),
  b: (Working, i64),
  tracer: &mut dyn Tracer,
) -> (Working, i64) {
  let (wa, sa) = a;
  let (wb, sb) = b;
  let common = sa.max(sb);
  let mut wa = wa.right_shifted((common - sa) as usize);
  let mut wb = wb.right_shifted((common - sb) as usize);
  let len = wa.len().max(wb.len());
  wa.pad_tail(len);
  wb.pad_tail(len);
  let (sum, adjust) = add_working(wa, &wb, tracer);
  (sum, common.saturating_add(adjust))
}

/// Convolution of two pole sequences: `acc[i + j] += a[i] · b[j]`. The accumulator gets two
/// trailing guard positions beyond the full product length; carry resolution squeezes the
/// integer cells back into balanced digits.
pub(super) fn mul_working(a: &Working, b: &Working, tracer: &mut dyn Tracer) -> (Working, i64) {
  let la = a.len();
  let lb = b.len();
  let mut acc = vec![0i32; la + lb + 2];
  for (i, &da) in a.0.iter().enumerate() {
    for (j, &db) in b.0.iter().enumerate() {
      acc[i + j] += da * db;
    }
  }
  emit(tracer, TraceLevel::Debug, Phase::MulRaw, "convolution accumulated", json!({
    "len": acc.len(),
  }));
  carry::resolve_carries(Working(acc), tracer)
}

#[cfg(test)]
mod tests {
  use super::*;
  use Pole::Pos;

  #[test]
  fn align_pads_the_tail() {
    let a = Sen::normal(Pos, 0, &[Pos; 4]).unwrap();
    let b = Sen::normal(Pos, -2, &[Pos; 4]).unwrap();
    let (wa, wb, common) = align(&a, &b, &mut NullTracer);
    assert_eq!(common, 0);
    assert_eq!(wa, Working(vec![1, 1, 1, 1, 0, 0]));
    assert_eq!(wb, Working(vec![0, 0, 1, 1, 1, 1]));
  }

  #[test]
  fn convolution_against_unit_is_identity() {
    let a = Working(vec![1, -1, 1, 1]);
    let unit = Working(vec![1]);
    let (prod, adjust) = mul_working(&a, &unit, &mut NullTracer);
    assert_eq!(adjust, 0);
    assert_eq!(&prod.0[..4], &[1, -1, 1, 1]);
    assert!(prod.0[4..].iter().all(|&d| d == 0));
  }

  #[test]
  fn add_raw_aligns_scales() {
    // 2 − 0.9375: the single digit [+] at scale 1 against [+,+,+,+] at scale −1.
    let two = (Working(vec![1]), 1);
    let x = (Working(vec![1, 1, 1, 1]).negated(), -1);
    let (sum, scale) = add_raw(two, x, &mut NullTracer);
    // 1.0625 = 17/16, with the redundant leading pair still present at this stage.
    assert_eq!(scale, 1);
    assert_eq!(sum, Working(vec![1, -1, 1, -1, -1, -1]));
  }
}
