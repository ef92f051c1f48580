use super::*;

use super::trace::{emit, Phase, TraceLevel};
use serde_json::json;

/// Reduce one position value (digit plus incoming carry) to a balanced digit in {−1, 0, +1}
/// and an outgoing carry, preserving `v == digit + 2 · carry`.
///
/// This is a bounded loop rather than a recursion: convolution can pile up position values as
/// large as the operand length, and each loop step strictly shrinks `|v|`.
pub(crate) fn reduce_pole(mut v: i32) -> (i32, i32) {
  let mut carry = 0;
  while v > 1 {
    v -= 2;
    carry += 1;
  }
  while v < -1 {
    v += 2;
    carry -= 1;
  }
  (v, carry)
}

/// Exact zero-elimination sweep: the local rewrite `[0, d] → [d, −d]` (the digit above has
/// twice the weight, so `0·2w + d·w = d·2w − d·w`) applied from the least-significant end.
/// One backward pass bubbles every nonzero digit up past the zeros above it, so afterwards
/// zeros survive only as a trailing run — the one place they cannot be rewritten away.
pub(crate) fn eliminate_zeros(w: &mut Working) {
  let digits = &mut w.0;
  if digits.len() < 2 {
    return;
  }
  for i in (0..digits.len() - 1).rev() {
    if digits[i] == 0 && digits[i + 1] != 0 {
      digits[i] = digits[i + 1];
      digits[i + 1] = -digits[i + 1];
    }
  }
}

/// Resolve a raw digit sum into balanced {−1, 0, +1} digits, least significant first, carrying
/// between positions. A leftover carry past the most significant digit prepends new digits,
/// and the returned scale adjustment (one per prepended digit) keeps the represented value
/// anchored: the caller's digit 0 moved that many positions up in weight.
pub(crate) fn resolve_carries(mut w: Working, tracer: &mut dyn Tracer) -> (Working, i64) {
  let digits = &mut w.0;
  let mut carry = 0;
  for i in (0..digits.len()).rev() {
    let (digit, out) = reduce_pole(digits[i].saturating_add(carry));
    digits[i] = digit;
    carry = out;
  }

  let mut scale_adjust = 0i64;
  while carry != 0 {
    let (digit, out) = reduce_pole(carry);
    digits.insert(0, digit);
    carry = out;
    scale_adjust += 1;
  }

  eliminate_zeros(&mut w);

  emit(tracer, TraceLevel::Debug, Phase::Carry, "carries resolved", json!({
    "len": w.len(),
    "scale_adjust": scale_adjust,
  }));
  (w, scale_adjust)
}

#[cfg(test)]
mod tests {
  use super::*;

  /// The represented value of a working mantissa in units of its least significant digit.
  fn units(w: &Working) -> i64 {
    w.0.iter().fold(0i64, |acc, &d| acc * 2 + d as i64)
  }

  #[test]
  fn reduce_pole_table() {
    assert_eq!(reduce_pole(0), (0, 0));
    assert_eq!(reduce_pole(1), (1, 0));
    assert_eq!(reduce_pole(-1), (-1, 0));
    assert_eq!(reduce_pole(2), (0, 1));
    assert_eq!(reduce_pole(-2), (0, -1));
    assert_eq!(reduce_pole(3), (1, 1));
    assert_eq!(reduce_pole(-3), (-1, -1));
    // Far out of range: the loop keeps halving into the carry.
    assert_eq!(reduce_pole(17), (1, 8));
    assert_eq!(reduce_pole(-40), (0, -20));
  }

  #[test]
  fn reduce_pole_preserves_value() {
    for v in -100..=100 {
      let (digit, carry) = reduce_pole(v);
      assert!((-1..=1).contains(&digit));
      assert_eq!(digit + 2 * carry, v, "value not preserved for {v}");
    }
  }

  #[test]
  fn doubling_prepends_a_carry_digit() {
    // [2,2,2,2] is [+,+,+,+] added to itself; the resolved form is the same digit string one
    // position up, i.e. a scale adjustment of one and a trailing zero.
    let (w, adjust) = resolve_carries(Working(vec![2, 2, 2, 2]), &mut NullTracer);
    assert_eq!(w, Working(vec![1, 1, 1, 1, 0]));
    assert_eq!(adjust, 1);
  }

  #[test]
  fn resolution_preserves_value() {
    let cases = [
      vec![2, 2, 2, 2],
      vec![1, 2, 3, 4, 3, 2, 1],
      vec![0, -1, 3, -5, 2],
      vec![-4, 4, -4, 4],
      vec![1, 0, 0, 0, -1],
      vec![0, 0, 0],
    ];
    for digits in cases {
      let before = units(&Working(digits.clone()));
      let (resolved, adjust) = resolve_carries(Working(digits.clone()), &mut NullTracer);
      // `adjust` new digits were prepended, so the unit weight is unchanged.
      assert_eq!(units(&resolved), before, "value changed for {digits:?}");
      assert!(resolved.0.iter().all(|d| (-1..=1).contains(d)));
      assert_eq!(resolved.len() as i64, digits.len() as i64 + adjust);
    }
  }

  #[test]
  fn zeros_end_up_trailing_only() {
    let (w, _) = resolve_carries(Working(vec![1, 0, 0, 0, -1]), &mut NullTracer);
    assert_eq!(w, Working(vec![1, -1, 1, 1, 1]));

    let (w, _) = resolve_carries(Working(vec![1, 0, 1, 0, 0]), &mut NullTracer);
    let last_nonzero = w.0.iter().rposition(|&d| d != 0).unwrap();
    assert!(w.0[..=last_nonzero].iter().all(|&d| d != 0));
  }

  #[test]
  fn all_zero_stays_all_zero() {
    let (w, adjust) = resolve_carries(Working(vec![0, 0, 0, 0]), &mut NullTracer);
    assert_eq!(w, Working(vec![0, 0, 0, 0]));
    assert_eq!(adjust, 0);
  }

  #[test]
  fn large_convolution_values() {
    // A worst-case convolution column: everything lands on one position.
    let (w, adjust) = resolve_carries(Working(vec![0, 0, 0, 64]), &mut NullTracer);
    let before = 64;
    assert_eq!(units(&w), before);
    assert!(adjust >= 1);
    assert!(w.0.iter().all(|d| (-1..=1).contains(d)));
  }
}
