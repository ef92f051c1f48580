use super::*;

/// One of the four binary operations, as named by a test case.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Hash)]
pub enum Op {
  Add,
  Sub,
  Mul,
  Div,
}

impl Op {
  pub fn apply(self, a: &Sen, b: &Sen, cfg: &Config, tracer: &mut dyn Tracer) -> Sen {
    match self {
      Op::Add => a.add_traced(b, cfg, tracer),
      Op::Sub => a.sub_traced(b, cfg, tracer),
      Op::Mul => a.mul_traced(b, cfg, tracer),
      Op::Div => a.div_traced(b, cfg, tracer),
    }
  }
}

/// A deterministic test scenario: operands, configuration, and what to check on the result.
/// `expected` compares the value parts (special, sign, scale, mantissa); `expect_flags`
/// compares the full flag set. Either may be omitted for smoke cases.
#[derive(Clone, Debug)]
pub struct TestCase {
  pub name: String,
  pub cfg: Config,
  pub op: Op,
  pub a: Sen,
  pub b: Sen,
  pub expected: Option<Sen>,
  pub expect_flags: Option<Flags>,
  pub tags: Vec<&'static str>,
}

/// The outcome of running one [`TestCase`], with the full trace of the evaluated operation.
#[derive(Clone, Debug)]
pub struct TestResult {
  pub name: String,
  pub passed: bool,
  pub actual: Sen,
  pub flags: Flags,
  pub trace_events: Vec<TraceEvent>,
  pub tags: Vec<&'static str>,
}

/// Do two numbers have the same value shape, flags aside?
fn same_value(a: &Sen, b: &Sen) -> bool {
  a.special() == b.special()
    && a.sign() == b.sign()
    && a.scale() == b.scale()
    && a.mantissa() == b.mantissa()
}

fn operand(sign: Pole, scale: i64, poles: &[Pole]) -> Sen {
  Sen::normal(sign, scale, poles).expect("suite operands are statically well formed")
}

/// The core self-test suite: deterministic scenarios covering basic arithmetic, the special
/// tables, sign handling, rounding, and the overflow/underflow boundaries, all under the
/// given configuration's precision-4 sibling where exact expectations are stated.
///
/// The returned order is stable; an external runner may present or filter it however it
/// likes.
pub fn build_core_test_suite(cfg: &Config) -> Vec<TestCase> {
  use Pole::{Neg, Pos};
  let cfg = *cfg;
  let mut tests = Vec::new();

  tests.push(TestCase {
    name: "ADD: doubling shifts the scale".to_string(),
    cfg,
    op: Op::Add,
    a: operand(Pos, 0, &[Pos; 4]),
    b: operand(Pos, 0, &[Pos; 4]),
    expected: Some(operand(Pos, 1, &[Pos; 4])),
    expect_flags: Some(Flags::NONE),
    tags: vec!["arithmetic", "basic"],
  });

  tests.push(TestCase {
    name: "SUB: 3.75 - 1.875 = 1.875 exactly".to_string(),
    cfg,
    op: Op::Sub,
    a: operand(Pos, 1, &[Pos; 4]),
    b: operand(Pos, 0, &[Pos; 4]),
    expected: Some(operand(Pos, 0, &[Pos; 4])),
    expect_flags: Some(Flags::NONE),
    tags: vec!["arithmetic", "basic"],
  });

  tests.push(TestCase {
    name: "MUL: 3.75 × 1.75 rounds to 7".to_string(),
    cfg,
    op: Op::Mul,
    a: operand(Pos, 1, &[Pos; 4]),
    b: operand(Pos, 0, &[Pos, Pos, Pos]),
    expected: Some(operand(Pos, 2, &[Pos, Pos, Pos])),
    expect_flags: Some(Flags { inexact: true, rounded: true, ..Flags::NONE }),
    tags: vec!["arithmetic", "rounding"],
  });

  tests.push(TestCase {
    name: "DIV: x / 1 returns x".to_string(),
    cfg,
    op: Op::Div,
    a: operand(Pos, 2, &[Pos; 4]),
    b: Sen::one(),
    expected: Some(operand(Pos, 2, &[Pos; 4])),
    expect_flags: Some(Flags { inexact: true, ..Flags::NONE }),
    tags: vec!["arithmetic", "division"],
  });

  tests.push(TestCase {
    name: "ADD: 0 + x = x".to_string(),
    cfg,
    op: Op::Add,
    a: Sen::zero(Pos),
    b: operand(Pos, 2, &[Pos, Pos, Pos, Neg]),
    expected: Some(operand(Pos, 2, &[Pos, Pos, Pos, Neg])),
    expect_flags: Some(Flags::NONE),
    tags: vec!["special", "zero"],
  });

  tests.push(TestCase {
    name: "ADD: NaN + x = NaN".to_string(),
    cfg,
    op: Op::Add,
    a: Sen::nan(),
    b: operand(Pos, 0, &[Pos; 4]),
    expected: Some(Sen::nan()),
    expect_flags: Some(Flags { invalid: true, ..Flags::NONE }),
    tags: vec!["special", "nan"],
  });

  tests.push(TestCase {
    name: "ADD: Inf + x = Inf".to_string(),
    cfg,
    op: Op::Add,
    a: Sen::inf(Pos),
    b: operand(Pos, 0, &[Pos; 4]),
    expected: Some(Sen::inf(Pos)),
    expect_flags: Some(Flags::NONE),
    tags: vec!["special", "infinity"],
  });

  tests.push(TestCase {
    name: "ADD: Inf + (-Inf) = NaN".to_string(),
    cfg,
    op: Op::Add,
    a: Sen::inf(Pos),
    b: Sen::inf(Neg),
    expected: Some(Sen::nan()),
    expect_flags: Some(Flags { invalid: true, ..Flags::NONE }),
    tags: vec!["special", "infinity"],
  });

  tests.push(TestCase {
    name: "ADD: -1.875 + 3.75 = 1.875".to_string(),
    cfg,
    op: Op::Add,
    a: operand(Neg, 0, &[Pos; 4]),
    b: operand(Pos, 1, &[Pos; 4]),
    expected: Some(operand(Pos, 0, &[Pos; 4])),
    expect_flags: Some(Flags::NONE),
    tags: vec!["arithmetic", "signs"],
  });

  tests.push(TestCase {
    name: "ADD: overflow past e_max".to_string(),
    cfg,
    op: Op::Add,
    a: operand(Pos, cfg.e_max(), &[Pos; 4]),
    b: operand(Pos, cfg.e_max() - 1, &[Pos; 4]),
    expected: Some(Sen::inf(Pos)),
    expect_flags: Some(Flags { overflow: true, inexact: true, rounded: true, ..Flags::NONE }),
    tags: vec!["overflow"],
  });

  tests.push(TestCase {
    name: "SUB: x - x cancels to +0".to_string(),
    cfg,
    op: Op::Sub,
    a: operand(Pos, cfg.e_min(), &[Pos; 4]),
    b: operand(Pos, cfg.e_min(), &[Pos; 4]),
    expected: Some(Sen::zero(Pos)),
    expect_flags: Some(Flags::NONE),
    tags: vec!["cancellation", "normalization"],
  });

  tests.push(TestCase {
    name: "MUL: underflow below e_min".to_string(),
    cfg,
    op: Op::Mul,
    a: operand(Pos, cfg.e_min() / 2 - 1, &[Pos]),
    b: operand(Pos, cfg.e_min() / 2 - 1, &[Pos]),
    expected: if cfg.subnormal_enabled() { None } else { Some(Sen::zero(Pos)) },
    expect_flags: if cfg.subnormal_enabled() {
      None
    } else {
      Some(Flags { underflow: true, ..Flags::NONE })
    },
    tags: vec!["underflow", "normalization"],
  });

  tests.push(TestCase {
    name: "ADD: guard digit ties to even".to_string(),
    cfg,
    op: Op::Add,
    a: operand(Pos, 0, &[Pos, Neg, Neg, Pos]),
    b: operand(Pos, -2, &[Pos; 4]),
    expected: Some(operand(Pos, -1, &[Pos, Pos, Pos, Neg])),
    expect_flags: Some(Flags { inexact: true, ..Flags::NONE }),
    tags: vec!["rounding", "precision"],
  });

  tests.push(TestCase {
    name: "MUL: x × 0 = 0".to_string(),
    cfg,
    op: Op::Mul,
    a: operand(Pos, 2, &[Pos, Pos, Neg, Pos]),
    b: Sen::zero(Pos),
    expected: Some(Sen::zero(Pos)),
    expect_flags: Some(Flags::NONE),
    tags: vec!["special", "zero", "multiplication"],
  });

  tests.push(TestCase {
    name: "DIV: x / 0 = Inf".to_string(),
    cfg,
    op: Op::Div,
    a: operand(Pos, 2, &[Pos, Pos, Neg, Pos]),
    b: Sen::zero(Pos),
    expected: Some(Sen::inf(Pos)),
    expect_flags: Some(Flags::NONE),
    tags: vec!["special", "zero", "division"],
  });

  tests.push(TestCase {
    name: "DIV: 0 / 0 = NaN".to_string(),
    cfg,
    op: Op::Div,
    a: Sen::zero(Pos),
    b: Sen::zero(Pos),
    expected: Some(Sen::nan()),
    expect_flags: Some(Flags { invalid: true, ..Flags::NONE }),
    tags: vec!["special", "zero", "division"],
  });

  tests.push(TestCase {
    name: "MUL: (-x) × (-y) is positive".to_string(),
    cfg,
    op: Op::Mul,
    a: operand(Neg, 1, &[Pos; 4]),
    b: operand(Neg, 1, &[Pos, Pos, Pos]),
    expected: Some(operand(Pos, 3, &[Pos, Pos, Pos])),
    expect_flags: Some(Flags { inexact: true, rounded: true, ..Flags::NONE }),
    tags: vec!["multiplication", "signs"],
  });

  tests
}

/// Evaluate every case, collecting per-case traces and a real pass/fail verdict.
pub fn run_test_suite(cases: &[TestCase]) -> Vec<TestResult> {
  cases
    .iter()
    .map(|case| {
      let mut tracer = CollectingTracer::new();
      let actual = case.op.apply(&case.a, &case.b, &case.cfg, &mut tracer);
      let value_ok = case.expected.as_ref().map_or(true, |e| same_value(&actual, e));
      let flags_ok = case.expect_flags.map_or(true, |f| actual.flags() == f);
      TestResult {
        name: case.name.clone(),
        passed: value_ok && flags_ok,
        flags: actual.flags(),
        actual,
        trace_events: tracer.into_events(),
        tags: case.tags.clone(),
      }
    })
    .collect()
}
