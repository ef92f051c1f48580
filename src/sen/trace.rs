use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TraceLevel {
  Info,
  Debug,
}

/// The pipeline phase a trace event belongs to.
#[derive(Clone, Copy, Debug)]
#[derive(Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
  Op,
  Special,
  Align,
  AddRaw,
  MulRaw,
  Carry,
  Round,
  Normalize,
  Finalize,
  Recip,
}

/// One structured event from inside an operation: which phase emitted it, a short human
/// message, and a JSON snapshot of whatever values were relevant at that point.
#[derive(Clone, Debug, Serialize)]
pub struct TraceEvent {
  pub level: TraceLevel,
  pub phase: Phase,
  pub message: String,
  pub snapshot: Value,
}

/// A sink for [`TraceEvent`]s, owned by the caller for the duration of one top-level
/// operation. Must not be shared between concurrent operations.
pub trait Tracer {
  fn emit(&mut self, event: TraceEvent);
}

/// Discards every event. The default tracer of the untraced operation variants.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
  fn emit(&mut self, _event: TraceEvent) {}
}

/// Appends every event to an owned, ordered buffer.
#[derive(Clone, Debug, Default)]
pub struct CollectingTracer {
  events: Vec<TraceEvent>,
}

impl CollectingTracer {
  pub fn new() -> CollectingTracer {
    CollectingTracer::default()
  }

  pub fn events(&self) -> &[TraceEvent] {
    &self.events
  }

  pub fn into_events(self) -> Vec<TraceEvent> {
    self.events
  }

  pub fn clear(&mut self) {
    self.events.clear();
  }
}

impl Tracer for CollectingTracer {
  fn emit(&mut self, event: TraceEvent) {
    self.events.push(event);
  }
}

pub(crate) fn emit(
  tracer: &mut dyn Tracer,
  level: TraceLevel,
  phase: Phase,
  message: &str,
  snapshot: Value,
) {
  tracer.emit(TraceEvent { level, phase, message: message.to_string(), snapshot });
}
