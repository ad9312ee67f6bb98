//! In-memory event capture for logging assertions
//!
//! Installs a global subscriber once per test binary. Tests run in
//! parallel against the same capture, so assertions should select events
//! by an operation name or `call_id` unique to the test.

use deepeq_core_types::schema::{FIELD_CALL_ID, FIELD_EVENT, FIELD_OP};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One emitted event, fields rendered to strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn call_id(&self) -> Option<&str> {
        self.field(FIELD_CALL_ID)
    }

    /// True for the `event` phase of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type Events = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer appending every event to a shared buffer
pub struct CaptureLayer {
    events: Events,
}

impl CaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Events::default();
        (
            Self {
                events: events.clone(),
            },
            TestCapture { events },
        )
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Read handle on the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Events,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events of one operation, in emission order
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.op() == Some(op))
    }

    /// Events sharing one `call_id`, in emission order
    pub fn events_for_call(&self, call_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.call_id() == Some(call_id))
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.matching(predicate).len()
    }

    /// # Panics
    ///
    /// Panics if no `event` phase of `op` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={op} event={event} not found in {} captured events",
            events.len()
        );
    }

    fn matching<F>(&self, predicate: F) -> Vec<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().into_iter().filter(|e| predicate(e)).collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber (first call only) and return its handle
///
/// # Example
///
/// ```
/// use deepeq_core::logging_facility::test_capture::init_test_capture;
/// use deepeq_core::{deep_equal, Value};
///
/// let capture = init_test_capture();
/// deep_equal(&Value::from(1), &Value::from(1)).unwrap();
/// capture.assert_event_exists("deep_equal", "end");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = CaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_rendered_to_strings() {
        let (layer, capture) = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(op = "walk", event = "start", depth = 3u64, path = %".A", cyclic = false);
        });

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].is("walk", "start"));
        assert_eq!(events[0].field("depth"), Some("3"));
        assert_eq!(events[0].field("path"), Some(".A"));
        assert_eq!(events[0].field("cyclic"), Some("false"));
        assert_eq!(events[0].level, Level::INFO);
    }

    #[test]
    fn test_events_grouped_by_call() {
        let (layer, capture) = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(op = "deep_equal", event = "start", call_id = "c1");
            tracing::info!(op = "deep_equal", event = "start", call_id = "c2");
            tracing::info!(op = "deep_equal", event = "end", call_id = "c1");
        });

        let c1 = capture.events_for_call("c1");
        assert_eq!(c1.len(), 2);
        assert!(c1[1].is("deep_equal", "end"));
        assert_eq!(capture.events_for("deep_equal").len(), 3);
    }
}
