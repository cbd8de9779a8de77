#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

/// Captures tracing events emitted on the current thread.
///
/// `#[tokio::test]` runs on a current-thread runtime, so events from the
/// code under test land here too.
pub struct TestLogCapture {
    logs: Arc<Mutex<Vec<CapturedLog>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

#[derive(Debug, Clone)]
pub struct CapturedLog {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedLog {
    fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle) || self.fields.iter().any(|(_, v)| v.contains(needle))
    }
}

impl TestLogCapture {
    /// Start capturing. Capture stops when the returned value is dropped.
    pub fn start() -> Self {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let layer = CaptureLayer {
            logs: Arc::clone(&logs),
        };
        let subscriber = tracing_subscriber::registry().with(layer);
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            logs,
            _guard: guard,
        }
    }

    /// Assert a message containing `needle` was logged.
    pub fn assert_logged(&self, needle: &str) {
        let logs = self.logs.lock().unwrap();
        assert!(
            logs.iter().any(|l| l.message.contains(needle)),
            "expected log containing '{needle}'. Logged: {:#?}",
            logs.iter().map(|l| &l.message).collect::<Vec<_>>()
        );
    }

    /// Assert a message containing `needle` was logged at `level`.
    pub fn assert_logged_at_level(&self, level: tracing::Level, needle: &str) {
        let logs = self.logs.lock().unwrap();
        assert!(
            logs.iter()
                .any(|l| l.level == level && l.message.contains(needle)),
            "expected {level} log containing '{needle}'. Logged: {:#?}",
            logs.iter()
                .filter(|l| l.level == level)
                .map(|l| &l.message)
                .collect::<Vec<_>>()
        );
    }

    /// Assert `needle` appears in no message and no field value.
    pub fn assert_not_logged(&self, needle: &str) {
        let logs = self.logs.lock().unwrap();
        let leaks: Vec<_> = logs.iter().filter(|l| l.mentions(needle)).collect();
        assert!(leaks.is_empty(), "'{needle}' leaked into logs: {leaks:#?}");
    }

    /// Assert a structured field was logged.
    pub fn assert_field_logged(&self, field_name: &str, field_value: &str) {
        let logs = self.logs.lock().unwrap();
        let found = logs.iter().any(|l| {
            l.fields
                .iter()
                .any(|(k, v)| k == field_name && v.contains(field_value))
        });
        assert!(
            found,
            "expected field {field_name}={field_value}. Logged fields: {:#?}",
            logs.iter().map(|l| &l.fields).collect::<Vec<_>>()
        );
    }

    pub fn logs(&self) -> Vec<CapturedLog> {
        self.logs.lock().unwrap().clone()
    }
}

struct CaptureLayer {
    logs: Arc<Mutex<Vec<CapturedLog>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.logs.lock().unwrap().push(CapturedLog {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn push(&mut self, name: &str, value: String) {
        if name == "message" {
            self.message = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field.name(), value.to_string());
    }
}
