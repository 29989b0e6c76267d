//! Capturing layer for asserting on `tracing` output in tests.
//!
//! Install a [`CaptureLayer`] on a registry with
//! `tracing::subscriber::with_default`, run the code under test, then inspect
//! [`CaptureLayer::spans`] and [`CaptureLayer::events`].

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Field values keyed by field name, rendered as strings.
pub type Fields = HashMap<String, String>;

/// A span recorded when it closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSpan {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An event recorded when it was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Level the event was emitted at.
    pub level: Level,
    /// Target the event was emitted from.
    pub target: String,
    /// Fields attached to the event, including `message`.
    pub fields: Fields,
}

impl CapturedEvent {
    /// Returns the event's `message` field, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Layer that stores closed spans and emitted events in memory.
///
/// Clones share storage, so keep one clone for assertions and hand the other
/// to the subscriber.
///
/// # Examples
/// ```
/// use netreach_test_support::capture::CaptureLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = CaptureLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let span = tracing::info_span!("demo", answer = 42);
///     span.in_scope(|| tracing::info!(node = 3, "visited"));
/// });
///
/// assert_eq!(layer.span("demo").and_then(|s| s.fields.get("answer").cloned()), Some("42".into()));
/// assert_eq!(layer.events_with_message("visited").len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CaptureLayer {
    inner: Arc<Mutex<Captured>>,
}

impl CaptureLayer {
    /// Returns the closed spans in the order they closed.
    #[must_use]
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.lock().spans.clone()
    }

    /// Returns the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().events.clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<CapturedSpan> {
        self.lock().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Returns every event whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        // Keep reporting after a test panicked mid-capture.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

struct PendingSpan(CapturedSpan);

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut FieldCollector(&mut fields));
        span.extensions_mut().insert(PendingSpan(CapturedSpan {
            name: attrs.metadata().name().to_owned(),
            fields,
        }));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldCollector(&mut pending.0.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(PendingSpan(closed)) = span.extensions_mut().remove::<PendingSpan>() {
            self.lock().spans.push(closed);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldCollector(&mut fields));
        let metadata = event.metadata();
        self.lock().events.push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }
}

struct FieldCollector<'a>(&'a mut Fields);

impl FieldCollector<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldCollector<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt;

    #[rstest]
    fn records_late_span_fields_and_event_levels() {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("work", outcome = tracing::field::Empty);
            span.in_scope(|| tracing::warn!(flag = true, ratio = 0.5, "halfway"));
            span.record("outcome", "done");
        });

        let span = layer.span("work").expect("span must be captured on close");
        assert_eq!(span.fields.get("outcome").map(String::as_str), Some("done"));

        let events = layer.events_with_message("halfway");
        let event = events.first().expect("event must be captured");
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.fields.get("flag").map(String::as_str), Some("true"));
        assert_eq!(event.fields.get("ratio").map(String::as_str), Some("0.5"));
    }

    #[rstest]
    fn clones_share_storage() {
        let layer = CaptureLayer::default();
        let handle = layer.clone();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || tracing::info!("hello"));
        assert_eq!(handle.events().len(), 1);
        assert!(handle.spans().is_empty());
    }
}
