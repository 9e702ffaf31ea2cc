//! Collects the tracing events emitted while a test runs.

use {
    std::{
        fmt::{self, Write as _},
        sync::{Arc, Mutex},
    },
    tracing::{
        Event,
        Level,
        Subscriber,
        field::{Field, Visit},
        subscriber::DefaultGuard,
    },
    tracing_subscriber::{
        Registry,
        layer::{Context, Layer, SubscriberExt as _},
    },
};

#[derive(Debug, Clone, Default)]
pub struct Logs(Arc<Mutex<Vec<(Level, String)>>>);

impl Logs {
    /// Records the events of the current thread until the guard is dropped.
    pub fn capture() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = Registry::default().with(CollectingLayer(logs.clone()));
        (logs, tracing::subscriber::set_default(subscriber))
    }

    /// Rendered events of exactly `level`, oldest first.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

struct CollectingLayer(Logs);

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = Line::default();
        event.record(&mut line);
        self.0
            .0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), line.0));
    }
}

/// The message of an event followed by its other fields as `name=value`.
#[derive(Default)]
struct Line(String);

impl Visit for Line {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        let _ = match field.name() {
            "message" => write!(self.0, "{value:?}"),
            name => write!(self.0, "{name}={value:?}"),
        };
    }
}
