#![forbid(unsafe_code)]

//! Command spans and session events.
//!
//! Run:
//!   cargo test -p folio-session --test session_tracing

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

use folio_core::LeafSeed;
use folio_session::{EditorSession, PastePosition, ResourceSettings, SessionConfig, ViewingDirection, ViewingHint};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct Captured {
    name: String,
    target: String,
    fields: HashMap<String, String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            target: attrs.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

impl Capture {
    fn messages(&self, text: &str) -> Vec<Captured> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.fields.get("message").is_some_and(|m| m == text))
            .cloned()
            .collect()
    }
}

fn session() -> EditorSession {
    let leaves = ["a", "b", "c"].iter().map(|r| LeafSeed::new(*r, "")).collect();
    EditorSession::load(leaves, None, ResourceSettings::default(), SessionConfig::default()).unwrap()
}

fn capture(f: impl FnOnce()) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn each_edit_opens_a_command_span() {
    let mut s = session();
    let captured = capture(|| {
        let root = s.tree().root();
        s.create_group(root, None).unwrap();
    });

    let spans = captured.spans.lock().unwrap().clone();
    let span = spans
        .iter()
        .find(|s| s.name == "folio.command")
        .expect("folio.command span");
    assert_eq!(span.target, "folio.command");
    assert_eq!(span.fields.get("command").map(String::as_str), Some("create_group"));

    let applied = captured.messages("command applied");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].target, "folio.session");
}

#[test]
fn viewing_settings_are_traced_as_commands() {
    let mut s = session();
    let applied_before = folio_session::instrument::commands_applied_total();
    let captured = capture(|| {
        s.set_viewing_direction(ViewingDirection::RightToLeft).unwrap();
        s.set_viewing_hint(ViewingHint::Paged).unwrap();
    });

    let spans = captured.spans.lock().unwrap().clone();
    let commands: Vec<_> = spans
        .iter()
        .filter(|s| s.name == "folio.command")
        .filter_map(|s| s.fields.get("command").cloned())
        .collect();
    assert_eq!(commands, ["set_viewing_direction", "set_viewing_hint"]);
    assert_eq!(captured.messages("command applied").len(), 2);
    assert!(folio_session::instrument::commands_applied_total() >= applied_before + 2);
    assert!(s.has_unsaved_changes());
}

#[test]
fn refused_edit_logs_rejection() {
    let mut s = session();
    let a = s.tree().leaves_in_order()[0];
    let captured = capture(|| {
        assert!(s.paste(a, PastePosition::After).is_err());
    });

    let rejected = captured.messages("command rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].fields.get("command").map(String::as_str), Some("paste"));
    assert!(rejected[0].fields.contains_key("error"));
    assert!(captured.messages("command applied").is_empty());
}

#[test]
fn stale_paste_warns() {
    let groups = vec![folio_core::GroupSeed::new("G").leaf("a")];
    let leaves = ["a", "b"].iter().map(|r| LeafSeed::new(*r, "")).collect();
    let mut s = EditorSession::load(leaves, Some(groups), ResourceSettings::default(), SessionConfig::default()).unwrap();
    let a = s.tree().leaves_in_order()[0];
    let group = s.tree().parent_of(a).unwrap();
    let b = s.tree().leaves_in_order()[1];
    s.cut_nodes(&[a]).unwrap();
    s.delete_group(group).unwrap();

    let captured = capture(|| {
        assert!(s.paste(b, PastePosition::After).is_err());
    });
    let warned = captured.messages("stale clipboard discarded");
    assert_eq!(warned.len(), 1);
    assert_eq!(warned[0].target, "folio.session");
}
