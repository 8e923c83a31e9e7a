//! BDD step definitions for status message rendering feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::json;

use homework_notifier::status;

use crate::world::{error_kind, NotifierWorld};

#[given(expr = "a homework {string} with status {string}")]
fn homework_with_status(world: &mut NotifierWorld, name: String, status: String) {
    world.record = Some(json!({"homework_name": name, "status": status}));
}

#[given("a homework record:")]
fn homework_record(world: &mut NotifierWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("docstring with JSON record");
    world.record = Some(serde_json::from_str(body).expect("valid JSON in feature file"));
}

#[when("the record is rendered")]
fn render_record(world: &mut NotifierWorld) {
    let record = world.record.as_ref().expect("record not set");
    world.rendered = Some(status::render(record));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut NotifierWorld, expected: String) {
    let rendered = world.rendered.as_ref().expect("record not rendered");
    assert_eq!(rendered.as_ref().expect("rendering failed"), &expected);
}

#[then(expr = "the message should contain {string}")]
fn message_contains(world: &mut NotifierWorld, expected: String) {
    let rendered = world.rendered.as_ref().expect("record not rendered");
    let message = rendered.as_ref().expect("rendering failed");
    assert!(message.contains(&expected), "{message}");
}

#[then(expr = "rendering should fail with {word}")]
fn rendering_fails(world: &mut NotifierWorld, kind: String) {
    match world.rendered.as_ref().expect("record not rendered") {
        Ok(message) => panic!("expected {} but got {:?}", kind, message),
        Err(e) => assert_eq!(error_kind(e), kind, "{e}"),
    }
}
