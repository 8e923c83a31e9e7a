//! BDD step definitions for response validation feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use homework_notifier::response;

use crate::world::{error_kind, NotifierWorld};

#[given("an API response:")]
fn api_response(world: &mut NotifierWorld, step: &Step) {
    let body = step.docstring.as_ref().expect("docstring with JSON body");
    world.response = Some(serde_json::from_str(body).expect("valid JSON in feature file"));
}

#[when("the response is validated")]
fn validate_response(world: &mut NotifierWorld) {
    let body = world.response.as_ref().expect("response not set");
    world.validation = Some(response::validate(body).map(|records| records.to_vec()));
}

#[then(expr = "validation should fail with {word}")]
fn validation_fails(world: &mut NotifierWorld, kind: String) {
    match world.validation.as_ref().expect("validation not run") {
        Ok(records) => panic!("expected {} but got {} record(s)", kind, records.len()),
        Err(e) => assert_eq!(error_kind(e), kind, "{e}"),
    }
}

#[then(expr = "validation should return {int} record(s)")]
fn validation_returns(world: &mut NotifierWorld, count: usize) {
    let records = world
        .validation
        .as_ref()
        .expect("validation not run")
        .as_ref()
        .expect("validation failed");
    assert_eq!(records.len(), count);
}

#[then(expr = "record {int} should be named {string}")]
fn record_named(world: &mut NotifierWorld, index: usize, name: String) {
    let records = world
        .validation
        .as_ref()
        .expect("validation not run")
        .as_ref()
        .expect("validation failed");
    assert_eq!(records[index]["homework_name"], name.as_str());
}
