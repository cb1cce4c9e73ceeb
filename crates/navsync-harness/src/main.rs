#![forbid(unsafe_code)]
#![allow(clippy::print_stdout)]

//! Replay the canonical navigation scenario and emit a JSONL trace.
//!
//! One JSON object per step: the step label, the view after the step, the
//! URL at the current stack position, and the ledger of effective history
//! writes so far. Useful for eyeballing engine behavior and for diffing
//! runs across changes.
//!
//! ```text
//! cargo run -p navsync-harness
//! ```

use navsync_core::NavAction;
use navsync_harness::{Scenario, WriteKind};
use serde_json::json;

fn emit(step: &str, scenario: &Scenario) {
    let writes: Vec<_> = scenario
        .writes()
        .iter()
        .map(|w| {
            json!({
                "kind": match w.kind {
                    WriteKind::Push => "push",
                    WriteKind::Replace => "replace",
                },
                "url": w.url,
            })
        })
        .collect();
    let line = json!({
        "step": step,
        "view": scenario.view().name(),
        "url": scenario.url(),
        "depth": scenario.depth(),
        "writes": writes,
    });
    println!("{line}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut s = Scenario::new();
    emit("start", &s);

    s.dispatch(NavAction::ShowLogin);
    s.settle();
    emit("show_login", &s);

    s.login();
    s.dispatch(NavAction::LoginSucceeded);
    s.settle();
    emit("login_succeeded", &s);

    s.set_fragment(Some("#/resource/42"));
    s.settle();
    emit("deep_link_42", &s);

    s.dispatch(NavAction::CloseResource);
    s.settle();
    emit("close_resource", &s);

    s.back();
    s.settle();
    emit("browser_back", &s);

    s.dispatch(NavAction::Logout);
    s.settle();
    emit("logout", &s);
}
