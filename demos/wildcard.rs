//! # Example: wildcard audit + error isolation
//!
//! A wildcard handler audits every emission; a failing handler shows that
//! dispatch continues and failures land in the configured error hook.

use std::sync::Arc;

use fanout::{BoxError, Config, Dispatcher, Handler, Key, Token};

fn main() {
    tracing_subscriber::fmt::init();

    let bus = Dispatcher::with_config(Config::<u64> {
        on_error: Some(Arc::new(|error: &BoxError, key: &Key, _payload: Option<&u64>| {
            println!("[on-error] key={key} error={error}");
        })),
        ..Config::default()
    });

    bus.on_all(Handler::wildcard(|key: &Key, payload: Option<&u64>| {
        println!("[audit] key={key} payload={payload:?}");
        Ok(())
    }))
    .expect("wildcard handler");

    bus.on("job-done", Handler::keyed(|_| Err("flaky downstream".into())))
        .expect("keyed handler");
    bus.on(
        "job-done",
        Handler::keyed(|id: Option<&u64>| {
            println!("[notify] job {id:?} finished");
            Ok(())
        }),
    )
    .expect("keyed handler");

    // The failing handler is reported, the notifier still runs, the
    // wildcard audits the emission either way.
    bus.emit("job-done", Some(&42));

    // Token keys address a channel only the token holder can name.
    let private = Token::labeled("internal-tick");
    bus.emit(&private, None); // only the audit handler sees this one
}
