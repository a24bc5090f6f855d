//! # Example: keyed subscriptions
//!
//! Registers a couple of handlers on one key, emits, cancels, emits again.
//! Run with `RUST_LOG=warn` to see the soft-cap warning fire.

use fanout::{Config, Dispatcher, Handler};

fn main() {
    tracing_subscriber::fmt::init();

    // Tight cap to demonstrate the (non-blocking) soft-limit warning.
    let bus = Dispatcher::with_config(Config::<String> {
        max_listeners: 2,
        ..Config::default()
    });

    let stored = bus
        .on(
            "saved",
            Handler::keyed(|path: Option<&String>| {
                println!("[stored] path={path:?}");
                Ok(())
            }),
        )
        .expect("keyed handler");

    bus.once(
        "saved",
        Handler::keyed(|path: Option<&String>| {
            println!("[first-save-only] path={path:?}");
            Ok(())
        }),
    )
    .expect("keyed handler");

    // Third registration on the key: warns, still succeeds.
    bus.on("saved", Handler::keyed(|_| Ok(())))
        .expect("keyed handler");

    bus.emit("saved", Some(&"/tmp/a.txt".to_string()));
    bus.emit("saved", Some(&"/tmp/b.txt".to_string())); // once-handler is gone

    stored.cancel();
    bus.emit("saved", None); // nobody prints anymore
}
