//! Headless client: connect to a backend conversation and print the event
//! stream.
//!
//! Usage: `cargo run --example headless -- <conversation-id>` with the
//! backend URL taken from the config file (or the default localhost).

use std::sync::Arc;

use tether_protocol::OutgoingAction;
use tether_session::{
    ConnectionManager, NoopNotifier, SessionConfig, SessionEvent, StaticTokenProvider, WsTransport,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = SessionConfig::load();
    if let Some(id) = std::env::args().nth(1) {
        config.conversation_id = id;
    }

    let manager = ConnectionManager::new(
        config,
        Arc::new(WsTransport),
        Arc::new(StaticTokenProvider::new(
            std::env::var("TETHER_TOKEN").unwrap_or_default(),
        )),
        Arc::new(NoopNotifier),
    );

    let mut events = manager.subscribe();
    manager.connect()?;
    manager.send(OutgoingAction::message("hello from tether"))?;

    let state = manager.state();
    loop {
        let event = events.recv().await?;
        println!("{event:?}");
        if let SessionEvent::Closed {
            will_reconnect: false,
        } = event
        {
            break;
        }
        if let SessionEvent::ChatUpdated = event {
            if let Some(last) = state.read().chat().last() {
                println!("  chat: {}", last.content);
            }
        }
    }

    Ok(())
}
