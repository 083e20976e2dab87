use beacon_demo::config::{DEFAULT_CONFIG_FILE, load_config};
use beacon_demo::game;
use beacon_emitter::Emitter;
use beacon_logger::Logger;
use std::borrow::Cow;
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(path.as_deref())?;
    let _logger = Logger::init(&config.log)?;
    info!(
        source = %path.as_deref().map_or_else(|| Cow::Borrowed(DEFAULT_CONFIG_FILE), |p| p.to_string_lossy()),
        emitter = %config.emitter.name,
        max_listeners = config.emitter.max_listeners,
        "Configuration loaded"
    );

    let emitter = Emitter::with_config(config.emitter);
    let summary = game::play(&emitter);

    info!(
        moves = summary.moves.len(),
        start_listeners = summary.start_listeners,
        game_over = summary.game_over.len(),
        cleared = summary.cleared,
        "Game events finished"
    );
    Ok(())
}
