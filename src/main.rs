// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use pokedle::{DataSource, GameConfig, GameSession};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    // Logs go to stderr and stay quiet unless something is wrong
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::default();
    let source = DataSource::resolve(&config);
    let pokedex = source
        .load()
        .with_context(|| format!("Failed to load Pokédex from {}", source.describe()))?;

    let session = GameSession::new(pokedex, StdRng::from_os_rng())
        .with_hint_placeholder(config.hint_placeholder);

    run(session, &config)
}

#[cfg(feature = "tui")]
fn run(session: GameSession, config: &GameConfig) -> Result<()> {
    let mut app = ui::App::new(session, config);
    ui::run_ui(&mut app)?;

    println!("Thanks for playing Pokedle!");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run(mut session: GameSession, _config: &GameConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    pokedle::console::run_console(&mut session, stdin.lock(), &mut stdout)
        .context("Console session failed")?;
    Ok(())
}
