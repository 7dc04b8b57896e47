//! Dominion simulation binary.
//!
//! Composition root: loads `.env`, installs logging, reads the balance
//! configuration, seeds a small demo world and plays a few operations
//! against it.
//!
//! ```bash
//! RUST_LOG=debug DOMINION_SEED=7 cargo run -p dominion-sim
//! ```

mod config;
mod world;

use std::sync::Arc;

use anyhow::{Context, Result};
use dominion_content::ConfigLoader;
use dominion_core::{BattleKind, EffectKind, GameConfig, SpyMission};
use dominion_runtime::{
    Dominion, Event, FileSnapshotRepository, InMemoryStore, OperationResult, Topic,
};

use config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    let balance = load_balance(&config)?;

    let store = Arc::new(InMemoryStore::new());
    world::seed(&store).context("Failed to seed the demo world")?;

    let mut builder = Dominion::builder().game_config(balance).store(store.clone());
    if let Some(seed) = config.seed {
        builder = builder.rng_seed(seed);
    }
    let game = builder.build();
    let mut events = game.events().subscribe_multiple(&Topic::ALL);

    tracing::info!("Demo world ready");
    for actor in [world::VEX, world::ORIN, world::SABLE] {
        let profile = game.profile(actor)?;
        tracing::info!(
            %actor,
            offense = profile.offense.total_power,
            defense = profile.defense.total_power,
            spy = profile.spy.total_power,
            sentry = profile.sentry.total_power,
            income = profile.income.total_credit_income,
            "profile"
        );
    }

    report("intel", &game.spy(world::VEX, "Orin", SpyMission::Intel));
    report("plunder", &game.attack(world::VEX, world::ORIN, BattleKind::Plunder, 5));
    report(
        "high risk protocol",
        &game.purchase_effect(world::SABLE, EffectKind::HighRiskProtocol),
    );
    report("sabotage", &game.spy(world::SABLE, world::ORIN, SpyMission::Sabotage));
    game.effects()
        .add_effect(world::VEX, EffectKind::PeaceShield, 3_600, None)?;
    report("shielded attack", &game.attack(world::ORIN, world::VEX, BattleKind::Conquer, 3));

    for receiver in events.values_mut() {
        while let Ok(event) = receiver.try_recv() {
            log_event(&event);
        }
    }

    if let Some(dir) = &config.save_dir {
        let saves = FileSnapshotRepository::new(dir)
            .with_context(|| format!("Failed to open save directory {}", dir.display()))?;
        saves.save("demo", &store.snapshot()?)?;
        tracing::info!("World saved to {}", dir.display());
    }

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn load_balance(config: &SimConfig) -> Result<GameConfig> {
    match &config.balance_path {
        Some(path) => {
            tracing::info!("Loading balance from {}", path.display());
            ConfigLoader::load(path)
        }
        None => {
            let mut balance = GameConfig::standard();
            balance.merge(&ConfigLoader::bundled()?);
            Ok(balance)
        }
    }
}

fn report(label: &str, result: &OperationResult) {
    if result.success {
        tracing::info!("{label}: {}", result.message);
    } else {
        tracing::warn!(
            code = result.error_code.as_deref().unwrap_or("UNKNOWN"),
            "{label} failed: {}",
            result.message
        );
    }
}

fn log_event(event: &Event) {
    tracing::debug!(topic = ?event.topic(), "{:?}", event);
}
