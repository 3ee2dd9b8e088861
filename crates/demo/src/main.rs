mod arena;
mod bot;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use skirmish::{LoopbackRoom, TuningConfig};

use bot::Bot;

#[derive(Parser)]
#[command(name = "skirmish-demo")]
#[command(about = "Headless two-bot match over an in-process room")]
struct Args {
    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(short, long, default_value_t = 3600)]
    max_ticks: u32,

    #[arg(short, long, default_value_t = 20, help = "Ticks between shots")]
    fire_interval: u32,

    #[arg(short, long, default_value = "/arena")]
    room: String,

    #[arg(long, help = "JSON file overriding tuning values")]
    tuning: Option<PathBuf>,
}

fn load_tuning(path: Option<&Path>) -> Result<TuningConfig> {
    let Some(path) = path else {
        return Ok(TuningConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing tuning file {}", path.display()))?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_tuning(args.tuning.as_deref())?;

    let room = LoopbackRoom::new(args.room.as_str());
    let mut bots = [
        Bot::join(&room, "host", config.clone(), args.fire_interval),
        Bot::join(&room, "guest", config, args.fire_interval),
    ];
    log::info!("room {} open with {} clients", room.name(), room.member_count());

    let tick_rate = args.tick_rate.max(1);
    let delta_ms = 1000.0 / tick_rate as f32;
    let mut interval = tokio::time::interval(Duration::from_secs_f32(delta_ms / 1000.0));

    let mut ticks = 0;
    while ticks < args.max_ticks {
        interval.tick().await;
        ticks += 1;

        for bot in &mut bots {
            bot.sync();
        }
        for bot in &mut bots {
            bot.step(delta_ms);
            bot.report();
        }

        if bots.iter().all(Bot::is_over) {
            break;
        }
    }

    for bot in &mut bots {
        bot.sync();
        bot.report();
    }

    for bot in &bots {
        let session = bot.session();
        let health = session
            .local_player()
            .map(|p| p.health.current())
            .unwrap_or_default();
        log::info!(
            "{}: {} after {} ticks, health {}",
            bot.name(),
            session.state(),
            ticks,
            health
        );
    }

    Ok(())
}
