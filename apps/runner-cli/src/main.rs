use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use runner_common::{
    AppConfig, BASE_LANES, GameStatus, RUN_SPEED_BASE, STARTING_LIVES, TARGET_WORD, TOTAL_LEVELS,
};
use runner_hud::{Hud, HudView, group_thousands, select_offers};
use runner_kernel::GameStore;
use runner_render::{
    DebugTextRenderer, FollowCamera, Instance, Renderer, Scene, SceneLayer, Slot, lane_center,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runner-cli", about = "Headless tools for the runner client")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Settings file; missing files fall back to defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, game constants and effective settings
    Info,
    /// Step the follow camera for a viewport and lane count
    Camera {
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
        #[arg(short, long, default_value = "3")]
        lanes: u32,
        /// Frames to simulate
        #[arg(short, long, default_value = "30")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Dump the final frame through the text renderer
        #[arg(long)]
        render: bool,
    },
    /// Roll shop offers
    Shop {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(long)]
        double_jump: bool,
        #[arg(long)]
        immortality: bool,
        /// Rolls to print
        #[arg(short, long, default_value = "1")]
        rolls: u32,
    },
    /// Show the HUD screen for a scripted store in the given status
    Hud {
        /// menu, playing, shop, game-over or victory
        status: GameStatus,
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Credits to bank before reaching the status
        #[arg(long, default_value = "0")]
        credits: u64,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One marker box per lane, for the text renderer.
struct LaneMarkers(u32);

impl SceneLayer for LaneMarkers {
    fn emit(&self, out: &mut Vec<Instance>) {
        for lane in 0..self.0 {
            out.push(Instance::new(
                Vec3::new(lane_center(lane, self.0), 0.0, -10.0),
                Vec3::new(1.0, 0.1, 1.0),
                [0.5, 0.1, 0.9, 1.0],
            ));
        }
    }
}

struct Pilot;

impl SceneLayer for Pilot {
    fn emit(&self, out: &mut Vec<Instance>) {
        out.push(Instance::new(
            Vec3::new(0.0, 0.6, 0.0),
            Vec3::new(0.9, 0.8, 1.4),
            [0.0, 0.9, 1.0, 1.0],
        ));
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_or_default(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => {
            let mut config = AppConfig::default();
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            config
        }
    };
    tracing::debug!(
        source = %path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
        fov = config.render.fov_deg,
        max_pixel_ratio = config.render.max_pixel_ratio,
        "settings loaded"
    );
    Ok(config)
}

/// Drive a fresh store into `status`, banking `credits` on the way.
fn scripted_store(status: GameStatus, credits: u64) -> Result<GameStore> {
    let mut store = GameStore::new();
    if status == GameStatus::Menu {
        return Ok(store);
    }
    store.start_game();
    if credits > 0 {
        store.collect_gem(credits);
    }
    match status {
        GameStatus::Menu | GameStatus::Playing => {}
        GameStatus::Shop => store.open_shop()?,
        GameStatus::GameOver => while store.take_damage() {},
        GameStatus::Victory => {
            for _ in 0..TOTAL_LEVELS {
                store.close_shop();
                for i in 0..TARGET_WORD.len() {
                    store.collect_letter(i)?;
                }
            }
        }
    }
    let drained = store.drain_events().len();
    tracing::debug!(
        %status,
        score = store.score(),
        level = store.level(),
        drained,
        "scripted store ready"
    );
    Ok(store)
}

fn print_view(view: &HudView) {
    match view {
        HudView::Menu(menu) => {
            println!("{}{} {}", menu.title, menu.title_accent, menu.badge);
            println!("  [{}]  {}", menu.start_label, menu.controls_hint);
        }
        HudView::Shop(shop) => {
            println!("{}  credits={}", shop.title, shop.credits_text);
            for offer in &shop.offers {
                let mark = if offer.affordable { "" } else { " (locked)" };
                println!(
                    "  {:<14} {:>6}  {}{mark}",
                    offer.item.name,
                    group_thousands(offer.item.cost),
                    offer.item.description
                );
            }
            println!("  [{}]", shop.resume_label);
        }
        HudView::GameOver(over) => {
            println!("{}", over.title);
            println!("  {} {}/{}", over.level_label, over.level, over.total_levels);
            println!("  {} {}", over.gems_label, over.gems);
            println!("  {} {} LY", over.distance_label, over.distance_ly);
            println!("  {} {}", over.score_label, over.score_text);
            println!("  [{}]", over.retry_label);
        }
        HudView::Victory(win) => {
            println!("{}: {}", win.title, win.subtitle);
            println!("  {} {}", win.score_label, win.score_text);
            println!("  {} {}", win.gems_label, win.gems);
            println!("  {} {} LY", win.distance_label, win.distance_ly);
            println!("  [{}]", win.restart_label);
        }
        HudView::Playing(overlay) => {
            let hearts: String = overlay
                .hearts
                .iter()
                .map(|&filled| if filled { '#' } else { '.' })
                .collect();
            let letters: String = overlay
                .letters
                .iter()
                .map(|t| if t.collected { t.letter } else { '_' })
                .collect();
            println!("score {}  lives [{hearts}]", overlay.score_text);
            let shield = if overlay.shield_active {
                overlay.shield_label
            } else {
                ""
            };
            println!(
                "{} {}/{}  letters {letters}  {} {}%  {shield}",
                overlay.sector_label,
                overlay.level,
                overlay.total_levels,
                overlay.thrusters_label,
                overlay.thrusters_percent,
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("runner-cli v{}", env!("CARGO_PKG_VERSION"));
            let word: String = TARGET_WORD.iter().collect();
            println!("word: {word}  levels: {TOTAL_LEVELS}  lives: {STARTING_LIVES}");
            println!("base speed: {RUN_SPEED_BASE}  base lanes: {BASE_LANES}");
            println!(
                "window: {} {}x{}",
                config.window.title, config.window.width, config.window.height
            );
            println!(
                "render: fov={} max_pixel_ratio={} power={:?}",
                config.render.fov_deg, config.render.max_pixel_ratio, config.render.power_preference
            );
        }
        Commands::Camera {
            width,
            height,
            lanes,
            frames,
            dt,
            render,
        } => {
            let mut camera = FollowCamera::new(&config.camera, &config.render);
            camera.set_viewport(width, height);
            let target = camera.target(lanes);
            println!(
                "Viewport {width}x{height} (aspect {:.3}), lanes={lanes}",
                camera.aspect
            );
            println!(
                "Target: ({:.3}, {:.3}, {:.3})",
                target.x, target.y, target.z
            );
            for frame in 1..=frames {
                camera.update(lanes, dt);
                if frame == frames || frame % 10 == 0 {
                    let p = camera.position;
                    println!("  frame {frame:>4}: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
                }
            }
            if render {
                let markers = LaneMarkers(lanes);
                let frame = Scene::new()
                    .with(Slot::Environment, &markers)
                    .with(Slot::Player, &Pilot)
                    .compose();
                print!("{}", DebugTextRenderer::new().render(&frame, &camera));
            }
        }
        Commands::Shop {
            seed,
            double_jump,
            immortality,
            rolls,
        } => {
            let mut rng = StdRng::seed_from_u64(seed);
            println!("Shop rolls: seed={seed}, double_jump={double_jump}, immortality={immortality}");
            for roll in 1..=rolls {
                let names: Vec<&str> = select_offers(double_jump, immortality, &mut rng)
                    .iter()
                    .map(|item| item.name)
                    .collect();
                println!("  roll {roll}: {}", names.join(" | "));
            }
        }
        Commands::Hud {
            status,
            seed,
            credits,
            json,
        } => {
            let store = scripted_store(status, credits)?;
            let view = Hud::new().view(&store, &mut StdRng::seed_from_u64(seed));
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_store_reaches_every_status() {
        for status in GameStatus::ALL {
            let store = scripted_store(status, 0).unwrap();
            assert_eq!(store.status(), status);
            assert!(store.events().is_empty());
        }
    }

    #[test]
    fn credits_are_banked_before_the_shop() {
        let store = scripted_store(GameStatus::Shop, 2500).unwrap();
        assert_eq!(store.score(), 2500);
        let view = Hud::new().view(&store, &mut StdRng::seed_from_u64(1));
        let HudView::Shop(shop) = view else {
            panic!("expected shop");
        };
        assert_eq!(shop.credits_text, "2,500");
    }

    #[test]
    fn json_dump_carries_screen_labels() {
        let store = scripted_store(GameStatus::Victory, 0).unwrap();
        let view = Hud::new().view(&store, &mut StdRng::seed_from_u64(1));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["screen"], "victory");
        assert_eq!(json["score_label"], "FINAL DATA SCORE");
        assert_eq!(json["distance_label"], "TRAVEL DISTANCE");
    }

    #[test]
    fn lane_markers_follow_lane_count() {
        let markers = LaneMarkers(5);
        let frame = Scene::new().with(Slot::Environment, &markers).compose();
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.instances()[2].position.x, 0.0);
    }

    #[test]
    fn status_argument_accepts_kebab_case() {
        let cli = Cli::try_parse_from(["runner-cli", "hud", "game-over", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Hud {
                status: GameStatus::GameOver,
                json: true,
                ..
            }
        ));
    }
}
