use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::tasks::{block_on, poll_once, AsyncComputeTaskPool, Task};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tg_core::{Biome, CoastlinePolicy, GenerationConfig, TerrainResult, TgCorePlugin};
use tg_noise::{GenerationProgress, MapCache, Phase, TerrainMap, TgNoisePlugin};
use tg_persistence::{load_preset, save_preset, PresetIoError};

/// Generate a terrain map, cache it and answer point queries against it.
#[derive(Parser, Debug, Clone)]
#[command(name = "terragen", version)]
struct Cli {
    /// Elevation threshold below which cells become ocean [default: 0.15]
    #[arg(long)]
    sea_level: Option<f64>,

    /// Map width in cells [default: 600]
    #[arg(long)]
    width: Option<usize>,

    /// Map height in cells [default: 400]
    #[arg(long)]
    height: Option<usize>,

    /// RON preset to start from; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Coastline handling
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Write the effective config to this RON file
    #[arg(long)]
    save_preset: Option<PathBuf>,

    /// Cell to look up after generation, as `x,y`; repeatable
    #[arg(long = "query", value_parser = parse_point)]
    queries: Vec<(i64, i64)>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Blended,
    Unblended,
}

impl From<PolicyArg> for CoastlinePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Blended => CoastlinePolicy::Blended,
            PolicyArg::Unblended => CoastlinePolicy::Unblended,
        }
    }
}

fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok((x, y))
}

fn main() -> AppExit {
    let cli = Cli::parse();

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(10))),
            LogPlugin::default(),
            StatesPlugin,
        ))
        .init_state::<AppPhase>()
        .insert_resource(CliArgs(cli))
        .init_resource::<GenerationTask>()
        .add_plugins((TgCorePlugin, TgNoisePlugin))
        .add_systems(Startup, apply_cli)
        .add_systems(OnEnter(AppPhase::Generating), start_generation)
        .add_systems(Update, poll_generation.run_if(in_state(AppPhase::Generating)))
        .add_systems(OnEnter(AppPhase::Ready), answer_queries)
        .run()
}

/// Parsed command line, kept for the systems that need it.
#[derive(Resource)]
struct CliArgs(Cli);

/// Application phase - config, generating, or ready.
#[derive(States, Default, Clone, Eq, PartialEq, Hash, Debug)]
enum AppPhase {
    #[default]
    Config,
    Generating,
    Ready,
}

/// Background generation task and progress tracking.
#[derive(Resource, Default)]
struct GenerationTask {
    task: Option<Task<TerrainResult<TerrainMap>>>,
    progress: Option<Arc<GenerationProgress>>,
    started: Option<Instant>,
    /// Last logged progress, in quarters.
    logged_quarters: u32,
}

/// Merge preset and flags into the generation config.
fn build_config(cli: &Cli) -> Result<GenerationConfig, PresetIoError> {
    let mut config = match &cli.config {
        Some(path) => load_preset(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(sea_level) = cli.sea_level {
        config.sea_level = sea_level;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(policy) = cli.policy {
        config.coastline_policy = policy.into();
    }
    config.validate()?;
    Ok(config)
}

fn apply_cli(
    cli: Res<CliArgs>,
    mut config: ResMut<GenerationConfig>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut exit: EventWriter<AppExit>,
) {
    match build_config(&cli.0) {
        Ok(built) => *config = built,
        Err(err) => {
            error!("Cannot generate: {err}");
            exit.send(AppExit::error());
            return;
        }
    }

    if let Some(path) = &cli.0.save_preset {
        match save_preset(path, &config) {
            Ok(()) => info!("Saved preset to {}", path.display()),
            Err(err) => warn!("Could not save preset to {}: {err}", path.display()),
        }
    }

    next_phase.set(AppPhase::Generating);
}

/// Start background generation task.
fn start_generation(config: Res<GenerationConfig>, mut task_res: ResMut<GenerationTask>) {
    let config = config.clone();
    info!(
        "Generating {}x{} map at sea level {} ({} coastline)...",
        config.width,
        config.height,
        config.sea_level,
        config.coastline_policy.name()
    );

    let progress = Arc::new(GenerationProgress::new(config.height));
    let progress_clone = progress.clone();

    let task = AsyncComputeTaskPool::get().spawn(async move {
        TerrainMap::generate_with_progress(&config, &progress_clone)
    });

    task_res.task = Some(task);
    task_res.progress = Some(progress);
    task_res.started = Some(Instant::now());
    task_res.logged_quarters = 0;
}

/// Poll generation task, cache the map and transition when complete.
fn poll_generation(
    mut task_res: ResMut<GenerationTask>,
    cache: Res<MapCache>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(progress) = task_res.progress.clone() {
        let quarters = (progress.overall() * 4.0) as u32;
        if quarters > task_res.logged_quarters && quarters < 4 {
            task_res.logged_quarters = quarters;
            let phases: Vec<String> = Phase::all()
                .iter()
                .map(|p| format!("{} {:.0}%", p.name(), progress.fraction(*p) * 100.0))
                .collect();
            info!("Generation progress: {}", phases.join(", "));
        }
    }

    let Some(ref mut task) = task_res.task else { return };
    let Some(result) = block_on(poll_once(task)) else { return };

    let elapsed = task_res.started.map(|s| s.elapsed()).unwrap_or_default();
    task_res.task = None;
    task_res.progress = None;

    match result {
        Ok(map) => {
            log_summary(&map, elapsed);
            cache.store(map);
            next_phase.set(AppPhase::Ready);
        }
        Err(err) => {
            error!("Generation failed: {err}");
            exit.send(AppExit::error());
        }
    }
}

fn log_summary(map: &TerrainMap, elapsed: Duration) {
    let (lowest, highest) = map.elevation_range();
    info!(
        "Map ready in {:.2?}: {}x{}, {:.1}% land, elevation {:.3}..{:.3}",
        elapsed,
        map.width(),
        map.height(),
        map.land_fraction() * 100.0,
        lowest,
        highest
    );

    let histogram = map.biome_histogram();
    let counts: Vec<String> = Biome::all()
        .iter()
        .map(|b| format!("{} {}", b, histogram[b.index()]))
        .collect();
    info!("Biomes: {}", counts.join(", "));
}

/// Answer the requested point queries from the cache, then exit.
fn answer_queries(cli: Res<CliArgs>, cache: Res<MapCache>, mut exit: EventWriter<AppExit>) {
    for &(x, y) in &cli.0.queries {
        match tg_noise::query_point(&cache, x, y) {
            Ok(cell) => info!(
                "({x}, {y}): {} elevation {:.4}, temperature {:.4}, moisture {:.4}",
                cell.biome,
                cell.elevation,
                cell.temperature,
                cell.moisture
            ),
            Err(err) => warn!("({x}, {y}): {err}"),
        }
    }
    exit.send(AppExit::Success);
}
