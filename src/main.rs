use clap::Parser;
use color_eyre::eyre::{
    Result,
    WrapErr,
    eyre,
};
use share_vegam::{
    app,
    config::GameConfig,
    i18n::Language,
    session::{
        Role,
        Session,
    },
};
use std::path::{
    Path,
    PathBuf,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling,
};
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

#[derive(Parser, Debug)]
#[command(name = "share-vegam", about = "Predict whether the market moves UP or DOWN")]
struct Args {
    /// JSON game config; defaults apply for missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the betting phase length in seconds
    #[arg(long)]
    betting_secs: Option<u32>,

    /// Override the result phase length in seconds
    #[arg(long)]
    result_secs: Option<u32>,

    /// Seed the outcome sampler for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "guest")]
    player: String,

    /// Play as admin, allowing the next result to be set
    #[arg(long)]
    admin: bool,

    /// Interface language: en or ta
    #[arg(long, default_value = "en")]
    lang: Language,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Write the result history as JSON here on exit
    #[arg(long)]
    history_out: Option<PathBuf>,
}

fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    // The terminal belongs to the UI, so logs go to a daily file
    let file_appender = rolling::daily(log_dir, "share-vegam.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;
    Ok(guard)
}

fn build_config(args: Args) -> Result<app::AppConfig> {
    let mut game = GameConfig::load(args.config.as_deref())?;
    if let Some(secs) = args.betting_secs {
        game.betting_secs = secs;
    }
    if let Some(secs) = args.result_secs {
        game.result_secs = secs;
    }
    game.validate().wrap_err("invalid game config")?;

    let role = if args.admin { Role::Admin } else { Role::Player };
    let session = Session::new(args.player, role, args.lang, game.denominations.clone());
    Ok(app::AppConfig {
        game,
        session,
        seed: args.seed,
        history_out: args.history_out,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let _guard = init_tracing(&args.log_dir)?;
    tracing::info!("starting share-vegam client");
    let config = build_config(args)?;
    app::run_app(config).await
}
