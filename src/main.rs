use pricelens::{build_dashboard, DashboardInput, EngineConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricelens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();

    let input = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading dashboard snapshot from {}", path);
            DashboardInput::from_path(&path)?
        }
        None => DashboardInput::from_reader(std::io::stdin().lock())?,
    };

    let view = build_dashboard(&input, &config)?;
    info!(
        "Rendered {} candles, indicator {:?}",
        view.chart.candles.len(),
        input.indicator
    );

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
