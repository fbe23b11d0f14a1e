use std::path::Path;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use motion_desktop::{run_app, MotionConfig, CONFIG_FILE_NAME};

fn main() {
    let config = MotionConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    // Init logging
    let log_filter = config
        .as_ref()
        .map(|config| config.log_filter.clone())
        .unwrap_or_else(|_| "info".into());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(log_filter))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Motion config error: {e}");
            return;
        }
    };

    info!("Motion starting");
    if let Err(e) = run_app(config) {
        eprintln!("Motion error: {e}");
    }
}
