use clap::Parser;
use tracing::debug;

use vigless::cli::{self, Cli};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = cli.config_path();

    let config = match cli::load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            cli::report_error(&e, config_path.as_deref());
            std::process::exit(1);
        }
    };

    config.init_logging();
    debug!(config = ?config_path, "vigless starting");

    if let Err(e) = cli::execute(cli, config) {
        cli::report_error(&e, None);
        std::process::exit(1);
    }
}
