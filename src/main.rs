use clap::Parser;

use smartlinker::cli::Cli;
use smartlinker::config::{get_config, init_config};
use smartlinker::runtime::modes::{self, Mode};
use smartlinker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => {
            // guard 必须存活到进程结束
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            anyhow::bail!("No execution mode available; build with the `server` or `cli` feature")
        }
    }
}
