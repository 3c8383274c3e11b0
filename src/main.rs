use clap::Parser;
use provisioning_form::cli::{self, Cli};
use provisioning_form::config::Settings;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    debug!("Running {:?} with {:?}", cli.command, settings.output);

    let output = cli::run(&cli.command, &settings)?;
    println!("{}", output);

    Ok(())
}
