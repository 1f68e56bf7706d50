use anyhow::{Context, Result};
use jfrog_cli_installer::commands::install;
use jfrog_cli_installer::core::config::Config;
use jfrog_cli_installer::core::precondition::{self, Npm, MIN_NPM_VERSION};
use jfrog_cli_installer::utils::telemetry;

fn run() -> Result<()> {
    precondition::ensure(&Npm, MIN_NPM_VERSION)?;

    let install_dir = std::env::current_dir().context("cannot determine the working directory")?;
    let config = Config::load(&install_dir).context("failed to load installer configuration")?;

    install::install(&config).with_context(|| {
        format!(
            "failed to install JFrog CLI {} for {}",
            config.version, config.target.tag
        )
    })?;

    Ok(())
}

fn main() {
    telemetry::init_tracing(tracing::Level::WARN);

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
