use bakup::config::{Cli, Config};
use bakup::store::S3ObjectStore;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage errors exit with code 1 (clap defaults to 2); --help and
    // --version still exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });

    let config = Config::from(cli);

    // Validate before touching any AWS configuration: fatal resolver
    // errors must abort the run with exit code 1 and no I/O.
    let target = bakup::resolver::resolve(&config.source, &config.destination)?;

    let store = S3ObjectStore::connect(config.profile.as_deref(), config.accelerate).await;
    bakup::commands::backup::run(&config, &target, &store).await;

    Ok(())
}
