use clap::Parser;
use tracing_subscriber::EnvFilter;

use dbfs::cli::{log_filter, Args, Settings};
use dbfs::config::ConfigFile;
use dbfs::db::LazyConnection;
use dbfs::fs::DbFs;

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file = ConfigFile::load()?;
    let settings = Settings::resolve(&args, file)?;
    tracing::debug!(
        backend = settings.database.backend().as_str(),
        target = %settings.database.display_target(),
        "resolved settings"
    );

    let conn = LazyConnection::new(settings.database.clone());
    let mut fs = DbFs::new(settings.database.dialect(), settings.codec, conn);

    let output = args.command.run(&mut fs, &settings)?;
    println!("{}", output);
    Ok(())
}
