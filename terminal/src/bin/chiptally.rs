#![warn(rust_2018_idioms)]

use std::io;
use std::str::FromStr;

use flexi_logger::LogSpecBuilder;
use log::{info, LevelFilter};

use chiptally_terminal::{run, settings};

fn main() -> anyhow::Result<()> {
    let settings = settings::load()?;
    setup_logger(&settings.logging)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = run(settings, stdin.lock(), stdout.lock())?;
    info!(
        "good-bye after {} rounds, world!",
        stats.rounds_finalized
    );
    Ok(())
}

fn setup_logger(l: &settings::Logging) -> anyhow::Result<()> {
    let mut spec_builder = LogSpecBuilder::new();
    spec_builder.default(LevelFilter::from_str(&l.level)?);
    let spec = spec_builder.build();
    let logger = flexi_logger::Logger::with(spec)
        .format(|w, now, r| flexi_logger::default_format(w, now, r));
    let logger = match &l.directory {
        Some(dir) => logger.log_to_file().directory(dir.as_str()),
        None => logger,
    };
    logger.start()?;
    Ok(())
}
