use std::io;

use clap::Parser;
use rusty_bikeshare::app::BikeshareApp;
use rusty_bikeshare::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level().as_str()),
    )
    .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = BikeshareApp::new(config, stdin.lock(), stdout.lock());
    app.run()?;
    Ok(())
}
