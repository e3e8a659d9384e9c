use anyhow::Context;
use clap::Parser;
use config::Config;
use menu::Session;
use store::ExpenseStore;

mod chart;
mod compute;
mod config;
mod data;
mod menu;
mod store;
mod write;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let config = Config::parse();
    let store = ExpenseStore::new(&config.file);
    store
        .initialize()
        .with_context(|| format!("cannot initialize {}", store.path().display()))?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(store, &config, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
