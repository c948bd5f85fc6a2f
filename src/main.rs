#[macro_use]
extern crate log;

use clap::ArgMatches;
use colored::*;
use env_logger::Env;
use icx_report::config::build_cli;
use icx_report::{Command, Config, JsonRpcClient};
use std::process;
use std::sync::Arc;

const ERR_COLOR: &str = "red";

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    env_logger::from_env(Env::default().default_filter_or("warn")).init();

    info!("icx {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&matches).await {
        eprintln!("{}", format!("error: {}", e).color(ERR_COLOR));
        process::exit(1);
    }
}

async fn run(matches: &ArgMatches<'_>) -> icx_report::Result<()> {
    let config = Config::from_matches(matches)?;
    let command = Command::from_matches(matches)?;
    debug!("{:?}", config);
    debug!("{:?}", command);

    let client = Arc::new(JsonRpcClient::new(&config.url, config.node_port)?);
    command.execute(client).await
}
