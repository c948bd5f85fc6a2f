//! Runtime configuration, folded from the parsed command line.

use crate::client::BlockId;
use crate::scan::{ColumnId, TxFilter};
use crate::utils::expand_comma;
use crate::version::Version;
use crate::*;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://ctz.solidwallet.io/api/v3";
pub const DEFAULT_NODE_FILE: &str = "preps.json";
pub const DEFAULT_NODE_PORT: &str = "9000";
pub const DEFAULT_BLOCK_TIME: &str = "2";
pub const DEFAULT_TIMEOUT: &str = "10";
pub const DEFAULT_CONCURRENCY: &str = "32";

/// Command line of the `icx` binary.
pub fn build_cli() -> App<'static, 'static> {
    App::new("icx")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Validator status and transaction scanning for ICON networks")
        .setting(AppSettings::DisableHelpSubcommand)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("url")
                .long("url")
                .global(true)
                .takes_value(true)
                .value_name("URL")
                .env("ICON_ENDPOINT")
                .default_value(DEFAULT_ENDPOINT)
                .help("JSON-RPC endpoint of the network"),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .global(true)
                .takes_value(true)
                .value_name("PORT")
                .default_value(DEFAULT_NODE_PORT)
                .help("admin API port of nodes whose IP carries none"),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Shows liveness, height and version of every validator node")
                .arg(
                    Arg::with_name("file")
                        .long("file")
                        .takes_value(true)
                        .value_name("PATH")
                        .default_value(DEFAULT_NODE_FILE)
                        .help("JSON file mapping node addresses to {name, ip}"),
                )
                .arg(
                    Arg::with_name("version")
                        .long("version")
                        .takes_value(true)
                        .value_name("VERSION")
                        .help("baseline version (default: the latest one reported)"),
                )
                .arg(
                    Arg::with_name("block-time")
                        .long("block-time")
                        .takes_value(true)
                        .value_name("SECS")
                        .default_value(DEFAULT_BLOCK_TIME)
                        .help("block interval used to estimate the next term"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .long("timeout")
                        .takes_value(true)
                        .value_name("SECS")
                        .default_value(DEFAULT_TIMEOUT)
                        .help("deadline of a single node query"),
                )
                .arg(
                    Arg::with_name("concurrency")
                        .long("concurrency")
                        .takes_value(true)
                        .value_name("N")
                        .default_value(DEFAULT_CONCURRENCY)
                        .help("maximum number of node queries in flight"),
                ),
        )
        .subcommand(
            SubCommand::with_name("scan")
                .about("Scans blocks and prints the matching transactions")
                .after_help(concat!(
                    "COLUMNS: id, from, from..., type, method, to, to..., value\n",
                    "default: id,from...,type,method,to,value"
                ))
                .arg(
                    Arg::with_name("BLOCK")
                        .default_value("latest")
                        .help("starting block: latest, a height or a block hash"),
                )
                .arg(repeated("column").short("c").help("columns to display"))
                .arg(Arg::with_name("forward").long("forward").help("scan towards newer blocks"))
                .arg(Arg::with_name("nobase").long("nobase").help("skip base transactions"))
                .arg(repeated("to").help("receiver addresses"))
                .arg(repeated("from").help("sender addresses"))
                .arg(repeated("address").short("a").help("sender or receiver addresses"))
                .arg(repeated("method").short("m").help("called method names"))
                .arg(repeated("data_type").short("t").help("data types"))
                .arg(
                    Arg::with_name("count")
                        .long("count")
                        .takes_value(true)
                        .value_name("N")
                        .help("stop after N blocks"),
                ),
        )
}

fn repeated(name: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
}

/// Settings shared by every command.
#[derive(Clone, Debug)]
pub struct Config {
    pub url: String,
    pub node_port: u16,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(Config {
            url: matches.value_of("url").unwrap_or(DEFAULT_ENDPOINT).to_owned(),
            node_port: parse_or_default(matches, "port", DEFAULT_NODE_PORT)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct StatusConfig {
    pub file: PathBuf,
    /// Baseline override; the latest reported version otherwise.
    pub version: Option<Version>,
    /// Assumed block interval for the next-term estimate.
    pub block_time: Duration,
    /// Deadline of a single node query.
    pub timeout: Duration,
    pub concurrency: usize,
}

impl StatusConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let block_time = seconds(matches, "block-time", DEFAULT_BLOCK_TIME)?;
        let timeout = seconds(matches, "timeout", DEFAULT_TIMEOUT)?;
        let concurrency: usize = parse_or_default(matches, "concurrency", DEFAULT_CONCURRENCY)?;
        ensure!(concurrency > 0, "--concurrency must be at least 1");
        Ok(StatusConfig {
            file: PathBuf::from(matches.value_of("file").unwrap_or(DEFAULT_NODE_FILE)),
            version: parse_arg(matches, "version")?,
            block_time,
            timeout,
            concurrency,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub start: BlockId,
    pub columns: Vec<ColumnId>,
    pub forward: bool,
    pub filter: TxFilter,
    /// Number of blocks to visit; unbounded when `None`.
    pub count: Option<u64>,
}

impl ScanConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let start: BlockId = matches.value_of("BLOCK").unwrap_or("latest").parse()?;
        let columns = match values(matches, "column") {
            names if names.is_empty() => ColumnId::DEFAULTS.to_vec(),
            names => names
                .iter()
                .map(|name| name.parse())
                .collect::<std::result::Result<Vec<ColumnId>, _>>()?,
        };
        let filter = TxFilter::new(
            matches.is_present("nobase"),
            &values(matches, "to"),
            &values(matches, "from"),
            &values(matches, "address"),
            &values(matches, "method"),
            &values(matches, "data_type"),
        )?;
        Ok(ScanConfig {
            start,
            columns,
            forward: matches.is_present("forward"),
            filter,
            count: parse_arg(matches, "count")?,
        })
    }
}

/// All occurrences of a repeatable option, comma lists expanded.
fn values(matches: &ArgMatches, name: &str) -> Vec<String> {
    let raw: Vec<&str> = matches.values_of(name).map(Iterator::collect).unwrap_or_default();
    expand_comma(&raw)
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match matches.value_of(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| format_err!("invalid value {:?} for --{}: {}", raw, name, e)),
    }
}

/// Like `parse_arg`, falling back to the option's default text.
fn parse_or_default<T>(matches: &ArgMatches, name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = matches.value_of(name).unwrap_or(default);
    raw.parse()
        .map_err(|e| format_err!("invalid value {:?} for --{}: {}", raw, name, e))
}

/// A positive, finite number of seconds that fits a `Duration`.
fn seconds(matches: &ArgMatches, name: &str, default: &str) -> Result<Duration> {
    let secs: f64 = parse_or_default(matches, name, default)?;
    ensure!(
        secs.is_finite() && secs > 0.0,
        "--{} must be a positive number of seconds, got {}",
        name,
        secs
    );
    Duration::try_from_secs_f64(secs)
        .map_err(|e| format_err!("invalid value {} for --{}: {}", secs, name, e))
}
