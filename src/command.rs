use crate::client::ChainClient;
use crate::config::{ScanConfig, StatusConfig};
use crate::*;
use clap::ArgMatches;
use std::sync::Arc;

const STATUS: &str = "status";
const SCAN: &str = "scan";

/// A subcommand with its validated options.
#[derive(Clone, Debug)]
pub enum Command {
    Status(StatusConfig),
    Scan(ScanConfig),
}

impl Command {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        match matches.subcommand() {
            (STATUS, Some(sub)) => Ok(Command::Status(StatusConfig::from_matches(sub)?)),
            (SCAN, Some(sub)) => Ok(Command::Scan(ScanConfig::from_matches(sub)?)),
            (name, _) => bail!("unknown command {:?}, try --help", name),
        }
    }

    pub async fn execute<C>(self, client: Arc<C>) -> Result<()>
    where
        C: ChainClient + ?Sized + 'static,
    {
        match self {
            Command::Status(config) => status::show_status(client, &config).await,
            Command::Scan(config) => scan::show_scan(&*client, &config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BlockId;
    use crate::config::build_cli;

    #[test]
    fn test_from_matches() {
        let matches = build_cli()
            .get_matches_from_safe(&["icx", "scan", "0x10", "--nobase"])
            .unwrap();
        match Command::from_matches(&matches).unwrap() {
            Command::Scan(config) => {
                assert_eq!(config.start, BlockId::Height(16));
                assert_eq!(config.filter.predicates().len(), 1);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let matches = build_cli().get_matches_from_safe(&["icx", "status"]).unwrap();
        assert!(matches!(
            Command::from_matches(&matches).unwrap(),
            Command::Status(_)
        ));
    }

    #[test]
    fn test_invalid_options_fail_early() {
        let matches = build_cli()
            .get_matches_from_safe(&["icx", "scan", "--to", "nobody"])
            .unwrap();
        assert!(Command::from_matches(&matches).is_err());

        let matches = build_cli()
            .get_matches_from_safe(&["icx", "scan", "tip"])
            .unwrap();
        assert!(Command::from_matches(&matches).is_err());
    }
}
