//! The `status` report: one row per validator node plus a summary line.

mod poll;
mod report;
mod roster;

use crate::client::ChainClient;
use crate::config::StatusConfig;
use crate::nodes::{load_node_info, NodeInfoMap};
use crate::*;
use chrono::Local;
use std::io::{stdout, Write};
use std::sync::Arc;

pub use poll::{poll_nodes, NodeVersion, PollOptions, PollResult, TaskOutcome};
pub use report::{is_late, version_verdict, StatusReport, Summary, VersionVerdict};
pub use roster::{resolve_roster, NodeRow, Slot};

/// Fetches the term and the roster, then polls every node with a known IP.
///
/// Failing to get the term or the roster is fatal. Node failures only
/// mark that node unreachable.
pub async fn collect_status<C>(
    client: Arc<C>,
    nodes: &NodeInfoMap,
    config: &StatusConfig,
) -> Result<StatusReport>
where
    C: ChainClient + ?Sized + 'static,
{
    let term = client.get_term_info().await?;
    let preps = client.get_preps().await?;
    info!("{} validators registered, next term at {}", preps.len(), term.next_term);

    let mut slots = resolve_roster(&preps, nodes);
    let targets: Vec<(usize, String)> = slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Node(row) => row.ip.clone().map(|ip| (row.index, ip)),
            Slot::Hidden => None,
        })
        .collect();
    debug!("polling {} nodes", targets.len());

    let options = PollOptions {
        concurrency: config.concurrency,
        timeout: config.timeout,
    };
    let mut results = poll_nodes(client, targets, options).await;
    for slot in slots.iter_mut() {
        if let Slot::Node(row) = slot {
            if let Some(result) = results.remove(&row.index) {
                row.poll = result;
            }
        }
    }

    Ok(StatusReport::new(
        slots,
        term.next_term,
        config.version.clone(),
        config.block_time,
    ))
}

/// Runs the whole `status` command against stdout.
pub async fn show_status<C>(client: Arc<C>, config: &StatusConfig) -> Result<()>
where
    C: ChainClient + ?Sized + 'static,
{
    let nodes = load_node_info(&config.file)?;
    let report = collect_status(client, &nodes, config).await?;

    let stdout = stdout();
    let mut out = stdout.lock();
    let summary = report.render(&mut out, Local::now())?;
    out.flush()?;
    debug!("{:?}", summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{prep, FakeClient, FakeNode};
    use crate::client::Grade;
    use crate::nodes::NodeInfo;
    use std::path::PathBuf;
    use std::time::Duration;

    fn address(n: u8) -> String {
        format!("hx{:040x}", n)
    }

    fn config(version: Option<&str>) -> StatusConfig {
        StatusConfig {
            file: PathBuf::from("unused.json"),
            version: version.map(|v| v.parse().unwrap()),
            block_time: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
            concurrency: 4,
        }
    }

    fn network() -> (FakeClient, NodeInfoMap) {
        let mut client = FakeClient {
            next_term: 2000,
            ..FakeClient::default()
        };
        let mut nodes = NodeInfoMap::new();
        let entries = vec![
            ("alpha", Grade::Main, 10, Some(FakeNode::up(1000, "1.3.0"))),
            ("beta", Grade::Main, 10, Some(FakeNode::up(996, "1.2.9"))),
            ("gamma", Grade::Candidate, 0, None),
            ("delta", Grade::Sub, 5, Some(FakeNode::down())),
            ("epsilon", Grade::Sub, 5, Some(FakeNode::up(998, "1.3.1"))),
        ];
        for (i, (name, grade, power, node)) in entries.into_iter().enumerate() {
            let addr = address(i as u8 + 1);
            client.preps.push(prep(&addr, name, grade, power));
            if let Some(node) = node {
                let ip = format!("10.0.0.{}", i + 1);
                nodes.insert(
                    addr,
                    NodeInfo {
                        name: Some(name.to_owned()),
                        ip: Some(ip.clone()),
                    },
                );
                client.nodes.insert(ip, node);
            }
        }
        (client, nodes)
    }

    fn row(report: &StatusReport, index: usize) -> &NodeRow {
        match &report.slots[index] {
            Slot::Node(row) => row,
            Slot::Hidden => panic!("slot {} is hidden", index),
        }
    }

    #[tokio::test]
    async fn test_collect_status() {
        let (client, nodes) = network();
        let report = collect_status(Arc::new(client), &nodes, &config(None)).await.unwrap();

        assert_eq!(report.slots.len(), 5);
        assert_eq!(report.top_height, 1000);
        assert_eq!(report.next_term, 2000);
        assert_eq!(report.last_version, Some("1.3.1".parse().unwrap()));
        assert_eq!(report.baseline, report.last_version);

        assert!(matches!(row(&report, 0).poll, PollResult::Reachable { .. }));
        assert!(matches!(report.slots[2], Slot::Hidden));
        assert_eq!(row(&report, 3).poll, PollResult::Unreachable);
        assert_eq!(row(&report, 3).index, 3);
    }

    #[tokio::test]
    async fn test_status_table() {
        let (client, nodes) = network();
        let report = collect_status(Arc::new(client), &nodes, &config(Some("1.3.0")))
            .await
            .unwrap();

        let mut out = Vec::new();
        let summary = report.render(&mut out, Local::now()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // the hidden candidate is skipped, index 2 never shows up
        assert_eq!(lines.len(), 5);
        assert!(!text.contains("[  2]"));
        assert!(lines[1].contains("1.2.9"));
        assert!(lines[1].contains("(-4)"));
        assert!(lines[2].contains("FAIL"));
        assert!(lines[3].contains("[  4] epsilon"));

        assert_eq!(summary.reachable, 3);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.updated_main, 1);
        assert!(lines[4].contains("1.3.0 Updated: 1 / 2 / 3"));
    }

    #[tokio::test]
    async fn test_roster_failure_is_fatal() {
        struct NoRoster;

        #[async_trait::async_trait]
        impl ChainClient for NoRoster {
            async fn get_block(&self, _: &crate::client::BlockId) -> Result<crate::client::Block> {
                unreachable!()
            }
            async fn get_term_info(&self) -> Result<crate::client::TermInfo> {
                Ok(crate::client::TermInfo { next_term: 1 })
            }
            async fn get_preps(&self) -> Result<Vec<crate::client::PRep>> {
                Err(format_err!("endpoint down"))
            }
            async fn get_node_chain(&self, _: &str) -> Result<crate::client::ChainSnapshot> {
                unreachable!()
            }
            async fn get_node_version(&self, _: &str) -> Result<String> {
                unreachable!()
            }
        }

        let nodes = NodeInfoMap::new();
        assert!(collect_status(Arc::new(NoRoster), &nodes, &config(None)).await.is_err());
    }
}
