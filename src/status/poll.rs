//! Concurrent chain/version queries against every reachable node.

use crate::client::{ChainClient, ChainSnapshot};
use crate::version::Version;
use crate::*;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;

/// How one query ended.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    Done(T),
    TimedOut(Duration),
    Failed(failure::Error),
}

impl<T> TaskOutcome<T> {
    fn into_result(self) -> Result<T> {
        match self {
            TaskOutcome::Done(value) => Ok(value),
            TaskOutcome::TimedOut(limit) => Err(ReportError::Timeout(limit).into()),
            TaskOutcome::Failed(e) => Err(e),
        }
    }
}

/// Software version as reported by a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVersion {
    pub raw: String,
    /// `None` when `raw` is not a dotted numeric version.
    pub parsed: Option<Version>,
}

impl NodeVersion {
    pub fn new(raw: String) -> Self {
        let parsed = match raw.parse() {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("{}, treated as unknown", e);
                None
            }
        };
        NodeVersion { raw, parsed }
    }
}

/// Outcome of polling one node: both answers, or none.
#[derive(Clone, Debug, PartialEq)]
pub enum PollResult {
    Reachable {
        chain: ChainSnapshot,
        version: NodeVersion,
    },
    Unreachable,
}

enum Answer {
    Chain(TaskOutcome<ChainSnapshot>),
    Version(TaskOutcome<String>),
}

#[derive(Default)]
struct Pending {
    chain: Option<TaskOutcome<ChainSnapshot>>,
    version: Option<TaskOutcome<String>>,
}

impl Pending {
    fn finish(self) -> Result<PollResult> {
        let chain = self
            .chain
            .ok_or_else(|| format_err!("chain query did not complete"))?
            .into_result()?;
        let version = self
            .version
            .ok_or_else(|| format_err!("version query did not complete"))?
            .into_result()?;
        Ok(PollResult::Reachable {
            chain,
            version: NodeVersion::new(version),
        })
    }
}

/// Runs `query` once a worker slot is free, giving it at most `limit`.
async fn bounded<T, F>(workers: Arc<Semaphore>, limit: Duration, query: F) -> TaskOutcome<T>
where
    F: Future<Output = Result<T>>,
{
    let _permit = match workers.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return TaskOutcome::Failed(e.into()),
    };
    match timeout(limit, query).await {
        Ok(Ok(value)) => TaskOutcome::Done(value),
        Ok(Err(e)) => TaskOutcome::Failed(e),
        Err(_) => TaskOutcome::TimedOut(limit),
    }
}

/// Settings of the poll fan-out.
#[derive(Clone, Copy, Debug)]
pub struct PollOptions {
    pub concurrency: usize,
    pub timeout: Duration,
}

/// Queries chain state and version of every `(slot, ip)` target.
///
/// At most `concurrency` queries run at once. Failures stay with their
/// node: a node whose queries do not both succeed is `Unreachable`.
/// Returns once every query has finished or timed out.
pub async fn poll_nodes<C>(
    client: Arc<C>,
    targets: Vec<(usize, String)>,
    options: PollOptions,
) -> HashMap<usize, PollResult>
where
    C: ChainClient + ?Sized + 'static,
{
    let workers = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    let mut names = HashMap::new();

    for (slot, ip) in targets {
        {
            let (client, workers, ip) = (client.clone(), workers.clone(), ip.clone());
            tasks.spawn(async move {
                let outcome = bounded(workers, options.timeout, client.get_node_chain(&ip)).await;
                (slot, Answer::Chain(outcome))
            });
        }
        {
            let (client, workers, ip) = (client.clone(), workers.clone(), ip.clone());
            tasks.spawn(async move {
                let outcome = bounded(workers, options.timeout, client.get_node_version(&ip)).await;
                (slot, Answer::Version(outcome))
            });
        }
        names.insert(slot, ip);
    }

    let mut pending: HashMap<usize, Pending> = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((slot, Answer::Chain(outcome))) => pending.entry(slot).or_default().chain = Some(outcome),
            Ok((slot, Answer::Version(outcome))) => pending.entry(slot).or_default().version = Some(outcome),
            Err(e) => error!("poll task aborted: {}", e),
        }
    }

    names
        .into_iter()
        .map(|(slot, ip)| {
            let result = pending
                .remove(&slot)
                .unwrap_or_default()
                .finish()
                .unwrap_or_else(|e| {
                    warn!("node {} unreachable: {}", ip, e);
                    PollResult::Unreachable
                });
            (slot, result)
        })
        .collect()
}
