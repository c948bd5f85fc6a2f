//! In-memory `ChainClient` for tests.

use super::*;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct FakeNode {
    pub chain: Option<ChainSnapshot>,
    pub version: Option<String>,
    pub delay: Option<Duration>,
}

impl FakeNode {
    pub fn up(height: u64, version: &str) -> Self {
        FakeNode {
            chain: Some(ChainSnapshot {
                height: Some(height),
                state: Some("started".to_owned()),
            }),
            version: Some(version.to_owned()),
            delay: None,
        }
    }

    pub fn down() -> Self {
        FakeNode::default()
    }
}

#[derive(Default)]
pub struct FakeClient {
    pub next_term: u64,
    pub preps: Vec<PRep>,
    pub nodes: HashMap<String, FakeNode>,
    pub blocks: HashMap<u64, Block>,
    pub latest: u64,
    pub fetched: Mutex<Vec<BlockId>>,
}

impl FakeClient {
    pub fn fetched(&self) -> Vec<BlockId> {
        self.fetched.lock().unwrap().clone()
    }

    fn node(&self, ip: &str) -> Result<&FakeNode> {
        self.nodes
            .get(ip)
            .ok_or_else(|| format_err!("connection refused: {}", ip))
    }

    async fn wait(&self, ip: &str) {
        if let Some(delay) = self.nodes.get(ip).and_then(|n| n.delay) {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ChainClient for FakeClient {
    async fn get_block(&self, id: &BlockId) -> Result<Block> {
        self.fetched.lock().unwrap().push(id.clone());
        let height = match id {
            BlockId::Latest => self.latest,
            BlockId::Height(height) => *height,
            BlockId::Hash(hash) => bail!("unknown block hash {}", hash),
        };
        match self.blocks.get(&height) {
            Some(block) => Ok(block.clone()),
            None => Err(ReportError::Rpc {
                code: -32602,
                message: format!("no block at {}", height),
            }
            .into()),
        }
    }

    async fn get_term_info(&self) -> Result<TermInfo> {
        Ok(TermInfo {
            next_term: self.next_term,
        })
    }

    async fn get_preps(&self) -> Result<Vec<PRep>> {
        Ok(self.preps.clone())
    }

    async fn get_node_chain(&self, ip: &str) -> Result<ChainSnapshot> {
        self.wait(ip).await;
        self.node(ip)?
            .chain
            .clone()
            .ok_or_else(|| format_err!("chain query failed: {}", ip))
    }

    async fn get_node_version(&self, ip: &str) -> Result<String> {
        self.wait(ip).await;
        self.node(ip)?
            .version
            .clone()
            .ok_or_else(|| format_err!("version query failed: {}", ip))
    }
}

pub fn prep(address: &str, name: &str, grade: Grade, power: u128) -> PRep {
    PRep {
        address: address.to_owned(),
        node_address: None,
        name: name.to_owned(),
        grade,
        power,
    }
}

pub fn block(height: u64, txs: Vec<Transaction>) -> Block {
    Block {
        height,
        confirmed_transaction_list: txs,
    }
}
