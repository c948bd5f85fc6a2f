//! Access to the chain endpoint and to node admin APIs.

#[cfg(test)]
pub(crate) mod fake;
mod rpc;
mod types;

use crate::utils::parse_u64;
use crate::*;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub use rpc::{JsonRpcClient, CHAIN_SCORE};
pub use types::{Block, ChainSnapshot, Grade, PRep, TermInfo, Transaction};

/// Everything the reporting tools ask of the network.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_block(&self, id: &BlockId) -> Result<Block>;

    /// Network-wide term information, from the chain contract.
    async fn get_term_info(&self) -> Result<TermInfo>;

    /// The registered validator roster, in chain order.
    async fn get_preps(&self) -> Result<Vec<PRep>>;

    async fn get_node_chain(&self, ip: &str) -> Result<ChainSnapshot>;

    async fn get_node_version(&self, ip: &str) -> Result<String>;
}

const HASH_HEX_LEN: usize = 64;

/// Which block to fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockId {
    Latest,
    Height(u64),
    Hash(String),
}

impl FromStr for BlockId {
    type Err = failure::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(BlockId::Latest);
        }
        if let Some(hex) = s.strip_prefix("0x") {
            if hex.len() == HASH_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(BlockId::Hash(s.to_lowercase()));
            }
        }
        parse_u64(s)
            .map(BlockId::Height)
            .map_err(|_| ReportError::InvalidBlock(s.to_owned()).into())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str("latest"),
            BlockId::Height(height) => write!(f, "{}", height),
            BlockId::Hash(hash) => f.write_str(hash),
        }
    }
}
