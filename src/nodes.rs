//! Known node metadata, keyed by validator (or node) address.

use crate::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// What the operator knows about a node beyond the on-chain roster.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NodeInfo {
    pub name: Option<String>,
    pub ip: Option<String>,
}

impl NodeInfo {
    /// Name and IP, if both are known.
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        match (&self.name, &self.ip) {
            (Some(name), Some(ip)) => Some((name.as_str(), ip.as_str())),
            _ => None,
        }
    }
}

pub type NodeInfoMap = HashMap<String, NodeInfo>;

/// Loads the address → `{name, ip}` mapping from a JSON file.
pub fn load_node_info<P: AsRef<Path>>(path: P) -> Result<NodeInfoMap> {
    let path = path.as_ref();
    let config_error = |reason: String| ReportError::Config {
        path: path.display().to_string(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let map: NodeInfoMap =
        serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;
    debug!("{} node entries loaded from {}", map.len(), path.display());
    Ok(map)
}
