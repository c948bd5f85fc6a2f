use super::types::{PRepList, SystemInfo};
use super::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// The chain contract that answers governance queries.
pub const CHAIN_SCORE: &str = "cx0000000000000000000000000000000000000000";

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

/// JSON-RPC client for the chain endpoint, plus plain HTTP for node admin APIs.
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    node_port: u16,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: &str, node_port: u16) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("icx-report/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(JsonRpcClient {
            http,
            url: url.to_owned(),
            node_port,
            next_id: AtomicU64::new(1),
        })
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Option<Value>) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "id": id,
        });
        if let Some(params) = params {
            body["params"] = params;
        }
        trace!("rpc request {}", body);

        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if let Some(error) = response.error {
            return Err(ReportError::Rpc {
                code: error.code,
                message: error.message,
            }
            .into());
        }
        Ok(serde_json::from_value(response.result.unwrap_or(Value::Null))?)
    }

    /// Read-only call of `method` on the contract at `to`.
    pub async fn call<T: DeserializeOwned>(&self, to: &str, method: &str) -> Result<T> {
        let params = json!({
            "to": to,
            "dataType": "call",
            "data": { "method": method },
        });
        self.request("icx_call", Some(params)).await
    }

    fn node_url(&self, ip: &str, path: &str) -> String {
        if ip.contains(':') {
            format!("http://{}{}", ip, path)
        } else {
            format!("http://{}:{}{}", ip, self.node_port, path)
        }
    }

    async fn node_get<T: DeserializeOwned>(&self, ip: &str, path: &str) -> Result<T> {
        let url = self.node_url(ip, path);
        trace!("node request {}", url);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    async fn get_block(&self, id: &BlockId) -> Result<Block> {
        match id {
            BlockId::Latest => self.request("icx_getLastBlock", None).await,
            BlockId::Height(height) => {
                let params = json!({ "height": format!("{:#x}", height) });
                self.request("icx_getBlockByHeight", Some(params)).await
            }
            BlockId::Hash(hash) => {
                let params = json!({ "hash": hash });
                self.request("icx_getBlockByHash", Some(params)).await
            }
        }
    }

    async fn get_term_info(&self) -> Result<TermInfo> {
        self.call(CHAIN_SCORE, "getIISSInfo").await
    }

    async fn get_preps(&self) -> Result<Vec<PRep>> {
        let list: PRepList = self.call(CHAIN_SCORE, "getPReps").await?;
        Ok(list.preps)
    }

    async fn get_node_chain(&self, ip: &str) -> Result<ChainSnapshot> {
        let chains: Vec<ChainSnapshot> = self.node_get(ip, "/admin/chain").await?;
        Ok(chains.into_iter().next().unwrap_or_default())
    }

    async fn get_node_version(&self, ip: &str) -> Result<String> {
        let system: SystemInfo = self.node_get(ip, "/admin/system").await?;
        // drop git describe suffixes such as "-12-gabcdef"
        let version = system.build_version.split('-').next().unwrap_or_default();
        Ok(version.to_owned())
    }
}
