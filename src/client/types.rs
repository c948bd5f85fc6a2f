//! Wire types returned by the chain endpoint and by node admin APIs.

use crate::utils::{parse_int, parse_u64};
use crate::*;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;
use std::fmt;

/// Accepts a JSON number, or a string holding hex (`0x…`) or decimal digits.
fn deserialize_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("invalid number {}", n))),
        Value::String(s) => parse_u64(&s).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

fn deserialize_u128<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u128, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| de::Error::custom(format!("invalid number {}", n))),
        Value::String(s) => parse_int(&s).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Block {
    #[serde(deserialize_with = "deserialize_u64")]
    pub height: u64,
    #[serde(default)]
    pub confirmed_transaction_list: Vec<Transaction>,
}

/// A confirmed transaction, as much of it as the scanner looks at.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Transaction {
    #[serde(rename = "txHash", alias = "tx_hash")]
    pub tx_hash: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    pub data: Option<Value>,
    pub value: Option<Value>,
}

impl Transaction {
    /// Name of the called method, for `call` transactions.
    pub fn method(&self) -> Option<&str> {
        self.data.as_ref()?.get("method")?.as_str()
    }

    /// The data type tag; plain coin transfers carry none.
    pub fn kind(&self) -> &str {
        self.data_type.as_deref().unwrap_or("transfer")
    }

    pub fn is_base(&self) -> bool {
        self.data_type.as_deref() == Some("base")
    }

    /// Transferred amount as sent on the wire, `None` if absent.
    pub fn value(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TermInfo {
    #[serde(rename = "nextPRepTerm", deserialize_with = "deserialize_u64")]
    pub next_term: u64,
}

/// Validator role, ordered from the highest tier down.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum Grade {
    Main,
    Sub,
    Candidate,
}

impl Grade {
    /// Short label used in the status table.
    pub fn label(self) -> &'static str {
        match self {
            Grade::Main => "Main",
            Grade::Sub => "Sub",
            Grade::Candidate => "Cand",
        }
    }

    pub fn is_lowest(self) -> bool {
        self == Grade::Candidate
    }
}

impl TryFrom<String> for Grade {
    type Error = ReportError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        match parse_int(&s).ok() {
            Some(0) => Ok(Grade::Main),
            Some(1) => Ok(Grade::Sub),
            Some(2) => Ok(Grade::Candidate),
            _ => Err(ReportError::InvalidGrade(s)),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One roster entry.
#[derive(Deserialize, Clone, Debug)]
pub struct PRep {
    pub address: String,
    #[serde(rename = "nodeAddress")]
    pub node_address: Option<String>,
    pub name: String,
    pub grade: Grade,
    #[serde(deserialize_with = "deserialize_u128")]
    pub power: u128,
}

impl PRep {
    /// The address a node file is keyed by: the node alias when it has one.
    pub fn display_address(&self) -> &str {
        self.node_address.as_deref().unwrap_or(&self.address)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct PRepList {
    pub preps: Vec<PRep>,
}

/// Chain state reported by a node's admin API.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChainSnapshot {
    pub height: Option<u64>,
    pub state: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct SystemInfo {
    #[serde(rename = "buildVersion")]
    pub build_version: String,
}
