use failure::Fail;
use std::time::Duration;

/// Errors raised by the reporting tools themselves.
///
/// Transport and decoding failures from `reqwest`/`serde_json` are not
/// wrapped; they travel as `failure::Error` next to these.
#[derive(Debug, Fail)]
pub enum ReportError {
    #[fail(display = "cannot load node info from {}: {}", path, reason)]
    Config { path: String, reason: String },

    #[fail(display = "malformed version string {:?}", _0)]
    VersionParse(String),

    #[fail(display = "invalid address {:?}", _0)]
    InvalidAddress(String),

    #[fail(display = "invalid block id {:?} (expected latest, a height or a block hash)", _0)]
    InvalidBlock(String),

    #[fail(display = "unknown column {:?}", _0)]
    UnknownColumn(String),

    #[fail(display = "invalid grade {:?}", _0)]
    InvalidGrade(String),

    #[fail(display = "invalid number {:?}", _0)]
    InvalidNumber(String),

    #[fail(display = "rpc error {}: {}", code, message)]
    Rpc { code: i64, message: String },

    #[fail(display = "no answer within {:?}", _0)]
    Timeout(Duration),
}
