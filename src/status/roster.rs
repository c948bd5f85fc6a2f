use super::poll::PollResult;
use crate::client::{Grade, PRep};
use crate::nodes::NodeInfoMap;

/// A roster entry that gets a row in the table.
#[derive(Clone, Debug)]
pub struct NodeRow {
    /// Position in the roster, hidden entries included.
    pub index: usize,
    pub name: String,
    pub grade: Grade,
    pub power: u128,
    /// `None` when the node cannot be polled.
    pub ip: Option<String>,
    pub poll: PollResult,
}

impl NodeRow {
    pub fn is_main(&self) -> bool {
        self.grade == Grade::Main
    }
}

#[derive(Clone, Debug)]
pub enum Slot {
    /// Keeps its roster position but prints nothing.
    Hidden,
    Node(NodeRow),
}

/// Matches the roster against the node file, one slot per roster entry.
pub fn resolve_roster(preps: &[PRep], nodes: &NodeInfoMap) -> Vec<Slot> {
    preps
        .iter()
        .enumerate()
        .map(|(index, prep)| {
            let row = |ip: Option<&str>| {
                Slot::Node(NodeRow {
                    index,
                    name: prep.name.clone(),
                    grade: prep.grade,
                    power: prep.power,
                    ip: ip.map(str::to_owned),
                    poll: PollResult::Unreachable,
                })
            };
            match nodes.get(prep.display_address()) {
                None if prep.grade.is_lowest() => Slot::Hidden,
                None => {
                    debug!("{} ({}) is not in the node file", prep.name, prep.display_address());
                    row(None)
                }
                Some(info) => match info.endpoint() {
                    Some((_, ip)) => row(Some(ip)),
                    None => Slot::Hidden,
                },
            }
        })
        .collect()
}
