use super::poll::PollResult;
use super::roster::{NodeRow, Slot};
use crate::style::Style;
use crate::version::{is_lower_version, Version};
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use std::convert::TryFrom;
use std::io::{self, Write};
use std::time::Duration;

/// Nodes more than this many blocks below the top height are late.
pub const LATE_MARGIN: u64 = 2;
/// Roster positions below this index are the ones elected to produce blocks.
pub const LEADING_POSITIONS: usize = 22;

const NAME_WIDTH: usize = 18;
const FAIL_MARKER: &str = "FAIL";
const OK_MARKER: &str = "[OK]";

pub fn is_late(height: u64, top_height: u64) -> bool {
    height.saturating_add(LATE_MARGIN) < top_height
}

/// A node's version judged against the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionVerdict {
    /// No baseline is known.
    Unjudged,
    Behind,
    UpToDate,
}

pub fn version_verdict(version: Option<&Version>, baseline: Option<&Version>) -> VersionVerdict {
    match baseline {
        None => VersionVerdict::Unjudged,
        Some(_) if is_lower_version(version, baseline) => VersionVerdict::Behind,
        Some(_) => VersionVerdict::UpToDate,
    }
}

/// Counters printed in the summary line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub reachable: usize,
    pub late: usize,
    pub updated: usize,
    pub updated_main: usize,
    /// Diagnostic only, logged but not printed.
    pub updated_leading: usize,
    /// Diagnostic only, logged but not printed.
    pub outdated_main: usize,
}

/// Everything needed to print the status table.
#[derive(Clone, Debug)]
pub struct StatusReport {
    pub slots: Vec<Slot>,
    pub next_term: u64,
    pub top_height: u64,
    /// Highest version any node reported.
    pub last_version: Option<Version>,
    /// Version nodes are judged against.
    pub baseline: Option<Version>,
    pub block_time: Duration,
}

impl StatusReport {
    /// Aggregates the top height and the latest version over polled slots.
    pub fn new(
        slots: Vec<Slot>,
        next_term: u64,
        baseline: Option<Version>,
        block_time: Duration,
    ) -> Self {
        let mut top_height: u64 = 0;
        let mut last_version: Option<Version> = None;
        for slot in &slots {
            if let Slot::Node(NodeRow {
                poll: PollResult::Reachable { chain, version },
                ..
            }) = slot
            {
                if let Some(height) = chain.height {
                    top_height = top_height.max(height);
                }
                if is_lower_version(last_version.as_ref(), version.parsed.as_ref()) {
                    last_version = version.parsed.clone();
                }
            }
        }
        let baseline = baseline.or_else(|| last_version.clone());
        StatusReport {
            slots,
            next_term,
            top_height,
            last_version,
            baseline,
            block_time,
        }
    }

    /// Estimated wall-clock start of the next term, `None` when out of range.
    pub fn next_term_eta<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
        let blocks = i64::try_from(self.next_term)
            .ok()?
            .checked_sub(i64::try_from(self.top_height).ok()?)?;
        let millis = i64::try_from(self.block_time.as_millis())
            .ok()?
            .checked_mul(blocks)?;
        now.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
    }

    /// Prints one line per listed node and the summary line.
    pub fn render<W: Write>(&self, out: &mut W, now: DateTime<Local>) -> io::Result<Summary> {
        let mut summary = Summary::default();
        for slot in &self.slots {
            if let Slot::Node(row) = slot {
                writeln!(out, "{}", self.render_row(row, &mut summary))?;
            }
        }
        writeln!(out, "{}", self.render_summary(&summary, now))?;
        Ok(summary)
    }

    fn row_style(row: &NodeRow) -> Style {
        if row.power == 0 {
            Style::Muted
        } else if row.is_main() {
            Style::Emphasis
        } else {
            Style::Plain
        }
    }

    fn render_row(&self, row: &NodeRow, summary: &mut Summary) -> String {
        let name: String = row.name.chars().take(NAME_WIDTH).collect();
        let prefix = format!(
            "[{:3}] {:<18} ({:>4}): {:<15}",
            row.index,
            name,
            row.grade.label(),
            row.ip.as_deref().unwrap_or("-")
        );
        let mut line = format!("{} ", Self::row_style(row).paint(&prefix));

        let (chain, version) = match &row.poll {
            PollResult::Reachable { chain, version } => (chain, version),
            PollResult::Unreachable => {
                line.push_str(&format!(": {}", Style::Error.paint(FAIL_MARKER)));
                return line;
            }
        };

        summary.reachable += 1;
        match version_verdict(version.parsed.as_ref(), self.baseline.as_ref()) {
            VersionVerdict::Unjudged => line.push_str(&format!(": {:<7} ", version.raw)),
            VersionVerdict::Behind => {
                let text = format!("{:<16}", version.raw);
                line.push_str(&format!(": {} ", Style::Warning.paint(&text)));
                if row.is_main() {
                    summary.outdated_main += 1;
                }
            }
            VersionVerdict::UpToDate => {
                let text = format!("{:<16}", OK_MARKER);
                line.push_str(&format!(": {} ", Style::Success.paint(&text)));
                summary.updated += 1;
                if row.is_main() {
                    summary.updated_main += 1;
                }
                if row.index < LEADING_POSITIONS {
                    summary.updated_leading += 1;
                }
            }
        }

        if let (Some(height), Some(state)) = (chain.height, &chain.state) {
            if is_late(height, self.top_height) {
                let text = format!("{:8} {}", height, state);
                let deficit = height as i64 - self.top_height as i64;
                line.push_str(&format!(": {} ({})", Style::Warning.paint(&text), deficit));
                summary.late += 1;
            } else {
                line.push_str(&format!(": {:8} {}", height, state));
            }
        }
        line
    }

    fn render_summary(&self, summary: &Summary, now: DateTime<Local>) -> String {
        let mut line = format!(
            ">>>  Late: {} / {}  NextTerm: {} / {}",
            summary.late,
            summary.reachable,
            self.next_term,
            self.next_term_eta(now)
                .map_or_else(|| "-".to_owned(), |eta| eta.format("%H:%M:%S").to_string())
        );
        if let Some(baseline) = &self.baseline {
            line.push_str(&format!(
                "   {} Updated: {} / {} / {}",
                baseline, summary.updated_main, summary.updated, summary.reachable
            ));
        }
        line.push_str("  <<<");
        line
    }
}
