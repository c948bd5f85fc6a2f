//! The `scan` command: walk blocks and print matching transactions.

mod column;
mod filter;

use crate::client::{BlockId, ChainClient, Transaction};
use crate::config::ScanConfig;
use crate::style::Style;
use crate::*;
use std::io::{stdout, Write};

pub use column::{Align, ColumnId, ColumnSpec, RowPrinter, HEIGHT_COLUMN};
pub use filter::{Predicate, TxFilter};

/// Erases the current terminal line.
const CLEAR_LINE: &str = "\x1b[K";

/// Prints the transactions of one block, first row titled with its height.
///
/// Rows come newest first unless `forward` is set.
fn print_block<W: Write>(
    out: &mut W,
    printer: &RowPrinter,
    height: u64,
    txs: &[&Transaction],
    forward: bool,
) -> Result<()> {
    let mut ordered = txs.to_vec();
    if !forward {
        ordered.reverse();
    }
    let mut title = height.to_string();
    for tx in ordered {
        writeln!(out, "{}", printer.row(&title, tx))?;
        title.clear();
    }
    Ok(())
}

/// Scans from `config.start`, one block at a time, writing to `out`.
///
/// Runs until `config.count` blocks were visited, the genesis block was
/// passed going backward, or a fetch fails.
pub async fn scan_blocks<C, W>(client: &C, config: &ScanConfig, out: &mut W) -> Result<()>
where
    C: ChainClient + ?Sized,
    W: Write,
{
    let printer = RowPrinter::new(&config.columns);
    let mut cursor = config.start.clone();
    let mut header_printed = false;
    let mut visited = 0u64;

    while config.count.map_or(true, |count| visited < count) {
        let progress = format!(">Get Block {}", cursor);
        write!(out, "{}{}\r", CLEAR_LINE, Style::Info.paint(&progress))?;
        out.flush()?;

        let block = client.get_block(&cursor).await?;
        visited += 1;
        let txs: Vec<&Transaction> = block
            .confirmed_transaction_list
            .iter()
            .filter(|tx| config.filter.matches(tx))
            .collect();
        debug!(
            "block {}: {} of {} transactions match",
            block.height,
            txs.len(),
            block.confirmed_transaction_list.len()
        );

        if !txs.is_empty() {
            write!(out, "{}", CLEAR_LINE)?;
            if !header_printed {
                writeln!(out, "{}", printer.header())?;
                header_printed = true;
            }
            print_block(out, &printer, block.height, &txs, config.forward)?;
        }

        cursor = if config.forward {
            BlockId::Height(block.height + 1)
        } else if block.height == 0 {
            info!("reached the genesis block");
            break;
        } else {
            BlockId::Height(block.height - 1)
        };
    }
    write!(out, "{}", CLEAR_LINE)?;
    out.flush()?;
    Ok(())
}

/// Runs the whole `scan` command against stdout.
pub async fn show_scan<C>(client: &C, config: &ScanConfig) -> Result<()>
where
    C: ChainClient + ?Sized,
{
    let stdout = stdout();
    let mut out = stdout.lock();
    scan_blocks(client, config, &mut out).await
}
