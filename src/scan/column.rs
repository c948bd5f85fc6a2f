use crate::client::Transaction;
use crate::style::Style;
use crate::utils::{format_decimals, shorten, Shorten};
use crate::ReportError;
use std::str::FromStr;

const FULL_ADDR_LEN: usize = 42;
const SHORT_ADDR_LEN: usize = 20;
const SHORT_VALUE_LEN: usize = 20;
const VALUE_DECIMALS: u32 = 2;
const MISSING: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Display properties of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub width: usize,
    pub align: Align,
}

impl ColumnSpec {
    fn cell(&self, value: &str) -> String {
        match self.align {
            Align::Left => format!("{:<width$}", value, width = self.width),
            Align::Right => format!("{:>width$}", value, width = self.width),
        }
    }
}

/// The leading column every table gets, holding the block height.
pub const HEIGHT_COLUMN: ColumnSpec = ColumnSpec {
    title: "Height",
    width: 8,
    align: Align::Right,
};

/// Transaction columns selectable with `--column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnId {
    Id,
    From,
    FromShort,
    Type,
    Method,
    To,
    ToShort,
    Value,
}

fn shorten_address(addr: Option<&str>) -> String {
    shorten(addr.unwrap_or(MISSING), SHORT_ADDR_LEN, Shorten::Middle)
}

fn format_value(value: Option<String>) -> String {
    let value = value.unwrap_or_else(|| "0".to_owned());
    let amount = format_decimals(&value, VALUE_DECIMALS).unwrap_or(value);
    shorten(&amount, SHORT_VALUE_LEN, Shorten::Left)
}

impl ColumnId {
    pub const DEFAULTS: [ColumnId; 6] = [
        ColumnId::Id,
        ColumnId::FromShort,
        ColumnId::Type,
        ColumnId::Method,
        ColumnId::To,
        ColumnId::Value,
    ];

    pub fn spec(self) -> ColumnSpec {
        let (title, width, align) = match self {
            ColumnId::Id => ("ID", 66, Align::Left),
            ColumnId::From => ("From", FULL_ADDR_LEN, Align::Left),
            ColumnId::FromShort => ("From", SHORT_ADDR_LEN, Align::Left),
            ColumnId::Type => ("Type", 8, Align::Left),
            ColumnId::Method => ("Method", 20, Align::Left),
            ColumnId::To => ("To", FULL_ADDR_LEN, Align::Left),
            ColumnId::ToShort => ("To", SHORT_ADDR_LEN, Align::Left),
            ColumnId::Value => ("Value", SHORT_VALUE_LEN, Align::Right),
        };
        ColumnSpec { title, width, align }
    }

    pub fn extract(self, tx: &Transaction) -> String {
        match self {
            ColumnId::Id => tx.tx_hash.as_deref().unwrap_or(MISSING).to_owned(),
            ColumnId::From => tx.from.as_deref().unwrap_or(MISSING).to_owned(),
            ColumnId::FromShort => shorten_address(tx.from.as_deref()),
            ColumnId::Type => tx.kind().to_owned(),
            ColumnId::Method => shorten(tx.method().unwrap_or(MISSING), 20, Shorten::Right),
            ColumnId::To => tx.to.as_deref().unwrap_or(MISSING).to_owned(),
            ColumnId::ToShort => shorten_address(tx.to.as_deref()),
            ColumnId::Value => format_value(tx.value()),
        }
    }
}

impl FromStr for ColumnId {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "id" => ColumnId::Id,
            "from" => ColumnId::From,
            "from..." => ColumnId::FromShort,
            "type" => ColumnId::Type,
            "method" => ColumnId::Method,
            "to" => ColumnId::To,
            "to..." => ColumnId::ToShort,
            "value" => ColumnId::Value,
            _ => return Err(ReportError::UnknownColumn(s.to_owned())),
        })
    }
}

/// Lays out transactions as `| a | b | … |` rows under a fixed header.
pub struct RowPrinter {
    columns: Vec<ColumnId>,
}

impl RowPrinter {
    pub fn new(columns: &[ColumnId]) -> Self {
        RowPrinter {
            columns: columns.to_vec(),
        }
    }

    fn specs(&self) -> impl Iterator<Item = ColumnSpec> + '_ {
        std::iter::once(HEIGHT_COLUMN).chain(self.columns.iter().map(|c| c.spec()))
    }

    fn join(cells: Vec<String>) -> String {
        format!("| {} |", cells.join(" | "))
    }

    pub fn header(&self) -> String {
        let text = Self::join(self.specs().map(|spec| spec.cell(spec.title)).collect());
        Style::Header.paint(&text).to_string()
    }

    /// A row for `tx`; `title` fills the height column.
    pub fn row(&self, title: &str, tx: &Transaction) -> String {
        let mut cells = vec![HEIGHT_COLUMN.cell(title)];
        cells.extend(
            self.columns
                .iter()
                .map(|column| column.spec().cell(&column.extract(tx))),
        );
        Self::join(cells)
    }
}
