use crate::client::Transaction;
use crate::utils::ensure_address;
use crate::*;
use std::collections::HashSet;

/// One test a transaction has to pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Rejects the per-block base transaction.
    NoBase,
    To(HashSet<String>),
    From(HashSet<String>),
    /// Sender or receiver.
    Address(HashSet<String>),
    Method(HashSet<String>),
    DataType(HashSet<String>),
}

fn contains(set: &HashSet<String>, value: Option<&str>) -> bool {
    value.map_or(false, |v| set.contains(v))
}

impl Predicate {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Predicate::NoBase => !tx.is_base(),
            Predicate::To(set) => contains(set, tx.to.as_deref()),
            Predicate::From(set) => contains(set, tx.from.as_deref()),
            Predicate::Address(set) => {
                contains(set, tx.from.as_deref()) || contains(set, tx.to.as_deref())
            }
            Predicate::Method(set) => contains(set, tx.method()),
            Predicate::DataType(set) => set.contains(tx.kind()),
        }
    }
}

/// All predicates combined with AND; an empty filter passes everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TxFilter {
    predicates: Vec<Predicate>,
}

fn addresses(values: &[String]) -> Result<HashSet<String>> {
    values.iter().map(|v| ensure_address(v)).collect()
}

fn names(values: &[String]) -> HashSet<String> {
    values.iter().cloned().collect()
}

impl TxFilter {
    /// Builds the filter from option values; empty lists add no predicate.
    pub fn new(
        nobase: bool,
        to: &[String],
        from: &[String],
        address: &[String],
        methods: &[String],
        data_types: &[String],
    ) -> Result<Self> {
        let mut predicates = Vec::new();
        if nobase {
            predicates.push(Predicate::NoBase);
        }
        if !to.is_empty() {
            predicates.push(Predicate::To(addresses(to)?));
        }
        if !from.is_empty() {
            predicates.push(Predicate::From(addresses(from)?));
        }
        if !address.is_empty() {
            predicates.push(Predicate::Address(addresses(address)?));
        }
        if !methods.is_empty() {
            predicates.push(Predicate::Method(names(methods)));
        }
        if !data_types.is_empty() {
            predicates.push(Predicate::DataType(names(data_types)));
        }
        Ok(TxFilter { predicates })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.predicates.iter().all(|p| p.matches(tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALICE: &str = "hx00000000000000000000000000000000000000a1";
    const BOB: &str = "hx00000000000000000000000000000000000000b0";
    const SCORE: &str = "cx00000000000000000000000000000000000000c0";

    fn tx(value: serde_json::Value) -> Transaction {
        serde_json::from_value(value).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn filter(nobase: bool, methods: &[&str]) -> TxFilter {
        TxFilter::new(nobase, &[], &[], &[], &strings(methods), &[]).unwrap()
    }

    #[test]
    fn test_empty_filter_passes_all() {
        let f = TxFilter::default();
        assert!(f.matches(&tx(json!({"dataType": "base"}))));
        assert!(f.matches(&tx(json!({}))));
    }

    #[test]
    fn test_nobase_and_method() {
        let f = filter(true, &["transfer"]);
        assert_eq!(f.predicates().len(), 2);
        let base = tx(json!({"dataType": "base", "data": {"method": "transfer"}}));
        let transfer = tx(json!({"dataType": "call", "data": {"method": "transfer"}}));
        let stake = tx(json!({"dataType": "call", "data": {"method": "stake"}}));
        assert!(!f.matches(&base));
        assert!(f.matches(&transfer));
        assert!(!f.matches(&stake));
    }

    #[test]
    fn test_addresses_are_normalized() {
        let upper = ALICE.to_uppercase();
        let f = TxFilter::new(false, &[], &strings(&[&upper]), &[], &[], &[]).unwrap();
        assert!(f.matches(&tx(json!({"from": ALICE, "to": BOB}))));
        assert!(!f.matches(&tx(json!({"from": BOB, "to": ALICE}))));
        assert!(!f.matches(&tx(json!({"to": ALICE}))));

        assert!(TxFilter::new(false, &strings(&["hx12"]), &[], &[], &[], &[]).is_err());
    }

    #[test]
    fn test_to_and_address() {
        let to = TxFilter::new(false, &strings(&[SCORE]), &[], &[], &[], &[]).unwrap();
        assert!(to.matches(&tx(json!({"from": ALICE, "to": SCORE}))));
        assert!(!to.matches(&tx(json!({"from": SCORE, "to": ALICE}))));

        let either = TxFilter::new(false, &[], &[], &strings(&[&BOB[2..]]), &[], &[]).unwrap();
        assert!(either.matches(&tx(json!({"from": BOB, "to": ALICE}))));
        assert!(either.matches(&tx(json!({"from": ALICE, "to": BOB}))));
        assert!(!either.matches(&tx(json!({"from": ALICE, "to": SCORE}))));
    }

    #[test]
    fn test_data_type_defaults_to_transfer() {
        let f = TxFilter::new(false, &[], &[], &[], &[], &strings(&["transfer", "deploy"])).unwrap();
        assert!(f.matches(&tx(json!({"from": ALICE, "to": BOB}))));
        assert!(f.matches(&tx(json!({"dataType": "deploy"}))));
        assert!(!f.matches(&tx(json!({"dataType": "call"}))));
    }
}
