//! Filter and rank policy for universe membership.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::MetadataRecord;

/// Exchange codes admitted by the default policy (NYSE and NASDAQ).
pub const DEFAULT_EXCHANGES: [&str; 2] = ["XNYS", "XNAS"];

/// Security type admitted by the default policy (common stock).
pub const COMMON_STOCK: &str = "CS";

/// Why a record was excluded.
///
/// Exclusion is not an error. Reference data is routinely incomplete, so a
/// rejected record is an expected outcome that only affects counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Exchange,
    SecurityType,
    MarketCap,
}

/// Exact-match predicate set applied to fetched records.
///
/// The predicates are independent conjunctions; a record is admitted only
/// when all of them hold, and evaluation order cannot change membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    allowed_exchanges: Vec<String>,
    security_type: String,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCHANGES.iter().map(|code| String::from(*code)).collect(),
            COMMON_STOCK,
        )
    }
}

impl FilterPolicy {
    pub fn new(allowed_exchanges: Vec<String>, security_type: impl Into<String>) -> Self {
        Self {
            allowed_exchanges,
            security_type: security_type.into(),
        }
    }

    /// Returns the first predicate the record fails, or `None` when the
    /// record is admitted.
    pub fn evaluate(&self, record: &MetadataRecord) -> Option<RejectReason> {
        if !self
            .allowed_exchanges
            .iter()
            .any(|code| code == &record.primary_exchange)
        {
            return Some(RejectReason::Exchange);
        }

        if record.security_type != self.security_type {
            return Some(RejectReason::SecurityType);
        }

        if valid_market_cap(record.market_cap).is_none() {
            return Some(RejectReason::MarketCap);
        }

        None
    }
}

/// Numeric validity for the ranking key: present, finite, non-negative.
///
/// Invalid values are dropped by callers, never clamped or defaulted.
pub fn valid_market_cap(value: Option<f64>) -> Option<f64> {
    value.filter(|cap| cap.is_finite() && *cap >= 0.0)
}

/// Sorts records by market cap descending, breaking ties by symbol
/// ascending so repeat runs over identical data produce identical output.
pub fn rank_records(records: &mut [MetadataRecord]) {
    records.sort_by(compare_rank);
}

fn compare_rank(a: &MetadataRecord, b: &MetadataRecord) -> Ordering {
    let a_cap = a.market_cap.unwrap_or(f64::NEG_INFINITY);
    let b_cap = b.market_cap.unwrap_or(f64::NEG_INFINITY);
    b_cap
        .total_cmp(&a_cap)
        .then_with(|| a.symbol.cmp(&b.symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Symbol;

    fn record(symbol: &str, cap: Option<f64>, exchange: &str, security_type: &str) -> MetadataRecord {
        MetadataRecord {
            symbol: Symbol::parse(symbol).expect("symbol should parse"),
            active: true,
            security_type: String::from(security_type),
            market_cap: cap,
            primary_exchange: String::from(exchange),
            industry_description: None,
            list_date: None,
            display_name: None,
            description: None,
            employee_count: None,
            shares_outstanding: None,
            weighted_shares_outstanding: None,
        }
    }

    #[test]
    fn admits_common_stock_on_listed_exchanges() {
        let policy = FilterPolicy::default();

        assert_eq!(policy.evaluate(&record("AAA", Some(1.0), "XNYS", "CS")), None);
        assert_eq!(policy.evaluate(&record("BBB", Some(1.0), "XNAS", "CS")), None);
    }

    #[test]
    fn rejects_off_exchange_records() {
        let policy = FilterPolicy::default();

        assert_eq!(
            policy.evaluate(&record("AAA", Some(1.0), "OTCM", "CS")),
            Some(RejectReason::Exchange)
        );
    }

    #[test]
    fn rejects_non_common_stock_records() {
        let policy = FilterPolicy::default();

        assert_eq!(
            policy.evaluate(&record("AAA", Some(1.0), "XNAS", "ETF")),
            Some(RejectReason::SecurityType)
        );
    }

    #[test]
    fn rejects_absent_or_invalid_market_cap() {
        let policy = FilterPolicy::default();

        assert_eq!(
            policy.evaluate(&record("AAA", None, "XNAS", "CS")),
            Some(RejectReason::MarketCap)
        );
        assert_eq!(
            policy.evaluate(&record("AAA", Some(f64::NAN), "XNAS", "CS")),
            Some(RejectReason::MarketCap)
        );
        assert_eq!(
            policy.evaluate(&record("AAA", Some(f64::INFINITY), "XNAS", "CS")),
            Some(RejectReason::MarketCap)
        );
        assert_eq!(
            policy.evaluate(&record("AAA", Some(-5.0), "XNAS", "CS")),
            Some(RejectReason::MarketCap)
        );
    }

    #[test]
    fn exchange_comparison_is_case_sensitive() {
        let policy = FilterPolicy::default();

        assert_eq!(
            policy.evaluate(&record("AAA", Some(1.0), "xnas", "CS")),
            Some(RejectReason::Exchange)
        );
    }

    #[test]
    fn zero_market_cap_is_valid() {
        assert_eq!(valid_market_cap(Some(0.0)), Some(0.0));
    }

    #[test]
    fn ranks_by_market_cap_descending() {
        let mut records = vec![
            record("SMALL", Some(10.0), "XNAS", "CS"),
            record("BIG", Some(1_000.0), "XNYS", "CS"),
            record("MID", Some(500.0), "XNAS", "CS"),
        ];

        rank_records(&mut records);

        let order = records
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["BIG", "MID", "SMALL"]);
    }

    #[test]
    fn equal_market_caps_break_ties_by_symbol_ascending() {
        let mut records = vec![
            record("ZZZ", Some(500.0), "XNAS", "CS"),
            record("AAA", Some(500.0), "XNYS", "CS"),
            record("MMM", Some(500.0), "XNAS", "CS"),
        ];

        rank_records(&mut records);

        let order = records
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["AAA", "MMM", "ZZZ"]);
    }

    #[test]
    fn removing_a_record_preserves_relative_order_of_the_rest() {
        let mut full = vec![
            record("AAA", Some(300.0), "XNAS", "CS"),
            record("BBB", Some(200.0), "XNYS", "CS"),
            record("CCC", Some(100.0), "XNAS", "CS"),
        ];
        rank_records(&mut full);

        let mut without_middle = vec![
            record("AAA", Some(300.0), "XNAS", "CS"),
            record("CCC", Some(100.0), "XNAS", "CS"),
        ];
        rank_records(&mut without_middle);

        let survivors = full
            .iter()
            .filter(|r| r.symbol.as_str() != "BBB")
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        let reranked = without_middle
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(survivors, reranked);
    }
}
