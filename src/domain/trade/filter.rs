//! Filter engine — conjunctive predicates over a held record collection.

use super::TradeRecord;
use crate::error::SdkError;
use std::str::FromStr;

/// A named, independently settable criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Representative name, case-insensitive substring.
    Name,
    /// Ticker, case-insensitive substring.
    Ticker,
    /// Buy/sell category with synonym mapping.
    TradeType,
    /// Party, case-sensitive exact match.
    Party,
    /// Sector, case-insensitive substring.
    Sector,
}

/// Fixed synonym table for the trade-type criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeTypeCategory {
    Buy,
    Sell,
}

impl TradeTypeCategory {
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            TradeTypeCategory::Buy => &["purchase", "buy"],
            TradeTypeCategory::Sell => &["sale", "sell"],
        }
    }

    /// True when the raw type contains any synonym of this category.
    pub fn matches(&self, raw: &str) -> bool {
        let lower = raw.to_ascii_lowercase();
        self.synonyms().iter().any(|s| lower.contains(s))
    }
}

impl FromStr for TradeTypeCategory {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "purchase" => Ok(TradeTypeCategory::Buy),
            "sell" | "sale" => Ok(TradeTypeCategory::Sell),
            other => Err(SdkError::Validation(format!(
                "Unknown trade type filter: {}",
                other
            ))),
        }
    }
}

/// The active criteria. `None` means unset, which passes every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub trade_type: Option<TradeTypeCategory>,
    pub party: Option<String>,
    pub sector: Option<String>,
}

impl FilterCriteria {
    /// Sets one criterion. A blank value clears it.
    ///
    /// Free-text values are trimmed. Party is an exact match and is stored verbatim.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<(), SdkError> {
        let trimmed = value.trim();
        let cleared = trimmed.is_empty();
        match field {
            FilterField::Name => self.name = (!cleared).then(|| trimmed.to_string()),
            FilterField::Ticker => self.ticker = (!cleared).then(|| trimmed.to_string()),
            FilterField::Party => self.party = (!cleared).then(|| value.to_string()),
            FilterField::Sector => self.sector = (!cleared).then(|| trimmed.to_string()),
            FilterField::TradeType => {
                self.trade_type = if cleared { None } else { Some(trimmed.parse()?) }
            }
        }
        Ok(())
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn active_count(&self) -> usize {
        [
            self.name.is_some(),
            self.ticker.is_some(),
            self.trade_type.is_some(),
            self.party.is_some(),
            self.sector.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// AND of every active criterion. A record missing a tested field fails it.
    pub fn matches(&self, record: &TradeRecord) -> bool {
        if let Some(needle) = &self.name {
            if !contains_ci(record.counterparty.as_deref(), needle) {
                return false;
            }
        }
        if let Some(needle) = &self.ticker {
            if !contains_ci(record.symbol.as_ref().map(|s| s.as_str()), needle) {
                return false;
            }
        }
        if let Some(category) = &self.trade_type {
            match record.side.as_deref() {
                Some(raw) if category.matches(raw) => {}
                _ => return false,
            }
        }
        if let Some(party) = &self.party {
            if record.party.as_deref() != Some(party.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.sector {
            if !contains_ci(record.sector.as_deref(), needle) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Pure filter: the records passing every active criterion, in source order.
pub fn apply_all<'a>(raw: &'a [TradeRecord], criteria: &FilterCriteria) -> Vec<&'a TradeRecord> {
    raw.iter().filter(|r| criteria.matches(r)).collect()
}

/// A record collection the filter engine can observe.
pub trait RecordSet {
    fn records(&self) -> &[TradeRecord];

    /// Changes whenever `records()` changes.
    fn version(&self) -> u64;
}

#[derive(Debug, Clone)]
struct DisplayCache {
    version: u64,
    generation: u64,
    len: usize,
    indices: Vec<usize>,
}

/// Holds the criteria for one view and memoises the displayed subset.
///
/// The subset is recomputed whenever the observed collection's version or the
/// criteria change; the collection itself is never touched.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    criteria: FilterCriteria,
    generation: u64,
    cache: Option<DisplayCache>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criterion(&mut self, field: FilterField, value: &str) -> Result<(), SdkError> {
        let before = self.criteria.clone();
        self.criteria.set(field, value)?;
        if self.criteria != before {
            self.generation += 1;
            tracing::debug!(?field, active = self.criteria.active_count(), "Filter changed");
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        if !self.criteria.is_empty() {
            self.criteria.clear_all();
            self.generation += 1;
        }
    }

    /// Recomputes the subset if anything changed. Returns whether it did.
    pub fn refresh<S: RecordSet + ?Sized>(&mut self, set: &S) -> bool {
        let records = set.records();
        let fresh = self.cache.as_ref().is_some_and(|c| {
            c.version == set.version() && c.generation == self.generation && c.len == records.len()
        });
        if fresh {
            return false;
        }
        let indices = records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.criteria.matches(r))
            .map(|(i, _)| i)
            .collect();
        self.cache = Some(DisplayCache {
            version: set.version(),
            generation: self.generation,
            len: records.len(),
            indices,
        });
        true
    }

    /// The displayed subset of `set` under the current criteria.
    pub fn displayed<'a, S: RecordSet + ?Sized>(&mut self, set: &'a S) -> Vec<&'a TradeRecord> {
        self.refresh(set);
        let records = set.records();
        self.cache
            .as_ref()
            .map(|c| c.indices.iter().filter_map(|i| records.get(*i)).collect())
            .unwrap_or_default()
    }

    pub fn displayed_len<S: RecordSet + ?Sized>(&mut self, set: &S) -> usize {
        self.refresh(set);
        self.cache.as_ref().map(|c| c.indices.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Symbol;

    fn disclosure(id: i64, rep: &str, ticker: &str, kind: &str, party: &str, sector: &str) -> TradeRecord {
        let mut r = TradeRecord::new(id);
        r.counterparty = Some(rep.to_string());
        r.symbol = Some(Symbol::from(ticker));
        r.side = Some(kind.to_string());
        r.party = Some(party.to_string());
        r.sector = Some(sector.to_string());
        r
    }

    fn sample() -> Vec<TradeRecord> {
        vec![
            disclosure(1, "Nancy Pelosi", "NVDA", "Purchase", "Democrat", "Technology"),
            disclosure(2, "Dan Crenshaw", "XOM", "Sale (Full)", "Republican", "Energy"),
            disclosure(3, "Ro Khanna", "AAPL", "Purchase (Partial)", "Democrat", "Technology"),
            disclosure(4, "Tommy Tuberville", "MSFT", "Exchange", "Republican", "Technology"),
        ]
    }

    struct Fixed(Vec<TradeRecord>, u64);

    impl RecordSet for Fixed {
        fn records(&self) -> &[TradeRecord] {
            &self.0
        }
        fn version(&self) -> u64 {
            self.1
        }
    }

    fn ids(records: &[&TradeRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_trade_type_synonyms() {
        assert!(TradeTypeCategory::Buy.matches("Purchase (Partial)"));
        assert!(TradeTypeCategory::Sell.matches("Sale"));
        assert!(!TradeTypeCategory::Buy.matches("Exchange"));
        assert!(!TradeTypeCategory::Sell.matches("Exchange"));
        assert!(TradeTypeCategory::Buy.matches("buy"));
    }

    #[test]
    fn test_trade_type_parse() {
        assert_eq!("Buy".parse::<TradeTypeCategory>().unwrap(), TradeTypeCategory::Buy);
        assert_eq!("sale".parse::<TradeTypeCategory>().unwrap(), TradeTypeCategory::Sell);
        assert!("hold".parse::<TradeTypeCategory>().is_err());
    }

    #[test]
    fn test_name_and_ticker_are_case_insensitive() {
        let raw = sample();
        let mut c = FilterCriteria::default();
        c.set(FilterField::Name, "pelosi").unwrap();
        assert_eq!(ids(&apply_all(&raw, &c)), ["1"]);

        c.clear_all();
        c.set(FilterField::Ticker, "aa").unwrap();
        assert_eq!(ids(&apply_all(&raw, &c)), ["3"]);
    }

    #[test]
    fn test_party_is_exact_and_case_sensitive() {
        let raw = sample();
        let mut c = FilterCriteria::default();
        c.set(FilterField::Party, "Democrat").unwrap();
        assert_eq!(ids(&apply_all(&raw, &c)), ["1", "3"]);
        c.set(FilterField::Party, "democrat").unwrap();
        assert!(apply_all(&raw, &c).is_empty());
        c.set(FilterField::Party, "Demo").unwrap();
        assert!(apply_all(&raw, &c).is_empty());
    }

    #[test]
    fn test_party_is_not_trimmed() {
        let raw = sample();
        let mut c = FilterCriteria::default();
        c.set(FilterField::Party, " Democrat").unwrap();
        assert!(apply_all(&raw, &c).is_empty());
        c.set(FilterField::Party, "   ").unwrap();
        assert!(c.party.is_none());
    }

    #[test]
    fn test_criteria_conjoin() {
        let raw = sample();
        let mut c = FilterCriteria::default();
        c.set(FilterField::Sector, "tech").unwrap();
        c.set(FilterField::TradeType, "buy").unwrap();
        c.set(FilterField::Party, "Democrat").unwrap();
        assert_eq!(ids(&apply_all(&raw, &c)), ["1", "3"]);
        c.set(FilterField::Name, "khanna").unwrap();
        assert_eq!(ids(&apply_all(&raw, &c)), ["3"]);
    }

    #[test]
    fn test_missing_field_excluded_when_active() {
        let mut raw = sample();
        raw.push(TradeRecord::new(5));
        let mut c = FilterCriteria::default();
        assert_eq!(apply_all(&raw, &c).len(), 5);
        c.set(FilterField::Sector, "e").unwrap();
        assert!(!ids(&apply_all(&raw, &c)).contains(&"5".to_string()));
    }

    #[test]
    fn test_blank_value_clears() {
        let mut c = FilterCriteria::default();
        c.set(FilterField::Ticker, "NVDA").unwrap();
        c.set(FilterField::Ticker, "   ").unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_invalid_trade_type_leaves_criteria_unchanged() {
        let mut c = FilterCriteria::default();
        c.set(FilterField::TradeType, "sell").unwrap();
        assert!(c.set(FilterField::TradeType, "short").is_err());
        assert_eq!(c.trade_type, Some(TradeTypeCategory::Sell));
    }

    #[test]
    fn test_apply_all_is_idempotent() {
        let raw = sample();
        let mut c = FilterCriteria::default();
        c.set(FilterField::TradeType, "sell").unwrap();
        let first = apply_all(&raw, &c);
        let second = apply_all(&raw, &c);
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_recomputes_on_version_and_criteria() {
        let mut set = Fixed(sample(), 1);
        let mut engine = FilterEngine::new();
        assert_eq!(engine.displayed_len(&set), 4);
        assert!(!engine.refresh(&set));

        engine.set_criterion(FilterField::TradeType, "buy").unwrap();
        assert_eq!(ids(&engine.displayed(&set)), ["1", "3"]);

        set.0.push(disclosure(9, "New Rep", "TSLA", "Purchase", "Independent", "Auto"));
        set.1 = 2;
        assert_eq!(ids(&engine.displayed(&set)), ["1", "3", "9"]);

        engine.reset_all();
        assert_eq!(engine.displayed_len(&set), set.0.len());
    }

    #[test]
    fn test_engine_unchanged_criterion_keeps_cache() {
        let set = Fixed(sample(), 1);
        let mut engine = FilterEngine::new();
        engine.set_criterion(FilterField::Ticker, "nvda").unwrap();
        engine.refresh(&set);
        engine.set_criterion(FilterField::Ticker, "nvda").unwrap();
        assert!(!engine.refresh(&set));
    }
}
