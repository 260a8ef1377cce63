//! Transaction sources
//!
//! The scoring pipeline never owns its data; it reads classified
//! transactions from a [`TransactionSource`]. [`InMemorySource`] covers the
//! built-in sample set and anything loaded from a file.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::import::load_file;
use crate::models::{Category, RawTransaction, Transaction};

/// Filter for listing transactions; every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub category: Option<Category>,
    /// Case-insensitive substring of description or merchant
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Inclusive date range
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.category.is_some_and(|c| c != txn.category) {
            return false;
        }
        if self.from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| txn.date > to) {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let in_description = txn.description.to_lowercase().contains(&needle);
            let in_merchant = txn
                .merchant
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(&needle));
            if !in_description && !in_merchant {
                return false;
            }
        }
        true
    }
}

/// Read-only provider of classified transactions
pub trait TransactionSource: Send + Sync {
    /// Transactions matching `filter`, newest first
    fn list_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction>;

    fn get_transaction(&self, id: &str) -> Option<Transaction>;

    /// Every transaction, newest first
    fn all(&self) -> Vec<Transaction> {
        self.list_transactions(&TransactionFilter::default())
    }
}

/// Transactions held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        // newest first, then id for a stable order within a day
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Self { transactions }
    }

    /// Classify raw records into a source
    pub fn from_raw(classifier: &Classifier, raws: &[RawTransaction]) -> Result<Self> {
        Ok(Self::new(classifier.classify_batch(raws)?))
    }

    /// Load and classify a CSV or JSON file
    pub fn from_file(classifier: &Classifier, path: &Path) -> Result<Self> {
        let raws = load_file(path)?;
        let source = Self::from_raw(classifier, &raws)?;
        info!(
            path = %path.display(),
            transactions = source.len(),
            "Loaded transactions"
        );
        Ok(source)
    }

    /// The built-in 16-record sample set, classified by `classifier`
    pub fn sample(classifier: &Classifier) -> Result<Self> {
        Self::from_raw(classifier, &sample_records())
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TransactionSource for InMemorySource {
    fn list_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    fn get_transaction(&self, id: &str) -> Option<Transaction> {
        self.transactions.iter().find(|t| t.id == id).cloned()
    }
}

/// Raw records of the sample set (TXN001 to TXN016)
pub fn sample_records() -> Vec<RawTransaction> {
    const SAMPLE: [(&str, &str, f64, &str, (i32, u32, u32)); 16] = [
        ("TXN001", "Metro Rail Monthly Pass", 1500.0, "Delhi Metro", (2026, 1, 10)),
        ("TXN002", "Electric Vehicle Charging", 450.0, "Tata Power EV", (2026, 1, 9)),
        ("TXN003", "Organic Grocery Shopping", 2300.0, "Nature's Basket", (2026, 1, 8)),
        ("TXN004", "Fast Fashion Purchase", 4500.0, "QuickTrends", (2026, 1, 7)),
        ("TXN005", "Solar Panel Installation EMI", 8500.0, "SunPower India", (2026, 1, 6)),
        ("TXN006", "Flight Ticket - Domestic", 7500.0, "AirIndia", (2026, 1, 5)),
        ("TXN007", "Plant-Based Restaurant", 850.0, "Green Leaf Cafe", (2026, 1, 4)),
        ("TXN008", "Ride Share - Carpool", 250.0, "QuickRide", (2026, 1, 3)),
        ("TXN009", "Electricity Bill Payment", 3200.0, "BSES Rajdhani", (2026, 1, 2)),
        ("TXN010", "Petrol Fuel Purchase", 5000.0, "Indian Oil", (2026, 1, 1)),
        ("TXN011", "Thrift Store Shopping", 1200.0, "SecondChance Store", (2025, 12, 30)),
        ("TXN012", "Digital Subscription - Netflix", 649.0, "Netflix", (2025, 12, 29)),
        ("TXN013", "Charity Donation - Tree Plantation", 2000.0, "GreenEarth Foundation", (2025, 12, 28)),
        ("TXN014", "Plastic Bottled Water - Bulk", 800.0, "MegaMart", (2025, 12, 27)),
        ("TXN015", "Bicycle Purchase", 12000.0, "Hero Cycles", (2025, 12, 26)),
        ("TXN016", "UPI Payment - Local Vendor", 150.0, "Street Food Vendor", (2025, 12, 25)),
    ];

    SAMPLE
        .iter()
        .filter_map(|(id, description, amount, merchant, (y, m, d))| {
            let date = NaiveDate::from_ymd_opt(*y, *m, *d)?;
            Some(
                RawTransaction::new(*description, *amount, date)
                    .with_id(*id)
                    .with_merchant(*merchant),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemorySource {
        InMemorySource::sample(&Classifier::embedded().unwrap()).unwrap()
    }

    #[test]
    fn test_sample_set_classification() {
        let source = sample();
        assert_eq!(source.len(), 16);

        let expected = [
            ("TXN001", Category::Transport, 5),
            ("TXN002", Category::Transport, 4),
            ("TXN003", Category::Food, 3),
            ("TXN004", Category::Shopping, -4),
            ("TXN005", Category::Utilities, 5),
            ("TXN006", Category::Transport, -5),
            ("TXN007", Category::Food, 4),
            ("TXN008", Category::Transport, 3),
            ("TXN009", Category::Utilities, 0),
            ("TXN010", Category::Transport, -4),
            ("TXN011", Category::Shopping, 4),
            ("TXN012", Category::Entertainment, 1),
            ("TXN013", Category::Donations, 5),
            ("TXN014", Category::Food, -3),
            ("TXN015", Category::Transport, 5),
            ("TXN016", Category::Food, 2),
        ];
        for (id, category, impact) in expected {
            let txn = source.get_transaction(id).unwrap();
            assert_eq!(txn.category, category, "{}", id);
            assert_eq!(txn.eco_impact, impact, "{}", id);
        }
    }

    #[test]
    fn test_list_is_newest_first() {
        let all = sample().all();
        assert_eq!(all.first().unwrap().id, "TXN001");
        assert_eq!(all.last().unwrap().id, "TXN016");
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_filter_by_category() {
        let transport = sample().list_transactions(&TransactionFilter::new().category(Category::Transport));
        assert_eq!(transport.len(), 6);
        assert!(transport.iter().all(|t| t.category == Category::Transport));
    }

    #[test]
    fn test_filter_by_search() {
        let source = sample();
        let metro = source.list_transactions(&TransactionFilter::new().search("METRO"));
        assert_eq!(metro.len(), 1);

        // merchant match
        let cycles = source.list_transactions(&TransactionFilter::new().search("hero"));
        assert_eq!(cycles[0].id, "TXN015");

        let blank = source.list_transactions(&TransactionFilter::new().search("  "));
        assert_eq!(blank.len(), 16);
    }

    #[test]
    fn test_filter_by_date_range() {
        let december = sample().list_transactions(&TransactionFilter::new().between(
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        ));
        assert_eq!(december.len(), 6);
    }

    #[test]
    fn test_get_missing_transaction() {
        assert!(sample().get_transaction("TXN999").is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.csv");
        std::fs::write(
            &path,
            "date,description,amount\n2026-02-01,Bus Pass Renewal,300\n2026-02-02,Steakhouse Dinner,2500\n",
        )
        .unwrap();

        let source = InMemorySource::from_file(&Classifier::embedded().unwrap(), &path).unwrap();
        let all = source.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].description, "Steakhouse Dinner");
        assert_eq!(all[0].eco_impact, -2);
        assert!(all[1].id.starts_with("TXN-"));
    }
}
