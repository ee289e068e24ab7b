//! Presentation of a mining run.
//!
//! Ordering for display lives here, never in the miner: frequent itemsets are
//! listed by size then by how often they occur, rules by size then by lift.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::constraint::Constraints;
use crate::construct::{Itemset, TidSet, Transaction};
use crate::eclat::{FrequentItemsets, LevelStats};
use crate::engine::Mining;
use crate::error::Result;
use crate::index::ItemIndex;
use crate::rules::{RuleSet, candidate_rules};

// items inside one CSV cell
pub const ITEM_SEPARATOR: &str = "|";

pub const TRANSACTIONS_FILE: &str = "trans.csv";
pub const ITEM_TIDSETS_FILE: &str = "item_tidset.csv";
pub const ITEMSET_TIDSETS_FILE: &str = "itemset_tidset.csv";
pub const ITEMSET_RULES_FILE: &str = "itemset_rule.csv";
pub const K_ITEMSETS_FILE: &str = "k_itemsets.csv";
pub const RULE_STATS_FILE: &str = "rule_stats.csv";
pub const SUMMARY_FILE: &str = "summary.json";

pub const ITEMSET_HEADER: [&str; 3] = ["k", "k-item set", "Number of occurrences"];
pub const RULE_HEADER: [&str; 8] = [
    "Size(A+C)",
    "Size(A)",
    "Antecedent",
    "Size(C)",
    "Consequent",
    "Support(A->C)",
    "Confidence(A->C)",
    "Lift(A->C)",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemsetRow {
    pub k: usize,
    pub itemset: String,
    pub occurrences: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleRow {
    pub size: usize,
    pub antecedent_size: usize,
    pub antecedent: String,
    pub consequent_size: usize,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub transactions: u32,
    pub items: usize,
    pub frequent_itemsets: usize,
    pub rules: usize,
    pub candidate_rules: usize,
    pub constraints: Constraints,
    pub levels: Vec<LevelStats>,
}

/// Frequent itemsets by size ascending, then occurrences descending.
pub fn itemset_rows(frequent: &FrequentItemsets) -> Vec<ItemsetRow> {
    let mut entries: Vec<(&Itemset, u64)> = frequent
        .iter()
        .map(|(itemset, tidset)| (itemset, tidset.len()))
        .collect();
    entries.sort_by(|a, b| (a.0.len(), b.1, a.0).cmp(&(b.0.len(), a.1, b.0)));
    entries
        .into_iter()
        .map(|(itemset, occurrences)| ItemsetRow {
            k: itemset.len(),
            itemset: itemset.joined(ITEM_SEPARATOR),
            occurrences,
        })
        .collect()
}

/// Rules by size ascending, then lift ascending.
pub fn rule_rows(rules: &RuleSet) -> Vec<RuleRow> {
    let mut entries: Vec<_> = rules.iter().collect();
    entries.sort_by(|a, b| {
        a.0.len()
            .cmp(&b.0.len())
            .then(a.1.lift.total_cmp(&b.1.lift))
            .then_with(|| a.0.cmp(b.0))
    });
    entries
        .into_iter()
        .map(|(rule, stats)| RuleRow {
            size: rule.len(),
            antecedent_size: rule.antecedent().len(),
            antecedent: rule.antecedent().joined(ITEM_SEPARATOR),
            consequent_size: rule.consequent().len(),
            consequent: rule.consequent().joined(ITEM_SEPARATOR),
            support: stats.support,
            confidence: stats.confidence,
            lift: stats.lift,
        })
        .collect()
}

pub fn summary(mining: &Mining) -> Summary {
    Summary {
        transactions: mining.index().transaction_count(),
        items: mining.index().len(),
        frequent_itemsets: mining.frequent().len(),
        rules: mining.rules().len(),
        candidate_rules: mining.rules().considered(),
        constraints: *mining.constraints(),
        levels: mining.frequent().levels().to_vec(),
    }
}

fn tid_list(tidset: &TidSet) -> String {
    tidset.iter().map(|tid| tid.to_string()).collect::<Vec<_>>().join(" ")
}

/// Writes result tables into one folder, creating it when missing.
#[derive(Debug)]
pub struct Reporter {
    root: PathBuf,
}

impl Reporter {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn write_transactions(&self, transactions: &[Transaction]) -> Result<PathBuf> {
        let path = self.root.join(TRANSACTIONS_FILE);
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        for transaction in transactions {
            writer.write_record(transaction.items().iter().map(|item| item.label()))?;
        }
        writer.flush()?;
        Ok(path)
    }
    pub fn write_item_tidsets(&self, index: &ItemIndex) -> Result<PathBuf> {
        let path = self.root.join(ITEM_TIDSETS_FILE);
        let mut writer = csv::Writer::from_path(&path)?;
        for (item, tidset) in index {
            let tids = tid_list(tidset);
            writer.write_record([item.label(), tids.as_str()])?;
        }
        writer.flush()?;
        Ok(path)
    }
    pub fn write_itemset_tidsets(&self, frequent: &FrequentItemsets) -> Result<PathBuf> {
        let path = self.root.join(ITEMSET_TIDSETS_FILE);
        let mut writer = csv::Writer::from_path(&path)?;
        for (itemset, tidset) in frequent {
            writer.write_record([itemset.joined(ITEM_SEPARATOR), tid_list(tidset)])?;
        }
        writer.flush()?;
        Ok(path)
    }
    /// One row per frequent itemset of two or more items, followed by every
    /// candidate rule it splits into.
    pub fn write_itemset_rules(&self, frequent: &FrequentItemsets) -> Result<PathBuf> {
        let path = self.root.join(ITEMSET_RULES_FILE);
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        for (itemset, _) in frequent.multis() {
            let mut record = vec![itemset.joined(ITEM_SEPARATOR)];
            record.extend(candidate_rules(itemset)?.iter().map(ToString::to_string));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(path)
    }
    pub fn write_itemset_rows(&self, frequent: &FrequentItemsets) -> Result<PathBuf> {
        self.write_rows(K_ITEMSETS_FILE, &ITEMSET_HEADER, itemset_rows(frequent))
    }
    pub fn write_rule_rows(&self, rules: &RuleSet) -> Result<PathBuf> {
        self.write_rows(RULE_STATS_FILE, &RULE_HEADER, rule_rows(rules))
    }
    pub fn write_summary(&self, mining: &Mining) -> Result<PathBuf> {
        let path = self.root.join(SUMMARY_FILE);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &summary(mining))?;
        Ok(path)
    }
    /// Writes every table of a run, returning the paths written.
    pub fn write_all(&self, transactions: &[Transaction], mining: &Mining) -> Result<Vec<PathBuf>> {
        let written = vec![
            self.write_transactions(transactions)?,
            self.write_item_tidsets(mining.index())?,
            self.write_itemset_tidsets(mining.frequent())?,
            self.write_itemset_rules(mining.frequent())?,
            self.write_itemset_rows(mining.frequent())?,
            self.write_rule_rows(mining.rules())?,
            self.write_summary(mining)?,
        ];
        info!(folder = %self.root.display(), files = written.len(), "results written");
        Ok(written)
    }
    // header written even when there are no rows
    fn write_rows<T: Serialize>(&self, file: &str, header: &[&str], rows: Vec<T>) -> Result<PathBuf> {
        let path = self.root.join(file);
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(path)
    }
}
