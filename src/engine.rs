//! One mining run, start to finish.

use std::time::Instant;

use tracing::info;

use crate::constraint::Constraints;
use crate::construct::Transaction;
use crate::eclat::{FrequentItemsets, mine_frequent_itemsets};
use crate::error::Result;
use crate::index::{ItemIndex, index_transactions};
use crate::rules::{RuleSet, generate_rules};

/// The three mappings a run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct Mining {
    constraints: Constraints,
    index: ItemIndex,
    frequent: FrequentItemsets,
    rules: RuleSet,
}

impl Mining {
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
    pub fn index(&self) -> &ItemIndex {
        &self.index
    }
    pub fn frequent(&self) -> &FrequentItemsets {
        &self.frequent
    }
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Indexes `transactions`, mines frequent itemsets and derives rules.
///
/// All constraints are validated before any work is done; mining either
/// returns complete results or fails without any.
pub fn mine(transactions: &[Transaction], constraints: &Constraints) -> Result<Mining> {
    let started = Instant::now();
    constraints.validate(transactions.len())?;
    let index = index_transactions(transactions)?;
    let frequent = mine_frequent_itemsets(&index, constraints.min_support)?;
    let rules = generate_rules(&index, &frequent, constraints)?;
    info!(
        transactions = index.transaction_count(),
        items = index.len(),
        frequent = frequent.len(),
        rules = rules.len(),
        ms = started.elapsed().as_secs_f64() * 1000.0,
        "mining complete"
    );
    Ok(Mining {
        constraints: *constraints,
        index,
        frequent,
        rules,
    })
}
