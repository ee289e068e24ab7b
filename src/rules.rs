//! Association rules derived from frequent itemsets.
//!
//! Each frequent itemset of size `k >= 2` is split every non-trivial way into
//! an antecedent and a consequent (`2^k - 2` candidates). Both sides get their
//! tid-sets from the single-item index rather than from the frequent itemset
//! map, so a rule never depends on which subsets the miner happened to keep.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::constraint::Constraints;
use crate::construct::{Item, Itemset, Rule, RuleStats};
use crate::eclat::FrequentItemsets;
use crate::error::{MiningError, Result};
use crate::index::ItemIndex;

pub const SUPPORT_PRECISION: i32 = 6;
pub const CONFIDENCE_PRECISION: i32 = 4;
pub const LIFT_PRECISION: i32 = 4;

// 2^k - 2 splits must fit in memory
pub const MAX_RULE_ITEMS: usize = 24;

/// Qualified rules mapped to their rounded statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    rules: BTreeMap<Rule, RuleStats>,
    considered: usize,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
    /// Candidate rules scored before thresholds were applied.
    pub fn considered(&self) -> usize {
        self.considered
    }
    pub fn get(&self, rule: &Rule) -> Option<&RuleStats> {
        self.rules.get(rule)
    }
    pub fn iter(&self) -> Iter<'_, Rule, RuleStats> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a Rule, &'a RuleStats);
    type IntoIter = Iter<'a, Rule, RuleStats>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// All `2^k - 2` antecedent/consequent splits of `itemset`, empty for a
/// single item.
pub fn candidate_rules(itemset: &Itemset) -> Result<Vec<Rule>> {
    let items = itemset.items();
    let k = items.len();
    if k < 2 {
        return Ok(Vec::new());
    }
    if k > MAX_RULE_ITEMS {
        return Err(MiningError::Computation(format!(
            "itemset of {k} items is too large to split into rules"
        )));
    }
    let full: u64 = (1 << k) - 1;
    let mut rules = Vec::with_capacity(full as usize - 1);
    for mask in 1..full {
        let (antecedent, consequent): (Vec<(usize, &Item)>, Vec<(usize, &Item)>) = items
            .iter()
            .enumerate()
            .partition(|&(i, _)| mask & (1 << i) != 0);
        let antecedent = Itemset::from_canonical(owned(antecedent));
        let consequent = Itemset::from_canonical(owned(consequent));
        let rule = Rule::new(antecedent, consequent).ok_or_else(|| {
            MiningError::Computation(format!("split of {itemset} is not disjoint"))
        })?;
        rules.push(rule);
    }
    Ok(rules)
}

/// Unrounded statistics of `rule` over the transactions behind `index`.
pub fn score_rule(index: &ItemIndex, rule: &Rule) -> Result<RuleStats> {
    let antecedent = index.tidset_of(rule.antecedent())?;
    let consequent = index.tidset_of(rule.consequent())?;
    if antecedent.is_empty() {
        return Err(MiningError::Computation(format!(
            "antecedent {} of {rule} has an empty tid-set",
            rule.antecedent()
        )));
    }
    if consequent.is_empty() {
        return Err(MiningError::Computation(format!(
            "consequent {} of {rule} has an empty tid-set",
            rule.consequent()
        )));
    }
    let n = f64::from(index.transaction_count());
    let joint = antecedent.intersection_len(&consequent) as f64;
    let support = joint / n;
    let confidence = joint / antecedent.len() as f64;
    let lift = confidence / (consequent.len() as f64 / n);
    Ok(RuleStats {
        support,
        confidence,
        lift,
    })
}

/// Scores every candidate rule of every frequent itemset of size two or more
/// and keeps those with `confidence >= min_confidence` and
/// `lift >= min_lift`. Statistics are rounded before they are returned.
pub fn generate_rules(
    index: &ItemIndex,
    frequent: &FrequentItemsets,
    constraints: &Constraints,
) -> Result<RuleSet> {
    constraints.validate_thresholds()?;
    let itemsets: Vec<&Itemset> = frequent.multis().map(|(itemset, _)| itemset).collect();

    let qualify = |itemset: &Itemset| -> Result<(usize, Vec<(Rule, RuleStats)>)> {
        let candidates = candidate_rules(itemset)?;
        let considered = candidates.len();
        let mut kept = Vec::new();
        for rule in candidates {
            let stats = score_rule(index, &rule)?;
            if stats.confidence >= constraints.min_confidence && stats.lift >= constraints.min_lift {
                kept.push((rule, rounded(stats)));
            }
        }
        Ok((considered, kept))
    };

    #[cfg(feature = "parallel")]
    let scored: Vec<Result<(usize, Vec<(Rule, RuleStats)>)>> =
        itemsets.into_par_iter().map(qualify).collect();

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<Result<(usize, Vec<(Rule, RuleStats)>)>> =
        itemsets.into_iter().map(qualify).collect();

    let mut rule_set = RuleSet::default();
    for itemset_rules in scored {
        let (considered, kept) = itemset_rules?;
        rule_set.considered += considered;
        rule_set.rules.extend(kept);
    }
    debug!(considered = rule_set.considered, kept = rule_set.len(), "generated rules");
    Ok(rule_set)
}

fn owned(side: Vec<(usize, &Item)>) -> Vec<Item> {
    side.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Rounds to `places` decimals, resolving exact halves to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

fn rounded(stats: RuleStats) -> RuleStats {
    RuleStats {
        support: round_to(stats.support, SUPPORT_PRECISION),
        confidence: round_to(stats.confidence, CONFIDENCE_PRECISION),
        lift: round_to(stats.lift, LIFT_PRECISION),
    }
}
