//! Level-wise ECLAT over the vertical item index.
//!
//! Level `k` holds the frequent `k`-itemsets with their tid-sets. The next
//! level is generated from the item universe of the survivors: every
//! `(k+1)`-combination of the items appearing in some frequent `k`-itemset
//! becomes a candidate, and its tid-set is the intersection of the tid-sets
//! of its single items. A candidate below minimum support is dropped on the
//! spot and therefore never extended, which is what keeps the search bounded.
//! Mining stops at the first level with no survivors.

use std::collections::btree_map::Iter;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::constraint::check_min_support;
use crate::construct::{Item, Itemset, TidSet};
use crate::error::Result;
use crate::index::{ItemIndex, intersect};

/// Candidate volume of one level of the search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct LevelStats {
    pub level: usize,
    pub candidates: usize,
    pub frequent: usize,
}

/// Every frequent itemset of a run mapped to its tid-set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequentItemsets {
    itemsets: BTreeMap<Itemset, TidSet>,
    levels: Vec<LevelStats>,
    min_support: u32,
}

impl FrequentItemsets {
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }
    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }
    pub fn min_support(&self) -> u32 {
        self.min_support
    }
    pub fn levels(&self) -> &[LevelStats] {
        &self.levels
    }
    pub fn get(&self, itemset: &Itemset) -> Option<&TidSet> {
        self.itemsets.get(itemset)
    }
    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.itemsets.contains_key(itemset)
    }
    pub fn support_count(&self, itemset: &Itemset) -> Option<u64> {
        self.itemsets.get(itemset).map(TidSet::len)
    }
    pub fn iter(&self) -> Iter<'_, Itemset, TidSet> {
        self.itemsets.iter()
    }
    /// Frequent 1-itemsets.
    pub fn singles(&self) -> impl Iterator<Item = (&Item, &TidSet)> {
        self.itemsets.iter().filter_map(|(itemset, tidset)| match itemset {
            Itemset::Single(item) => Some((item, tidset)),
            Itemset::Multi(_) => None,
        })
    }
    /// Frequent itemsets of size two or more, the only ones that yield rules.
    pub fn multis(&self) -> impl Iterator<Item = (&Itemset, &TidSet)> {
        self.itemsets
            .iter()
            .filter(|(itemset, _)| matches!(itemset, Itemset::Multi(_)))
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = (&'a Itemset, &'a TidSet);
    type IntoIter = Iter<'a, Itemset, TidSet>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mines every itemset whose support count reaches `min_support`.
///
/// Fails with an invalid constraint before any intersection work unless
/// `1 <= min_support <= N`. An empty index yields an empty result.
pub fn mine_frequent_itemsets(index: &ItemIndex, min_support: u32) -> Result<FrequentItemsets> {
    check_min_support(min_support, index.transaction_count() as usize)?;
    let threshold = u64::from(min_support);

    let mut itemsets = BTreeMap::new();
    let mut levels = Vec::new();
    let mut level = 1;
    let mut current: Vec<(Itemset, TidSet)> = index
        .iter()
        .map(|(item, tidset)| (Itemset::Single(item.clone()), tidset.clone()))
        .collect();
    let mut generated = current.len();

    loop {
        current.retain(|(_, tidset)| tidset.len() >= threshold);
        levels.push(LevelStats {
            level,
            candidates: generated,
            frequent: current.len(),
        });
        debug!(level, candidates = generated, frequent = current.len(), "mined level");
        if current.is_empty() {
            break;
        }
        // sorted, so combinations come out in canonical order
        let universe: Vec<Item> = current
            .iter()
            .flat_map(|(itemset, _)| itemset.items())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        itemsets.extend(current.drain(..));

        level += 1;
        let candidates: Vec<Vec<Item>> = Combinations::new(&universe, level).collect();
        generated = candidates.len();
        current = surviving_candidates(index, candidates, threshold)?;
    }

    Ok(FrequentItemsets {
        itemsets,
        levels,
        min_support,
    })
}

// Intersects every candidate and keeps the frequent ones, in candidate order.
fn surviving_candidates(
    index: &ItemIndex,
    candidates: Vec<Vec<Item>>,
    threshold: u64,
) -> Result<Vec<(Itemset, TidSet)>> {
    let survive = |items: Vec<Item>| -> Result<Option<(Itemset, TidSet)>> {
        let tidset = intersect(index, &items)?;
        if tidset.len() >= threshold {
            Ok(Some((Itemset::from_canonical(items), tidset)))
        } else {
            Ok(None)
        }
    };

    #[cfg(feature = "parallel")]
    let scored: Vec<Result<Option<(Itemset, TidSet)>>> =
        candidates.into_par_iter().map(survive).collect();

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<Result<Option<(Itemset, TidSet)>>> =
        candidates.into_iter().map(survive).collect();

    let mut survivors = Vec::new();
    for candidate in scored {
        if let Some(survivor) = candidate? {
            survivors.push(survivor);
        }
    }
    Ok(survivors)
}

/// Lexicographic `k`-combinations of a slice, preserving slice order inside
/// each combination.
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> Combinations<'a, T> {
    pub fn new(pool: &'a [T], k: usize) -> Self {
        Self {
            pool,
            indices: (0..k).collect(),
            done: k == 0 || k > pool.len(),
        }
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let combination = self.indices.iter().map(|&i| self.pool[i].clone()).collect();
        let n = self.pool.len();
        let k = self.indices.len();
        // rightmost index that can still move forward
        match (0..k).rev().find(|&i| self.indices[i] < n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(combination)
    }
}
