//! Vertical layout of a transaction collection: every item mapped to the
//! tids of the transactions that contain it.

use std::collections::BTreeMap;
use std::collections::btree_map::{Entry, Iter};

use tracing::debug;

use crate::construct::{Item, Itemset, Tid, TidSet, Transaction};
use crate::error::{MiningError, Result};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemIndex {
    tidsets: BTreeMap<Item, TidSet>,
    transactions: u32,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of transactions the index was built from (N).
    pub fn transaction_count(&self) -> u32 {
        self.transactions
    }
    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.tidsets.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tidsets.is_empty()
    }
    pub fn tidset(&self, item: &Item) -> Option<&TidSet> {
        self.tidsets.get(item)
    }
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.tidsets.keys()
    }
    pub fn iter(&self) -> Iter<'_, Item, TidSet> {
        self.tidsets.iter()
    }
    /// Tid-set of `itemset`, always recomputed as the intersection of its
    /// single-item tid-sets.
    pub fn tidset_of(&self, itemset: &Itemset) -> Result<TidSet> {
        intersect(self, itemset.items())
    }
}

impl<'a> IntoIterator for &'a ItemIndex {
    type Item = (&'a Item, &'a TidSet);
    type IntoIter = Iter<'a, Item, TidSet>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds the item index in a single pass over all (transaction, item) pairs.
///
/// An empty collection gives an empty index. An empty transaction or an item
/// repeated within one transaction is rejected, never repaired.
pub fn index_transactions(transactions: &[Transaction]) -> Result<ItemIndex> {
    let count = u32::try_from(transactions.len()).map_err(|_| {
        MiningError::malformed(
            format!("{} transactions exceed the tid range", transactions.len()),
            None,
        )
    })?;
    let mut tidsets: BTreeMap<Item, TidSet> = BTreeMap::new();
    for (position, transaction) in transactions.iter().enumerate() {
        if transaction.is_empty() {
            return Err(MiningError::malformed(
                format!("transaction {position} is empty"),
                Some(position),
            ));
        }
        // position < count, so this never truncates
        let tid = position as Tid;
        for item in transaction.items() {
            let inserted = match tidsets.entry(item.clone()) {
                Entry::Vacant(e) => e.insert(TidSet::new()).insert(tid),
                Entry::Occupied(mut e) => e.get_mut().insert(tid),
            };
            if !inserted {
                return Err(MiningError::malformed(
                    format!("item '{item}' appears twice in transaction {position}"),
                    Some(position),
                ));
            }
        }
    }
    debug!(transactions = count, items = tidsets.len(), "indexed transactions");
    Ok(ItemIndex {
        tidsets,
        transactions: count,
    })
}

// Intersection of the single-item tid-sets of `items`.
pub(crate) fn intersect(index: &ItemIndex, items: &[Item]) -> Result<TidSet> {
    let mut lookups = items.iter().map(|item| {
        index
            .tidset(item)
            .ok_or_else(|| MiningError::Computation(format!("item '{item}' is not indexed")))
    });
    let mut tidset = match lookups.next() {
        Some(first) => first?.clone(),
        None => return Err(MiningError::Computation("intersection of no items".into())),
    };
    for next in lookups {
        let next = next?;
        if tidset.is_empty() {
            continue;
        }
        tidset &= next;
    }
    Ok(tidset)
}
