//! The constructs a mining run is built from.
//!
//! Every construct is immutable once created. Labels are shared through
//! `Arc<str>` so that the same item appearing in thousands of transactions,
//! itemsets and rules costs a single allocation, which is what the
//! [`ItemKeeper`] is for.

use std::sync::Arc;

// the keeper hashes labels a lot, so use the same fast hasher everywhere
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashSet;

// custom made ordering for itemsets
use std::cmp::Ordering;

// used to print out readable forms of a construct
use std::fmt;

// tid-sets are compressed bitmaps
use roaring::RoaringBitmap;

// ------------- Tid -------------
pub type Tid = u32;
pub type TidSet = RoaringBitmap;

pub type LabelHasher = BuildHasherDefault<SeaHasher>;

// ------------- Item -------------
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item(Arc<str>);

impl Item {
    pub fn new(label: &str) -> Self {
        Self(Arc::from(label))
    }
    pub fn label(&self) -> &str {
        &self.0
    }
}
impl From<&str> for Item {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
impl From<String> for Item {
    fn from(label: String) -> Self {
        Self(Arc::from(label))
    }
}
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns one shared copy of every label seen while building transactions.
#[derive(Debug, Default)]
pub struct ItemKeeper {
    kept: HashSet<Arc<str>, LabelHasher>,
}
impl ItemKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashSet::default(),
        }
    }
    pub fn keep(&mut self, label: &str) -> Item {
        match self.kept.get(label) {
            Some(kept) => Item(Arc::clone(kept)),
            None => {
                let keepsake: Arc<str> = Arc::from(label);
                self.kept.insert(Arc::clone(&keepsake));
                Item(keepsake)
            }
        }
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Itemset -------------
/// A non-empty set of distinct items.
///
/// A `Multi` always holds at least two items sorted ascending by label, so
/// two itemsets built from any permutation of the same items are equal and
/// hash identically.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Itemset {
    Single(Item),
    Multi(Vec<Item>),
}

impl Itemset {
    /// Returns `None` for an empty set or when an item is repeated.
    pub fn new(mut items: Vec<Item>) -> Option<Self> {
        items.sort_unstable();
        if items.is_empty() || items.windows(2).any(|x| x[0] == x[1]) {
            return None;
        }
        Some(Self::from_canonical(items))
    }
    // caller guarantees a sorted, duplicate-free, non-empty vector
    pub(crate) fn from_canonical(mut items: Vec<Item>) -> Self {
        debug_assert!(!items.is_empty());
        debug_assert!(items.windows(2).all(|x| x[0] < x[1]));
        if items.len() == 1 {
            Self::Single(items.remove(0))
        } else {
            Self::Multi(items)
        }
    }
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Multi(items) => items,
        }
    }
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(items) => items.len(),
        }
    }
    // never empty
    pub fn is_empty(&self) -> bool {
        false
    }
    pub fn contains(&self, item: &Item) -> bool {
        match self {
            Self::Single(single) => single == item,
            Self::Multi(items) => items.binary_search(item).is_ok(),
        }
    }
    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.items().iter().all(|item| !other.contains(item))
    }
    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut items: Vec<Item> = self.items().iter().chain(other.items()).cloned().collect();
        items.sort_unstable();
        items.dedup();
        Self::from_canonical(items)
    }
    /// Items joined by `separator`, in canonical order.
    pub fn joined(&self, separator: &str) -> String {
        self.items()
            .iter()
            .map(Item::label)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
impl Ord for Itemset {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.len(), self.items()).cmp(&(other.len(), other.items()))
    }
}
impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl From<Item> for Itemset {
    fn from(item: Item) -> Self {
        Self::Single(item)
    }
}
impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.joined(", "))
    }
}

// ------------- Transaction -------------
/// Everything bought in one basket. Its tid is its position in the
/// collection handed to the indexer.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Transaction {
    items: Vec<Item>,
}
impl Transaction {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
    pub fn items(&self) -> &[Item] {
        &self.items
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
impl<I: Into<Item>> FromIterator<I> for Transaction {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let labels: Vec<&str> = self.items.iter().map(Item::label).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}

// ------------- Rule -------------
/// A directional association `antecedent -> consequent`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Rule {
    antecedent: Itemset,
    consequent: Itemset,
}
impl Rule {
    /// Returns `None` unless both sides are disjoint.
    pub fn new(antecedent: Itemset, consequent: Itemset) -> Option<Self> {
        if !antecedent.is_disjoint(&consequent) {
            return None;
        }
        Some(Self {
            antecedent,
            consequent,
        })
    }
    pub fn antecedent(&self) -> &Itemset {
        &self.antecedent
    }
    pub fn consequent(&self) -> &Itemset {
        &self.consequent
    }
    pub fn itemset(&self) -> Itemset {
        self.antecedent.union(&self.consequent)
    }
    pub fn len(&self) -> usize {
        self.antecedent.len() + self.consequent.len()
    }
    pub fn is_empty(&self) -> bool {
        false
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.antecedent, self.consequent)
    }
}

/// Support, confidence and lift of one rule, already rounded.
#[derive(Clone, Copy, PartialEq, Debug, serde::Serialize)]
pub struct RuleStats {
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}
