//! Eclat Miner – frequent itemsets and association rules for market-basket
//! analysis.
//!
//! The miner works on the *vertical* layout of a transaction log: instead of
//! rescanning baskets, every item is mapped to the set of transaction ids
//! ("tids") it occurs in, and the tid-set of an itemset is the intersection
//! of the tid-sets of its items. Tid-sets are Roaring bitmaps, so the
//! intersections that dominate the work stay cheap.
//!
//! * A [`construct::Transaction`] is one basket; its tid is its position.
//! * An [`construct::Item`] is an opaque label shared through an
//!   [`construct::ItemKeeper`].
//! * An [`construct::Itemset`] is either a `Single` item or a canonically
//!   sorted `Multi` set, so the same set always has the same key.
//! * A [`construct::Rule`] pairs a disjoint antecedent and consequent and is
//!   scored by [`construct::RuleStats`] (support, confidence, lift).
//!
//! ## Modules
//! * [`index`] – Transaction indexer building the item → tid-set map.
//! * [`eclat`] – Level-wise ECLAT with support pruning at every level.
//! * [`rules`] – Rule enumeration, scoring, filtering and rounding.
//! * [`engine`] – One call that validates constraints and runs all three.
//! * [`constraint`] – The immutable constraint record.
//! * [`ingest`] – Purchase log CSV → transactions grouped by member and date.
//! * [`report`] – Sorted result rows and the CSV/JSON result folder.
//! * [`settings`] – Settings file and environment layer.
//!
//! ## Quick Start
//! ```
//! use eclat_miner::{constraint::Constraints, construct::Transaction, engine::mine};
//! let transactions: Vec<Transaction> = vec![
//!     ["a", "b"].into_iter().collect(),
//!     ["a", "b", "c"].into_iter().collect(),
//!     ["a", "b"].into_iter().collect(),
//!     ["b", "c"].into_iter().collect(),
//! ];
//! let mining = mine(&transactions, &Constraints::new(2, 0.5, 1.0)).unwrap();
//! assert_eq!(mining.frequent().len(), 5);
//! for (rule, stats) in mining.rules() {
//!     println!("{rule}: {stats:?}");
//! }
//! ```
//!
//! ## Parallelism
//! With the `parallel` feature candidate intersections and rule scoring run
//! on a rayon pool. Results are merged into ordered maps, so the output is
//! the same as a sequential run.

pub mod constraint;
pub mod construct;
pub mod eclat;
pub mod engine;
pub mod error;
pub mod index;
pub mod ingest;
pub mod report;
pub mod rules;
pub mod settings;

pub use error::{MiningError, Result};
