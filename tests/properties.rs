use eclat_miner::constraint::Constraints;
use eclat_miner::construct::{Item, Itemset, Transaction};
use eclat_miner::engine::mine;
use eclat_miner::index::index_transactions;
use eclat_miner::rules::candidate_rules;

// A small grocery log with enough overlap to reach 3- and 4-itemsets.
fn groceries() -> Vec<Transaction> {
    let raw: &[&[&str]] = &[
        &["bread", "butter", "milk"],
        &["bread", "butter", "jam", "milk"],
        &["bread", "milk"],
        &["beer", "chips"],
        &["beer", "chips", "salsa"],
        &["bread", "butter", "jam", "milk"],
        &["butter", "milk"],
        &["beer", "bread", "chips", "salsa"],
        &["bread", "butter", "jam"],
        &["bread", "butter", "jam", "milk", "salsa"],
        &["chips", "salsa"],
        &["beer", "milk"],
    ];
    raw.iter().map(|basket| basket.iter().copied().collect()).collect()
}

#[test]
fn tidsets_equal_single_item_intersections() {
    let mining = mine(&groceries(), &Constraints::new(2, 0.0, 0.0)).expect("mine");
    assert!(mining.frequent().multis().any(|(itemset, _)| itemset.len() >= 3));
    for (itemset, tidset) in mining.frequent() {
        let mut expected = mining.index().tidset(&itemset.items()[0]).unwrap().clone();
        for item in &itemset.items()[1..] {
            expected &= mining.index().tidset(item).unwrap();
        }
        assert_eq!(tidset, &expected, "tid-set of {itemset}");
        assert!(tidset.len() >= 2);
    }
}

#[test]
fn no_superset_of_an_infrequent_itemset() {
    let transactions = groceries();
    let min_support = 3;
    let mining = mine(&transactions, &Constraints::new(min_support, 0.0, 0.0)).expect("mine");
    for (itemset, _) in mining.frequent() {
        // every proper subset obtained by dropping one item must be frequent too
        if itemset.len() < 2 {
            continue;
        }
        for skip in 0..itemset.len() {
            let subset: Vec<Item> = itemset
                .items()
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, item)| item.clone())
                .collect();
            let subset = Itemset::new(subset).unwrap();
            assert!(mining.frequent().contains(&subset), "{subset} of {itemset}");
        }
    }
    // brute force: every itemset counted directly from the baskets agrees
    for (itemset, tidset) in mining.frequent() {
        let count = transactions
            .iter()
            .filter(|t| itemset.items().iter().all(|item| t.items().contains(item)))
            .count();
        assert_eq!(tidset.len() as usize, count);
        assert!(count >= min_support as usize);
    }
}

#[test]
fn every_frequent_itemset_is_found() {
    let transactions = groceries();
    let index = index_transactions(&transactions).unwrap();
    let items: Vec<Item> = index.items().cloned().collect();
    let mining = mine(&transactions, &Constraints::new(2, 0.0, 0.0)).expect("mine");
    // exhaustive check over the whole power set of the catalogue
    for mask in 1u32..(1 << items.len()) {
        let subset: Vec<Item> = items
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, item)| item.clone())
            .collect();
        let itemset = Itemset::new(subset).unwrap();
        let count = transactions
            .iter()
            .filter(|t| itemset.items().iter().all(|item| t.items().contains(item)))
            .count();
        assert_eq!(mining.frequent().contains(&itemset), count >= 2, "{itemset}");
    }
}

#[test]
fn rule_completeness() {
    let mining = mine(&groceries(), &Constraints::new(2, 0.0, 0.0)).expect("mine");
    let mut expected = 0;
    for (itemset, _) in mining.frequent().multis() {
        let k = itemset.len() as u32;
        let candidates = candidate_rules(itemset).unwrap();
        assert_eq!(candidates.len(), 2usize.pow(k) - 2);
        for rule in &candidates {
            assert_eq!(&rule.itemset(), itemset);
            assert!(rule.antecedent().is_disjoint(rule.consequent()));
        }
        expected += candidates.len();
    }
    assert_eq!(mining.rules().considered(), expected);
    // zero thresholds keep every candidate
    assert_eq!(mining.rules().len(), expected);
}

#[test]
fn statistics_stay_in_bounds() {
    let constraints = Constraints::new(2, 0.6, 1.1);
    let mining = mine(&groceries(), &constraints).expect("mine");
    assert!(!mining.rules().is_empty());
    for (rule, stats) in mining.rules() {
        assert!(0.0 <= stats.support && stats.support <= stats.confidence, "{rule}");
        assert!(stats.confidence <= 1.0, "{rule}");
        assert!(stats.lift >= 0.0, "{rule}");
        assert!(stats.confidence >= constraints.min_confidence, "{rule}");
        assert!(stats.lift >= constraints.min_lift, "{rule}");
    }
}

#[test]
fn reruns_are_identical() {
    let transactions = groceries();
    let constraints = Constraints::new(2, 0.3, 0.5);
    let first = mine(&transactions, &constraints).expect("first");
    let second = mine(&transactions, &constraints).expect("second");
    assert_eq!(first, second);
}

#[test]
fn rule_keys_do_not_depend_on_basket_order() {
    let shuffled: Vec<Transaction> = groceries()
        .into_iter()
        .map(|t| t.items().iter().rev().cloned().collect::<Vec<_>>())
        .map(Transaction::new)
        .collect();
    let constraints = Constraints::new(2, 0.3, 0.5);
    let a = mine(&groceries(), &constraints).expect("sorted");
    let b = mine(&shuffled, &constraints).expect("reversed");
    assert_eq!(a.frequent(), b.frequent());
    assert_eq!(a.rules(), b.rules());
}

#[test]
fn level_statistics_track_the_search() {
    let mining = mine(&groceries(), &Constraints::new(2, 0.0, 0.0)).expect("mine");
    let levels = mining.frequent().levels();
    assert_eq!(levels[0].level, 1);
    assert_eq!(levels[0].candidates, mining.index().len());
    // the last level found nothing, every earlier one found something
    assert_eq!(levels.last().unwrap().frequent, 0);
    let found: usize = levels.iter().map(|l| l.frequent).sum();
    assert_eq!(found, mining.frequent().len());
    for level in levels {
        assert!(level.frequent <= level.candidates);
    }
}
