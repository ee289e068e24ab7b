use eclat_miner::MiningError;
use eclat_miner::constraint::Constraints;
use eclat_miner::construct::{Item, Itemset, Rule, Transaction};
use eclat_miner::eclat::mine_frequent_itemsets;
use eclat_miner::engine::mine;
use eclat_miner::index::index_transactions;
use eclat_miner::rules::generate_rules;

fn baskets(raw: &[&[&str]]) -> Vec<Transaction> {
    raw.iter().map(|basket| basket.iter().copied().collect()).collect()
}

fn itemset(labels: &[&str]) -> Itemset {
    Itemset::new(labels.iter().map(|l| Item::new(l)).collect()).unwrap()
}

fn rule(antecedent: &[&str], consequent: &[&str]) -> Rule {
    Rule::new(itemset(antecedent), itemset(consequent)).unwrap()
}

fn scenario_a() -> Vec<Transaction> {
    baskets(&[&["a", "b"], &["a", "b", "c"], &["a", "b"], &["b", "c"]])
}

#[test]
fn scenario_a_item_tidsets() {
    let index = index_transactions(&scenario_a()).expect("index");
    assert_eq!(index.transaction_count(), 4);
    let tids = |label: &str| -> Vec<u32> { index.tidset(&Item::new(label)).unwrap().iter().collect() };
    assert_eq!(tids("a"), [0, 1, 2]);
    assert_eq!(tids("b"), [0, 1, 2, 3]);
    assert_eq!(tids("c"), [1, 3]);
}

#[test]
fn scenario_a_frequent_itemsets() {
    let index = index_transactions(&scenario_a()).expect("index");
    let frequent = mine_frequent_itemsets(&index, 2).expect("mine");
    let keys: Vec<&Itemset> = frequent.iter().map(|(itemset, _)| itemset).collect();
    let expected = [
        itemset(&["a"]),
        itemset(&["b"]),
        itemset(&["c"]),
        itemset(&["a", "b"]),
        itemset(&["b", "c"]),
    ];
    assert_eq!(keys, expected.iter().collect::<Vec<_>>());
    assert_eq!(frequent.support_count(&itemset(&["a", "b"])), Some(3));
    assert_eq!(frequent.support_count(&itemset(&["b", "c"])), Some(2));
    // (a, c) occurs once, which blocks (a, b, c)
    assert!(!frequent.contains(&itemset(&["a", "c"])));
    assert!(!frequent.contains(&itemset(&["a", "b", "c"])));
    assert_eq!(frequent.singles().count(), 3);
    assert_eq!(frequent.multis().count(), 2);
}

#[test]
fn scenario_b_rule_statistics() {
    let transactions = scenario_a();
    let mining = mine(&transactions, &Constraints::new(2, 0.5, 1.0)).expect("mine");
    let rules = mining.rules();
    let a_b = rules.get(&rule(&["a"], &["b"])).expect("a -> b");
    assert_eq!((a_b.support, a_b.confidence, a_b.lift), (0.75, 1.0, 1.0));
    let b_a = rules.get(&rule(&["b"], &["a"])).expect("b -> a");
    assert_eq!((b_a.support, b_a.confidence, b_a.lift), (0.75, 0.75, 1.0));
    // (b, c) splits both sit exactly on the thresholds
    let b_c = rules.get(&rule(&["b"], &["c"])).expect("b -> c");
    assert_eq!((b_c.support, b_c.confidence, b_c.lift), (0.5, 0.5, 1.0));
    assert!(rules.get(&rule(&["c"], &["b"])).is_some());
    assert_eq!(rules.len(), 4);
    assert_eq!(rules.considered(), 4);
}

#[test]
fn scenario_b_thresholds_filter() {
    let transactions = scenario_a();
    let mining = mine(&transactions, &Constraints::new(2, 0.8, 1.0)).expect("mine");
    let kept: Vec<String> = mining.rules().iter().map(|(rule, _)| rule.to_string()).collect();
    assert_eq!(kept, ["{a} -> {b}", "{c} -> {b}"]);
    assert_eq!(mining.rules().considered(), 4);
}

#[test]
fn scenario_c_empty_collection() {
    let index = index_transactions(&[]).expect("index");
    assert!(index.is_empty());
    let frequent = mine_frequent_itemsets(&index, 2).expect("mine");
    assert!(frequent.is_empty());
    let rules = generate_rules(&index, &frequent, &Constraints::default()).expect("rules");
    assert!(rules.is_empty());
    let mining = mine(&[], &Constraints::default()).expect("engine");
    assert!(mining.rules().is_empty());
}

#[test]
fn scenario_d_impossible_support() {
    let transactions = scenario_a();
    let index = index_transactions(&transactions).expect("index");
    let err = mine_frequent_itemsets(&index, 5).unwrap_err();
    assert!(matches!(err, MiningError::InvalidConstraint { field: "min_support", .. }));
    let err = mine(&transactions, &Constraints::new(5, 0.5, 1.0)).unwrap_err();
    assert!(matches!(err, MiningError::InvalidConstraint { field: "min_support", .. }));
    let err = mine(&transactions, &Constraints::new(0, 0.5, 1.0)).unwrap_err();
    assert!(format!("{err}").contains("min_support"));
}

#[test]
fn exact_half_confidence_rounds_to_even() {
    let (both, a, b): (&[&str], &[&str], &[&str]) = (&["a", "b"], &["a"], &["b"]);
    let mut raw = vec![both];
    raw.extend([a; 31]);
    raw.extend([b; 40]);
    let transactions = baskets(&raw);
    let mining = mine(&transactions, &Constraints::new(1, 0.0, 0.0)).expect("mine");
    let stats = mining.rules().get(&rule(&["a"], &["b"])).expect("a -> b");
    // 1 / 32
    assert_eq!(stats.confidence, 0.0312);
    assert_eq!(stats.support, 0.013889);
}
