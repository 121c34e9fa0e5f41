#![cfg(test)]

// Property tests for ChainMap kept inside the crate so the constant-hasher
// variant can reach `with_hasher` alongside the default build.

use crate::chain_map::ChainMap;
use crate::dump::DumpMode;
use crate::entry::Entry;
use crate::value::Value;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    InsertNumber(usize, u64),
    InsertString(usize, String),
    Remove(usize),
    Search(usize),
    Increment(usize),
    Resize(usize),
    Iterate,
}

fn arb_value_text() -> impl Strategy<Value = String> {
    "[a-z ]{0,6}"
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<u64>()).prop_map(|(i, v)| OpI::InsertNumber(i, v)),
            2 => (idx.clone(), arb_value_text()).prop_map(|(i, s)| OpI::InsertString(i, s)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Search),
            2 => idx.clone().prop_map(OpI::Increment),
            1 => (0usize..40).prop_map(OpI::Resize),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model<S: BuildHasher>(
    mut sut: ChainMap<S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, Value> = HashMap::new();

    for op in ops {
        match op {
            OpI::InsertNumber(i, v) => {
                let k = &pool[i];
                let cap_before = sut.capacity();
                let fresh = !model.contains_key(k);
                let grows = fresh && (model.len() as f64 + 1.0) / cap_before as f64 > sut.load_factor();
                let prev = sut.insert(k, v).expect("insert");
                prop_assert_eq!(prev, model.insert(k.clone(), Value::Number(v)));
                let expected_cap = if grows { cap_before * 2 } else { cap_before };
                prop_assert_eq!(sut.capacity(), expected_cap);
            }
            OpI::InsertString(i, s) => {
                let k = &pool[i];
                let prev = sut.insert(k, s.as_str()).expect("insert");
                prop_assert_eq!(prev, model.insert(k.clone(), Value::String(s)));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                prop_assert!(sut.search(k).is_none());
            }
            OpI::Search(i) => {
                let k = &pool[i];
                let found = sut.search(k);
                prop_assert_eq!(found.map(Entry::value), model.get(k));
                if let Some(e) = found {
                    prop_assert_eq!(e.key(), k.as_str());
                }
            }
            OpI::Increment(i) => {
                let k = &pool[i];
                if let Some(Value::Number(n)) = sut.search_mut(k).map(Entry::value_mut) {
                    *n = n.wrapping_add(1);
                }
                if let Some(Value::Number(n)) = model.get_mut(k) {
                    *n = n.wrapping_add(1);
                }
            }
            OpI::Resize(n) => {
                sut.resize(n).expect("resize");
                prop_assert_eq!(sut.capacity(), n.max(1));
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|e| e.key().to_string()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), model.len());
    }

    // Every surviving entry is found with its latest value.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `len` equals the number of distinct live keys and the number of
//   entries reachable by iteration.
// - Re-inserting updates in place and returns the previous value.
// - Capacity doubles exactly when a fresh insert would exceed the load
//   factor; explicit resizes keep every entry reachable.
// - `remove` succeeds only for live keys and leaves them unreachable.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), cap in 1usize..8, lf in 0.25f64..4.0) {
        let sut = ChainMap::with_capacity_and_load_factor(cap, lf).unwrap();
        run_against_model(sut, &pool, ops)?;
    }
}

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same invariants under worst-case collisions, where every key
// shares one hash and correctness rests on full-key comparison.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ChainMap::with_hasher(2, 1.0, ConstBuildHasher).unwrap();
        run_against_model(sut, &pool, ops)?;
    }
}

// Property: A KEY_VALUE dump parses back to exactly the live pairs.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_key_value_dump_round_trips(words in proptest::collection::vec("[a-z]{1,4}", 0..60)) {
        let mut sut = ChainMap::with_capacity_and_load_factor(1, 0.75).unwrap();
        let mut model: HashMap<String, u64> = HashMap::new();
        for w in &words {
            crate::freq::tally(&mut sut, w).unwrap();
            *model.entry(w.clone()).or_insert(0) += 1;
        }
        let mut out = Vec::new();
        sut.dump(&mut out, DumpMode::KeyValue).unwrap();
        let text = String::from_utf8(out).unwrap();
        let parsed: HashMap<String, u64> = text
            .lines()
            .map(|line| {
                let (k, v) = line.split_once('\t').expect("tab-separated record");
                (k.to_string(), v.parse().expect("decimal value"))
            })
            .collect();
        prop_assert_eq!(text.lines().count(), model.len());
        prop_assert_eq!(parsed, model);
    }
}
