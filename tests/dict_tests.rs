use std::collections::BTreeSet;

use chained_dict::{BuildSdbmHasher, Dict, DictKind, HashTable, Mapping, OrderedMap};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rstest::rstest;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890_";

/// Makes `n` distinct strings, each a random shuffle of the charset.
fn random_strings(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut charset = CHARSET.to_vec();
    let mut seen = BTreeSet::new();
    let mut strs = Vec::with_capacity(n);

    while strs.len() < n {
        charset.shuffle(&mut rng);
        let s = String::from_utf8(charset.clone()).unwrap();
        if seen.insert(s.clone()) {
            strs.push(s);
        }
    }

    strs
}

fn make_dict<V>(kind: DictKind) -> Dict<String, V, BuildSdbmHasher> {
    match kind {
        DictKind::Table => Dict::create_table_with_hash_builder(0, BuildSdbmHasher),
        DictKind::Map => Dict::Map(OrderedMap::new()),
    }
}

fn collect_walk<M: Mapping<String, usize>>(dict: &M) -> Vec<(String, usize)> {
    let mut seen = Vec::new();
    dict.walk(|k, v| seen.push((k.clone(), *v)));
    seen
}

#[rstest]
#[case::table(DictKind::Table)]
#[case::map(DictKind::Map)]
fn empty_dict_has_nothing(#[case] kind: DictKind) {
    let mut dict = make_dict::<usize>(kind);
    assert_eq!(kind, dict.kind());

    assert_eq!(None, dict.get(&"alice".to_owned()));
    assert_eq!(None, dict.remove(&"alice".to_owned()));

    let mut visits = 0;
    dict.walk(|_, _| visits += 1);
    dict.walk_unordered(|_, _| visits += 1);
    assert_eq!(0, visits);
}

#[rstest]
#[case::table(DictKind::Table)]
#[case::map(DictKind::Map)]
fn duplicate_insert_replaces(#[case] kind: DictKind) {
    let mut dict = make_dict(kind);

    assert_eq!(None, dict.insert("alice".to_owned(), 1));
    assert_eq!(Some(1), dict.insert("alice".to_owned(), 2));
    assert_eq!(Some(&2), dict.get(&"alice".to_owned()));
    assert_eq!(1, dict.len());

    assert_eq!(Some(2), dict.remove(&"alice".to_owned()));
    assert_eq!(None, dict.get(&"alice".to_owned()));
    assert_eq!(0, dict.len());
}

#[rstest]
#[case::table(DictKind::Table)]
#[case::map(DictKind::Map)]
fn absent_is_distinct_from_stored_unit(#[case] kind: DictKind) {
    let mut dict = make_dict::<()>(kind);

    assert_eq!(None, dict.insert("alice".to_owned(), ()));
    assert_eq!(Some(&()), dict.get(&"alice".to_owned()));
    assert_eq!(None, dict.get(&"bob".to_owned()));
}

#[rstest]
#[case::table(DictKind::Table)]
#[case::map(DictKind::Map)]
fn walks_agree(#[case] kind: DictKind) {
    let mut dict = make_dict(kind);
    for (i, s) in random_strings(500, 1).into_iter().enumerate() {
        dict.insert(s, i);
    }

    let ordered = collect_walk(&dict);
    assert_eq!(500, ordered.len());
    assert!(ordered.windows(2).all(|w| w[0].0 < w[1].0));

    let mut unordered = BTreeSet::new();
    dict.walk_unordered(|k, v| {
        assert!(unordered.insert((k.clone(), *v)));
    });

    let ordered: BTreeSet<_> = ordered.into_iter().collect();
    assert_eq!(ordered, unordered);
}

#[rstest]
#[case::table(DictKind::Table)]
#[case::map(DictKind::Map)]
fn large_insert_get_remove(#[case] kind: DictKind) {
    let n = 10_000;
    let strs = random_strings(n, 42);
    let mut dict = make_dict(kind);

    for (i, s) in strs.iter().enumerate() {
        assert_eq!(None, dict.insert(s.clone(), i + 1));
    }
    assert_eq!(n, dict.len());

    for (i, s) in strs.iter().enumerate() {
        assert_eq!(Some(&(i + 1)), dict.get(s));
    }

    // take everything back out in reverse insertion order
    for (i, s) in strs.iter().enumerate().rev() {
        assert_eq!(Some(i + 1), dict.remove(s));
        assert_eq!(i, dict.len());
    }

    assert!(dict.is_empty());
    for s in strs.iter() {
        assert_eq!(None, dict.get(s));
    }
}

#[test]
fn table_length_tracks_distinct_keys() {
    let mut table = HashTable::with_hint(10);
    let mut expected = 0;

    for i in 0..200u32 {
        if table.insert(i % 150, i).is_none() {
            expected += 1;
        }
        assert_eq!(expected, table.len());
    }

    for i in (0..300u32).step_by(2) {
        if table.remove(&i).is_some() {
            expected -= 1;
        }
        assert_eq!(expected, table.len());
    }

    assert_eq!(75, table.len());
}

#[test]
fn tree_map_stays_ordered_under_churn() {
    let mut map = OrderedMap::new();
    let strs = random_strings(2000, 7);

    for (i, s) in strs.iter().enumerate() {
        map.insert(s.clone(), i);
    }
    for s in strs.iter().step_by(3) {
        assert!(map.remove(s).is_some());
    }

    let keys: Vec<&String> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(map.len(), keys.len());
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn tree_map_survives_sorted_input() {
    // ascending keys degrade the tree into a list; nothing that walks it may
    // depend on the call stack
    let mut map = OrderedMap::new();
    for i in 0..20_000u32 {
        map.insert(i, i);
    }

    let mut count = 0;
    map.walk(|k, v| {
        assert_eq!(k, v);
        count += 1;
    });
    assert_eq!(20_000, count);

    for i in (0..20_000u32).rev().step_by(500) {
        assert_eq!(Some(&i), map.get(&i));
    }

    drop(map);
}
