// Integration tests for list operations

mod common;

use std::collections::VecDeque;
use std::ops::ControlFlow;

use common::DbTestFixture;
use proptest::prelude::*;
use redlite::{Db, Error, ValueKind};

fn strings(values: Vec<Vec<u8>>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| String::from_utf8(v).unwrap())
        .collect()
}

#[test]
fn test_push_pop_and_batch_delete_walkthrough() {
    let fixture = DbTestFixture::new();
    let bucket = fixture.bucket();
    let list = bucket.list("user:latermoon:photos").unwrap();

    list.rpush(&["d", "c", "b", "a"]).unwrap();
    list.lpush(&["D", "C"]).unwrap();
    list.lpush(&["B", "A"]).unwrap();

    assert_eq!(list.len().unwrap(), 8);
    assert_eq!(list.index(0).unwrap(), Some(b"A".to_vec()));
    assert_eq!(
        strings(list.to_vec().unwrap()),
        ["A", "B", "C", "D", "d", "c", "b", "a"]
    );
    assert_eq!(
        bucket.type_of("user:latermoon:photos").unwrap(),
        ValueKind::List
    );

    assert_eq!(list.lpop().unwrap(), Some(b"A".to_vec()));
    assert_eq!(list.rpop().unwrap(), Some(b"a".to_vec()));
    assert_eq!(list.rpop().unwrap(), Some(b"b".to_vec()));
    assert_eq!(list.lpop().unwrap(), Some(b"B".to_vec()));
    assert_eq!(list.len().unwrap(), 4);

    assert_eq!(list.lbatch_delete(2).unwrap(), 2);
    assert_eq!(list.index(0).unwrap(), Some(b"d".to_vec()));
    assert_eq!(list.index(1).unwrap(), Some(b"c".to_vec()));

    assert_eq!(list.rbatch_delete(2).unwrap(), 2);
    assert_eq!(list.len().unwrap(), 0);
    assert_eq!(
        bucket.type_of("user:latermoon:photos").unwrap(),
        ValueKind::None
    );
}

#[test]
fn test_empty_list() {
    let fixture = DbTestFixture::new();
    let list = fixture.bucket().list("nothing").unwrap();

    assert_eq!(list.len().unwrap(), 0);
    assert!(list.is_empty().unwrap());
    assert_eq!(list.index(0).unwrap(), None);
    assert_eq!(list.lpop().unwrap(), None);
    assert_eq!(list.rpop().unwrap(), None);
    assert_eq!(list.lbatch_delete(5).unwrap(), 0);
    assert!(list.to_vec().unwrap().is_empty());
}

#[test]
fn test_index_out_of_range() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("l").unwrap();
    list.rpush(&["a", "b", "c"]).unwrap();

    assert_eq!(list.index(2).unwrap(), Some(b"c".to_vec()));
    assert_eq!(list.index(3).unwrap(), None);
    assert_eq!(list.index(-1).unwrap(), None);
    assert_eq!(list.index(i64::MAX).unwrap(), None);
}

#[test]
fn test_range_reports_offsets() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("l").unwrap();
    list.rpush(&["c", "d", "e"]).unwrap();
    list.lpush(&["b", "a"]).unwrap();

    let mut seen = Vec::new();
    list.range(1, 3, |offset, value| {
        seen.push((offset, String::from_utf8_lossy(value).into_owned()));
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![
            (1, "b".to_string()),
            (2, "c".to_string()),
            (3, "d".to_string())
        ]
    );
}

#[test]
fn test_range_clamps_and_stops_early() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("l").unwrap();
    list.rpush(&["a", "b", "c", "d"]).unwrap();

    let mut offsets = Vec::new();
    list.range(2, 100, |offset, _| {
        offsets.push(offset);
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(offsets, vec![2, 3]);

    let mut visited = 0;
    list.range(0, -1, |_, _| {
        visited += 1;
        if visited == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();
    assert_eq!(visited, 2);

    // Starting past the end visits nothing
    let mut called = false;
    list.range(4, -1, |_, _| {
        called = true;
        ControlFlow::Continue(())
    })
    .unwrap();
    assert!(!called);
}

#[test]
fn test_range_rejects_bad_bounds() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("l").unwrap();
    list.rpush(&["a"]).unwrap();

    let noop = |_: i64, _: &[u8]| ControlFlow::Continue(());
    assert!(matches!(list.range(-1, 2, noop), Err(Error::InvalidArgument(_))));
    assert!(matches!(list.range(3, 1, noop), Err(Error::InvalidArgument(_))));
    assert!(matches!(list.range(0, -2, noop), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_batch_delete_rejects_non_positive_count() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("l").unwrap();
    list.rpush(&["a"]).unwrap();

    assert!(matches!(list.lbatch_delete(0), Err(Error::InvalidArgument(_))));
    assert!(matches!(list.rbatch_delete(-3), Err(Error::InvalidArgument(_))));
    assert_eq!(list.len().unwrap(), 1);
}

#[test]
fn test_batch_delete_larger_than_list() {
    let db = Db::in_memory().unwrap();
    let bucket = db.bucket("0").unwrap();
    let list = bucket.list("l").unwrap();
    list.rpush(&["a", "b", "c"]).unwrap();

    assert_eq!(list.rbatch_delete(10).unwrap(), 3);
    assert_eq!(bucket.type_of("l").unwrap(), ValueKind::None);

    // The list can be recreated afterwards
    assert_eq!(list.lpush(&["z"]).unwrap(), 1);
    assert_eq!(bucket.type_of("l").unwrap(), ValueKind::List);
}

#[test]
fn test_lists_are_isolated_from_each_other() {
    let db = Db::in_memory().unwrap();
    let bucket = db.bucket("0").unwrap();
    let short = bucket.list("a").unwrap();
    let long = bucket.list("ab").unwrap();

    short.rpush(&["1", "2"]).unwrap();
    long.rpush(&["x", "y", "z"]).unwrap();

    assert_eq!(short.len().unwrap(), 2);
    assert_eq!(long.len().unwrap(), 3);
    assert_eq!(short.rbatch_delete(5).unwrap(), 2);
    assert_eq!(strings(long.to_vec().unwrap()), ["x", "y", "z"]);
}

#[test]
fn test_binary_values() {
    let db = Db::in_memory().unwrap();
    let list = db.bucket("0").unwrap().list("bin").unwrap();
    let values: Vec<Vec<u8>> = vec![vec![0, 0, 0], vec![0xff; 16], Vec::new()];
    list.rpush(&values).unwrap();

    assert_eq!(list.to_vec().unwrap(), values);
    assert_eq!(list.index(2).unwrap(), Some(Vec::new()));
}

#[test]
fn test_list_survives_reopen() {
    let mut fixture = DbTestFixture::new();
    fixture
        .bucket()
        .list("queue")
        .unwrap()
        .rpush(&["one", "two", "three"])
        .unwrap();

    fixture.reopen();

    let list = fixture.bucket().list("queue").unwrap();
    assert_eq!(list.lpop().unwrap(), Some(b"one".to_vec()));
    assert_eq!(strings(list.to_vec().unwrap()), ["two", "three"]);
}

#[derive(Debug, Clone)]
enum Op {
    RPush(Vec<Vec<u8>>),
    LPush(Vec<Vec<u8>>),
    LPop,
    RPop,
    LBatchDelete(i64),
    RBatchDelete(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let values = prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 0..4);
    prop_oneof![
        values.clone().prop_map(Op::RPush),
        values.prop_map(Op::LPush),
        Just(Op::LPop),
        Just(Op::RPop),
        (1i64..5).prop_map(Op::LBatchDelete),
        (1i64..5).prop_map(Op::RBatchDelete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_list_matches_vecdeque(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let db = Db::in_memory().unwrap();
        let bucket = db.bucket("0").unwrap();
        let list = bucket.list("model").unwrap();
        let mut model: VecDeque<Vec<u8>> = VecDeque::new();

        for op in ops {
            match op {
                Op::RPush(values) => {
                    let len = list.rpush(&values).unwrap();
                    model.extend(values);
                    prop_assert_eq!(len, model.len() as i64);
                }
                Op::LPush(values) => {
                    let len = list.lpush(&values).unwrap();
                    for value in values {
                        model.push_front(value);
                    }
                    prop_assert_eq!(len, model.len() as i64);
                }
                Op::LPop => {
                    prop_assert_eq!(list.lpop().unwrap(), model.pop_front());
                }
                Op::RPop => {
                    prop_assert_eq!(list.rpop().unwrap(), model.pop_back());
                }
                Op::LBatchDelete(count) => {
                    let removed = list.lbatch_delete(count).unwrap();
                    let expected = (count as usize).min(model.len());
                    model.drain(..expected);
                    prop_assert_eq!(removed, expected as i64);
                }
                Op::RBatchDelete(count) => {
                    let removed = list.rbatch_delete(count).unwrap();
                    let expected = (count as usize).min(model.len());
                    model.truncate(model.len() - expected);
                    prop_assert_eq!(removed, expected as i64);
                }
            }

            prop_assert_eq!(list.len().unwrap(), model.len() as i64);
            let expected_kind = if model.is_empty() { ValueKind::None } else { ValueKind::List };
            prop_assert_eq!(bucket.type_of("model").unwrap(), expected_kind);
        }

        prop_assert_eq!(list.to_vec().unwrap(), model.into_iter().collect::<Vec<_>>());
    }
}
