#![no_main]

use std::collections::VecDeque;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use redlite::Db;

#[derive(Arbitrary, Debug)]
enum ListOp {
    RPush(Vec<Vec<u8>>),
    LPush(Vec<Vec<u8>>),
    LPop,
    RPop,
    LBatchDelete(i64),
    RBatchDelete(i64),
    Index(i64),
}

fuzz_target!(|ops: Vec<ListOp>| {
    let Ok(db) = Db::in_memory() else {
        return;
    };
    let Ok(bucket) = db.bucket("fuzz") else {
        return;
    };
    let Ok(list) = bucket.list("list") else {
        return;
    };
    let mut model: VecDeque<Vec<u8>> = VecDeque::new();

    // Limit operations to prevent timeout
    for op in ops.into_iter().take(100) {
        match op {
            ListOp::RPush(values) => {
                let len = list.rpush(&values).unwrap();
                model.extend(values);
                assert_eq!(len, model.len() as i64);
            }
            ListOp::LPush(values) => {
                let len = list.lpush(&values).unwrap();
                for value in values {
                    model.push_front(value);
                }
                assert_eq!(len, model.len() as i64);
            }
            ListOp::LPop => assert_eq!(list.lpop().unwrap(), model.pop_front()),
            ListOp::RPop => assert_eq!(list.rpop().unwrap(), model.pop_back()),
            ListOp::LBatchDelete(count) => match list.lbatch_delete(count) {
                Ok(removed) => {
                    model.drain(..removed as usize);
                }
                Err(_) => assert!(count < 1),
            },
            ListOp::RBatchDelete(count) => match list.rbatch_delete(count) {
                Ok(removed) => {
                    model.truncate(model.len() - removed as usize);
                }
                Err(_) => assert!(count < 1),
            },
            ListOp::Index(i) => {
                let expected = usize::try_from(i).ok().and_then(|i| model.get(i)).cloned();
                assert_eq!(list.index(i).unwrap(), expected);
            }
        }
        assert_eq!(list.len().unwrap(), model.len() as i64);
    }

    let _ = db.close();
});
