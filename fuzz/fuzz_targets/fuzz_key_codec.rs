#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use redlite_core::keys::{
    decode_list_index, element_key, encode_list_prefix, is_valid_logical_key, prefix_successor,
};

#[derive(Arbitrary, Debug)]
struct Input {
    key: Vec<u8>,
    index: i64,
    other: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if !is_valid_logical_key(&input.key) {
        return;
    }
    let prefix = encode_list_prefix(&input.key);

    // Element keys decode back to their index
    let physical = element_key(&prefix, input.index);
    assert_eq!(decode_list_index(&physical, &prefix), Some(input.index));

    // Non-negative indices sort like the integers they encode
    if input.index >= 0 && input.index < i64::MAX {
        assert!(physical < element_key(&prefix, input.index + 1));
    }

    // Element keys of a different list never decode under this prefix
    if is_valid_logical_key(&input.other) && input.other != input.key {
        let foreign = element_key(&encode_list_prefix(&input.other), input.index);
        assert_eq!(decode_list_index(&foreign, &prefix), None);
    }

    // Arbitrary bytes never panic the decoder
    let _ = decode_list_index(&input.other, &prefix);

    if let Some(successor) = prefix_successor(&prefix) {
        assert!(physical < successor);
    }
});
