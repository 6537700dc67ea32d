//! Physical key layout.
//!
//! Every logical value is flattened into keys of a single ordered keyspace:
//!
//! ```text
//! type marker   + <key> , <tag>                      (1 + n + 1 + 1 bytes)
//! list element  l [ <key> ] 0x00 <index: i64 BE>     (1 + 1 + n + 1 + 1 + 8 bytes)
//! ```
//!
//! Scalar strings store their value directly under their type marker. Lists
//! keep an empty marker (`+<key>,l`) while they hold at least one element.
//! Logical keys must not contain any of the four delimiter bytes, otherwise
//! two lists could share a prefix.

use crate::kind::ValueKind;

/// Leading byte of every type marker entry.
pub const KEY_PREFIX: u8 = b'+';

/// Separates the logical key from the kind tag in a type marker.
pub const SEPARATOR: u8 = b',';

/// Opens the logical key inside a list element key.
pub const START_OF_KEY: u8 = b'[';

/// Closes the logical key inside a list element key.
pub const END_OF_KEY: u8 = b']';

/// Isolates the index suffix from the key section of list element keys.
pub const LIST_ISOLATION: u8 = 0x00;

/// Bias point of the list index space.
///
/// A right push onto an absent list continues from `LIST_BIAS - 1`, a left
/// push from `LIST_BIAS + 1`, so the first element lands on `LIST_BIAS`
/// either way with 2^55 free slots on each side.
pub const LIST_BIAS: i64 = 1 << 55;

/// Lowest index a list element may occupy.
///
/// Big-endian two's complement only sorts correctly among non-negative
/// values, so negative indices are never written.
pub const MIN_LIST_INDEX: i64 = 0;

/// Highest index a list element may occupy.
pub const MAX_LIST_INDEX: i64 = i64::MAX;

const RESERVED: [u8; 4] = [KEY_PREFIX, SEPARATOR, START_OF_KEY, END_OF_KEY];

/// Returns `true` when `key` contains none of the reserved delimiter bytes.
pub fn is_valid_logical_key(key: &[u8]) -> bool {
    !key.iter().any(|b| RESERVED.contains(b))
}

/// `+<key>,`: shared by the markers of every kind for `key`.
pub fn marker_prefix(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 2);
    out.push(KEY_PREFIX);
    out.extend_from_slice(key);
    out.push(SEPARATOR);
    out
}

/// `+<key>,<tag>`: the type marker of `key` as `kind`.
pub fn encode_scalar_key(key: &[u8], kind: ValueKind) -> Vec<u8> {
    let mut out = marker_prefix(key);
    out.push(kind.tag());
    out
}

/// `l[<key>]\0`: common prefix of every element of the list `key`.
pub fn encode_list_prefix(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len() + 4 + 8);
    out.push(ValueKind::List.tag());
    out.push(START_OF_KEY);
    out.extend_from_slice(key);
    out.push(END_OF_KEY);
    out.push(LIST_ISOLATION);
    out
}

/// Element key for `index` under an already encoded list prefix.
pub fn element_key(prefix: &[u8], index: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + 8);
    out.extend_from_slice(prefix);
    out.extend_from_slice(&index.to_be_bytes());
    out
}

/// Element key for `index` of the list `key`.
pub fn encode_list_element_key(key: &[u8], index: i64) -> Vec<u8> {
    element_key(&encode_list_prefix(key), index)
}

/// Extracts the index of a list element key.
///
/// Returns `None` when `physical` does not start with `prefix` or the
/// remainder is not exactly eight bytes.
pub fn decode_list_index(physical: &[u8], prefix: &[u8]) -> Option<i64> {
    let suffix = physical.strip_prefix(prefix)?;
    let bytes: [u8; 8] = suffix.try_into().ok()?;
    Some(i64::from_be_bytes(bytes))
}

/// Smallest key that sorts after every key starting with `prefix`.
///
/// `None` means no such key exists (the prefix is empty or all `0xff`).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut out = prefix.to_vec();
    while let Some(last) = out.pop() {
        if last < u8::MAX {
            out.push(last + 1);
            return Some(out);
        }
    }
    None
}
