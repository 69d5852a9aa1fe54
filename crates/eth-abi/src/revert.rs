//! Classification of revert data returned by failed contract executions.
//!
//! Classification never fails: the data originates from an arbitrary
//! external contract, so anything indeterminate resolves to
//! [`RevertKind::Unknown`] instead of an error. The raw bytes are preserved
//! in every outcome.

use std::collections::HashMap;

use serde::Serialize;

use crate::decode::decode;
use crate::schema::TypeSchema;
use crate::selector::function_selector;
use crate::value::TypedValue;

/// Selector of the standard `Error(string)` revert encoding.
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Selector of the `Panic(uint256)` revert encoding.
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// The shape a piece of revert data was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevertKind {
    /// Standard `Error(string)` revert with a reason string.
    ErrorString,
    /// Compiler-generated `Panic(uint256)` with a numeric code.
    Panic,
    /// An ABI-described custom error from the caller-supplied registry.
    Custom,
    /// Unrecognized or too-short data.
    Unknown,
}

/// The outcome of classifying revert data.
#[derive(Debug, Clone, Serialize)]
pub struct RevertDecision {
    pub kind: RevertKind,
    /// Human-readable reason; absent for [`RevertKind::Unknown`].
    pub reason: Option<String>,
    /// The original revert bytes, preserved regardless of outcome.
    pub raw: Vec<u8>,
}

/// Caller-supplied mapping from custom-error selectors to their ABI.
#[derive(Debug, Clone, Default)]
pub struct CustomErrorRegistry {
    entries: HashMap<[u8; 4], (String, Vec<TypeSchema>)>,
}

impl CustomErrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom error by name and parameter schemas, returning the
    /// selector it will be recognized by.
    pub fn register(&mut self, name: &str, params: Vec<TypeSchema>) -> [u8; 4] {
        let selector = function_selector(name, &params);
        self.entries.insert(selector, (name.to_string(), params));
        selector
    }

    fn lookup(&self, selector: &[u8; 4]) -> Option<&(String, Vec<TypeSchema>)> {
        self.entries.get(selector)
    }
}

/// Classifies raw revert data by its 4-byte selector prefix.
pub fn classify_revert(raw: &[u8], registry: &CustomErrorRegistry) -> RevertDecision {
    let Some(prefix) = raw.get(..4) else {
        return unknown(raw);
    };
    let mut selector = [0u8; 4];
    selector.copy_from_slice(prefix);
    let payload = &raw[4..];

    if selector == ERROR_STRING_SELECTOR {
        match decode(payload, &[TypeSchema::String]) {
            Ok(values) => {
                let TypedValue::String(reason) = &values[0] else {
                    return unknown(raw);
                };
                return RevertDecision {
                    kind: RevertKind::ErrorString,
                    reason: Some(reason.clone()),
                    raw: raw.to_vec(),
                };
            }
            Err(_) => return unknown(raw),
        }
    }

    if selector == PANIC_SELECTOR {
        match decode(payload, &[TypeSchema::Uint(256)]) {
            Ok(values) => {
                let TypedValue::Uint { value, .. } = &values[0] else {
                    return unknown(raw);
                };
                return RevertDecision {
                    kind: RevertKind::Panic,
                    reason: Some(panic_reason(value)),
                    raw: raw.to_vec(),
                };
            }
            Err(_) => return unknown(raw),
        }
    }

    if let Some((name, params)) = registry.lookup(&selector) {
        if let Ok(values) = decode(payload, params) {
            let args: Vec<String> = values.iter().map(TypedValue::to_string).collect();
            return RevertDecision {
                kind: RevertKind::Custom,
                reason: Some(format!("{name}({})", args.join(", "))),
                raw: raw.to_vec(),
            };
        }
    }

    unknown(raw)
}

fn unknown(raw: &[u8]) -> RevertDecision {
    RevertDecision {
        kind: RevertKind::Unknown,
        reason: None,
        raw: raw.to_vec(),
    }
}

/// Maps a Solidity panic code to its meaning. Unrecognized codes still
/// classify as panics, citing the numeric code.
fn panic_reason(word: &[u8; 32]) -> String {
    // Codes are small; anything above 64 bits is automatically unknown.
    let code = if word[..24].iter().all(|&b| b == 0) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&word[24..]);
        Some(u64::from_be_bytes(raw))
    } else {
        None
    };

    match code {
        Some(0x00) => "generic compiler panic".into(),
        Some(0x01) => "assertion failed".into(),
        Some(0x11) => "arithmetic overflow or underflow".into(),
        Some(0x12) => "division or modulo by zero".into(),
        Some(0x21) => "conversion into an invalid enum value".into(),
        Some(0x22) => "incorrectly encoded storage byte array".into(),
        Some(0x31) => "pop on an empty array".into(),
        Some(0x32) => "array index out of bounds".into(),
        Some(0x41) => "allocation of too much memory".into(),
        Some(0x51) => "call to a zero-initialized function pointer".into(),
        Some(code) => format!("unknown panic code 0x{code:x}"),
        None => format!("unknown panic code 0x{}", hex::encode(word)),
    }
}
