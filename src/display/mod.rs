//! Display formatting for addresses, token amounts, timestamps and
//! contract return values.
//!
//! Every function here is pure and total: bad input degrades to a
//! placeholder or to the raw input, never to an error.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::hex;
use alloy::primitives::utils::format_units;
use alloy::primitives::U256;
use chrono::{Local, TimeZone};

use crate::dashboard::JobState;

/// Decimal places of HYPT and most ERC-20 tokens.
pub const DEFAULT_DECIMALS: u8 = 18;

const ADDRESS_MIN_LEN: usize = 10;

/// Shorten an address to `0x1234...abcd`.
///
/// Inputs under ten characters come back unchanged. No address validation
/// is performed.
pub fn format_address(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < ADDRESS_MIN_LEN {
        return value.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Render a base-unit amount with `decimals` places, e.g. `1.5`.
///
/// Absent or zero amounts render as `"0"`. If the amount cannot be scaled
/// the raw integer is returned instead.
pub fn format_balance(value: Option<U256>, decimals: u8) -> String {
    let amount = match value {
        Some(amount) if !amount.is_zero() => amount,
        _ => return "0".to_string(),
    };

    match format_units(amount, decimals) {
        Ok(formatted) => trim_fraction(formatted),
        Err(e) => {
            tracing::warn!(balance = %amount, decimals, error = %e, "Failed to format balance");
            amount.to_string()
        }
    }
}

/// [`format_balance`] for a decimal or `0x` hex string.
pub fn format_balance_str(raw: &str, decimals: u8) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "0".to_string();
    }
    match trimmed.parse::<U256>() {
        Ok(amount) => format_balance(Some(amount), decimals),
        Err(e) => {
            tracing::warn!(balance = raw, error = %e, "Failed to parse balance");
            raw.to_string()
        }
    }
}

// "1.500000000000000000" -> "1.5", "2.000" -> "2.0"
fn trim_fraction(mut formatted: String) -> String {
    if formatted.contains('.') {
        let kept = formatted.trim_end_matches('0').len();
        formatted.truncate(kept);
        if formatted.ends_with('.') {
            formatted.push('0');
        }
    }
    formatted
}

/// Render unix seconds as local `YYYY-MM-DD HH:MM:SS`, or `N/A`.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    match timestamp {
        Some(secs) if secs != 0 => match Local.timestamp_opt(secs, 0).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "N/A".to_string(),
        },
        _ => "N/A".to_string(),
    }
}

/// Label for a raw on-chain job state.
pub fn job_state_label(state: u8) -> &'static str {
    JobState::try_from(state)
        .map(|s| s.label())
        .unwrap_or("Unknown")
}

/// Render a decoded contract value for terminal output.
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word[..*size]))
        }
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        DynSolValue::Tuple(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("({})", inner.join(", "))
        }
        other => format!("{other:?}"),
    }
}
