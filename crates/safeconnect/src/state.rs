//! Application state types
//!
//! Outcome envelopes for background work plus the registry check UI state.

use safeconnect_session_core::{AccountAsset, Classification, SignResult};

/// Result from a background connect.
#[derive(Clone)]
pub enum ConnectOutcome {
    Success,
    Error(String),
}

/// Result from one background signing operation, tagged with the session
/// epoch it started under. Outcomes from an older epoch are dropped unseen.
#[derive(Clone)]
pub struct OpOutcome {
    pub epoch: u64,
    pub result: Result<SignResult, String>,
}

/// Result from a background asset fetch.
#[derive(Clone)]
pub struct AssetsOutcome {
    pub epoch: u64,
    pub result: Result<Vec<AccountAsset>, String>,
}

/// Result from a background registry lookup.
#[derive(Clone)]
pub struct LookupOutcome {
    pub result: Result<(Classification, String), String>,
}

/// Registry check UI state
#[derive(Default)]
pub struct RegistryCheckState {
    pub input: String,
    pub output: Option<(Classification, String)>,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl RegistryCheckState {
    pub fn clear_results(&mut self) {
        self.output = None;
        self.error = None;
    }
}

/// Human-readable balance from a raw integer amount and a decimal count.
pub fn format_balance(raw: &str, decimals: u8) -> String {
    let Ok(amount) = raw.parse::<u128>() else {
        return raw.to_owned();
    };
    if decimals == 0 || decimals > 38 {
        return amount.to_string();
    }
    let scale = 10u128.pow(u32::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        whole.to_string()
    } else {
        let frac = format!("{frac:0width$}", width = decimals as usize);
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::format_balance;

    #[test]
    fn formats_whole_and_fractional_balances() {
        assert_eq!(format_balance("1000000000000000000", 18), "1");
        assert_eq!(format_balance("1500000000000000000", 18), "1.5");
        assert_eq!(format_balance("1", 18), "0.000000000000000001");
        assert_eq!(format_balance("0", 18), "0");
        assert_eq!(format_balance("42", 0), "42");
        assert_eq!(format_balance("not-a-number", 18), "not-a-number");
    }
}
