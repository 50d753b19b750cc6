//! Locale-aware currency display
//!
//! Formats amounts the way the dashboard shows them: symbol prefix, fixed
//! decimals, and either Indian (12,34,567) or Western (1,234,567) digit
//! grouping.

use serde::{Deserialize, Serialize};

/// Digit grouping convention for the integer part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Last three digits, then pairs (en-IN)
    Indian,
    /// Groups of three (en-US)
    Western,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indian => "indian",
            Self::Western => "western",
        }
    }
}

impl std::str::FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indian" | "en-in" => Ok(Self::Indian),
            "western" | "en-us" => Ok(Self::Western),
            _ => Err(format!(
                "Unknown grouping: {} (valid: indian, western)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Most fraction digits a formatter will render
pub const MAX_DECIMALS: u32 = 6;

/// Round a plain non-negative decimal string (`"1.005"`) to `decimals`
/// fraction digits, half away from zero. Returns (whole, fraction).
fn round_half_up(plain: &str, decimals: usize) -> (String, String) {
    let (whole, frac) = plain.split_once('.').unwrap_or((plain, ""));

    let mut digits: Vec<u8> = whole.bytes().chain(frac.bytes()).map(|b| b - b'0').collect();
    let keep = whole.len() + decimals;
    let round_up = digits.get(keep).is_some_and(|d| *d >= 5);
    digits.resize(keep, 0);

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (whole, fraction) = text.split_at(text.len() - decimals);
    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    (whole.to_string(), fraction.to_string())
}

/// Formats amounts for display fields of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormatter {
    pub code: String,
    pub symbol: String,
    pub grouping: Grouping,
    pub decimals: u32,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
            grouping: Grouping::Indian,
            decimals: 2,
        }
    }
}

impl CurrencyFormatter {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            grouping,
            decimals: 2,
        }
    }

    /// Set the fraction digits, capped at [`MAX_DECIMALS`]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals.min(MAX_DECIMALS);
        self
    }

    /// Format an amount; non-finite values render as zero
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let decimals = self.decimals.min(MAX_DECIMALS) as usize;

        // Round the shortest decimal form so 1.005 goes up like Intl does
        let (whole, fraction) = round_half_up(&format!("{}", amount.abs()), decimals);

        let is_zero = whole.bytes().chain(fraction.bytes()).all(|b| b == b'0');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
        let grouped = self.group_digits(&whole);

        if decimals == 0 {
            format!("{}{}{}", sign, self.symbol, grouped)
        } else {
            format!("{}{}{}.{}", sign, self.symbol, grouped, fraction)
        }
    }

    fn group_digits(&self, digits: &str) -> String {
        if digits.len() <= 3 {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let head_group = match self.grouping {
            Grouping::Indian => 2,
            Grouping::Western => 3,
        };

        // Walk the head from the right in fixed-size groups
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(head_group);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }
}
