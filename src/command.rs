//! Chat command parsing and reply rendering
//!
//! Matches the fixed `/c AMOUNT BASE QUOTE` pattern and renders the
//! two-line conversion reply. The transport (Telegram, REPL, ...) owns
//! delivery; this module only deals in text.

use crate::format::format_amount;
use crate::types::ConversionResult;

/// A conversion request parsed out of one chat line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub amount: f64,
    pub base: String,
    pub quote: String,
}

/// Parse `/c AMOUNT BASE QUOTE` (case-insensitive). Returns None for
/// anything that does not match the pattern exactly; unrelated chat
/// lines are simply not ours.
pub fn parse_command(line: &str) -> Option<ParsedCommand> {
    let mut parts = line.trim().split_whitespace();
    let trigger = parts.next()?;
    if !trigger.eq_ignore_ascii_case("/c") {
        return None;
    }
    let amount_token = parts.next()?;
    let base = parts.next()?;
    let quote = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !is_amount(amount_token) || !is_ticker(base) || !is_ticker(quote) {
        return None;
    }
    let amount = amount_token.parse::<f64>().ok()?;
    Some(ParsedCommand {
        amount,
        base: base.to_string(),
        quote: quote.to_string(),
    })
}

/// `[0-9]*.?[0-9]+`: digits with at most one point, ending in a digit.
fn is_amount(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1
        && s.ends_with(|c: char| c.is_ascii_digit())
}

fn is_ticker(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Render the converted total and implied unit rate, both formatted
/// for the quote's asset class, labels uppercased.
pub fn render_reply(amount: f64, result: &ConversionResult) -> String {
    let total = format_amount(result.converted_amount, result.quote_class);
    let rate = format_amount(result.rate, result.quote_class);
    format!(
        "`{amount}` {base} ≈ `{total}` {quote}  \n(1 {base} = `{rate}` {quote})",
        base = result.base_label,
        quote = result.quote_label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetClass;

    #[test]
    fn test_parse_accepts_basic_command() {
        let cmd = parse_command("/c 2 btc usd").unwrap();
        assert_eq!(cmd.amount, 2.0);
        assert_eq!(cmd.base, "btc");
        assert_eq!(cmd.quote, "usd");
    }

    #[test]
    fn test_parse_accepts_decimal_amounts() {
        assert_eq!(parse_command("/c 0.5 eth sol").unwrap().amount, 0.5);
        assert_eq!(parse_command("/c .5 eth sol").unwrap().amount, 0.5);
        assert_eq!(parse_command("/C 10 ETH SOL").unwrap().base, "ETH");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_command("convert 2 btc usd"), None);
        assert_eq!(parse_command("/c btc usd"), None);
        assert_eq!(parse_command("/c 2 btc"), None);
        assert_eq!(parse_command("/c 2 btc usd extra"), None);
        assert_eq!(parse_command("/c 5. btc usd"), None);
        assert_eq!(parse_command("/c 1.2.3 btc usd"), None);
        assert_eq!(parse_command("/c -2 btc usd"), None);
        assert_eq!(parse_command("/c 2 b!c usd"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_render_reply_shape() {
        let result = ConversionResult {
            converted_amount: 130000.0,
            rate: 65000.0,
            base_label: "BTC".to_string(),
            quote_label: "USD".to_string(),
            quote_class: AssetClass::Fiat,
        };
        let reply = render_reply(2.0, &result);
        assert_eq!(
            reply,
            "`2` BTC ≈ `130,000.00` USD  \n(1 BTC = `65,000.00` USD)"
        );
    }
}
