//! Estimated P&L derivation
//!
//! In-form feedback only. The manually entered P&L field remains the value
//! of record sent to persistence; the estimate never overwrites it.

use crate::models::Side;

/// Estimate P&L from prices and quantity, falling back to the manual field
///
/// Buy: `(exit - entry) * quantity`. Sell: `(entry - exit) * quantity`.
/// When any of the three inputs is absent or zero, the estimate falls back
/// to the user's manual P&L string, parsed as a number (0 if unparseable).
/// Recomputed on every relevant keystroke.
pub fn estimate_pnl(
    entry_price: Option<f64>,
    exit_price: Option<f64>,
    quantity: Option<f64>,
    side: Side,
    manual_pnl: &str,
) -> f64 {
    match (entry_price, exit_price, quantity) {
        (Some(entry), Some(exit), Some(qty)) if entry != 0.0 && exit != 0.0 && qty != 0.0 => {
            match side {
                Side::Buy => (exit - entry) * qty,
                Side::Sell => (entry - exit) * qty,
            }
        }
        _ => manual_pnl.trim().parse::<f64>().unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_side_estimate() {
        let estimate = estimate_pnl(Some(100.0), Some(110.0), Some(5.0), Side::Buy, "");
        assert_eq!(estimate, 50.0);
    }

    #[test]
    fn test_sell_side_estimate_inverts_sign() {
        let estimate = estimate_pnl(Some(100.0), Some(110.0), Some(5.0), Side::Sell, "");
        assert_eq!(estimate, -50.0);
    }

    #[test]
    fn test_missing_input_falls_back_to_manual() {
        assert_eq!(estimate_pnl(None, Some(110.0), Some(5.0), Side::Buy, "123.5"), 123.5);
        assert_eq!(estimate_pnl(Some(100.0), None, Some(5.0), Side::Buy, "-40"), -40.0);
        assert_eq!(estimate_pnl(Some(100.0), Some(110.0), None, Side::Buy, "7"), 7.0);
    }

    #[test]
    fn test_zero_input_falls_back_to_manual() {
        assert_eq!(estimate_pnl(Some(0.0), Some(110.0), Some(5.0), Side::Buy, "12"), 12.0);
        assert_eq!(estimate_pnl(Some(100.0), Some(110.0), Some(0.0), Side::Buy, "12"), 12.0);
    }

    #[test]
    fn test_unparseable_manual_falls_back_to_zero() {
        assert_eq!(estimate_pnl(None, None, None, Side::Buy, "n/a"), 0.0);
        assert_eq!(estimate_pnl(None, None, None, Side::Sell, ""), 0.0);
    }

    #[test]
    fn test_losing_buy_trade_is_negative() {
        let estimate = estimate_pnl(Some(110.0), Some(100.0), Some(2.0), Side::Buy, "");
        assert_eq!(estimate, -20.0);
    }
}
