//! Narrow dashboard views projected from one raw listing.
//!
//! All formatters are pure and total. Fields are picked with the legacy
//! dashboard's truthiness rule: a value counts as present unless it is null,
//! `false`, numeric zero or the empty string. Absent numbers become `0`,
//! absent percentages become `"0%"`.

mod neighborhood;
mod pricing;
mod reservation;

pub use neighborhood::{neighborhood_view, ListingMetrics, MarketMetrics, NeighborhoodView};
pub use pricing::{pricing_view, PricePoint};
pub use reservation::{reservation_view, ReservationEntry, ReservationView};

use serde_json::Value;

use crate::upstream::Listing;

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First present value among `fields`, in order.
fn pick(listing: &Listing, fields: &[&str]) -> Option<Value> {
    fields
        .iter()
        .filter_map(|f| listing.get(f))
        .find(|v| is_present(v))
        .cloned()
}

fn pick_number(listing: &Listing, fields: &[&str]) -> Value {
    pick(listing, fields).unwrap_or_else(|| Value::from(0))
}

fn pick_percentage(listing: &Listing, fields: &[&str]) -> Value {
    pick(listing, fields).unwrap_or_else(|| Value::from("0%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::fake::listing;
    use serde_json::json;

    #[test]
    fn presence_follows_legacy_truthiness() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(0.0)));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!("0%")));
        assert!(is_present(&json!(-1)));
        assert!(is_present(&json!([])));
    }

    #[test]
    fn pick_skips_absent_and_falsy_fields() {
        let l = listing(json!({"a": 0, "b": "", "c": "45%"}));
        assert_eq!(pick(&l, &["a", "b", "missing", "c"]), Some(json!("45%")));
        assert_eq!(pick_number(&l, &["a"]), json!(0));
        assert_eq!(pick_percentage(&l, &["a", "b"]), json!("0%"));
    }
}
