//! Pricing view: a single synthetic "market rate" point built from the base price.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::pick_number;
use crate::upstream::Listing;

const MARKET_RATE_COLOR: &str = "#c0f1958c";
const MARKET_RATE_DESC: &str = "Market Rate";

/// One day of the pricing widget.
///
/// The collection endpoint carries no per-day price history, so the view is a
/// placeholder: today's date at the listing's base price. It is not a
/// dynamic price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: String,
    pub price: Value,
    pub user_price: Value,
    pub min_stay: u32,
    pub booking_status: &'static str,
    pub demand_color: &'static str,
    pub demand_desc: &'static str,
}

/// Pricing view for `listing` dated `today`.
pub fn pricing_view(listing: &Listing, today: NaiveDate) -> Vec<PricePoint> {
    let base = pick_number(listing, &["base"]);
    vec![PricePoint {
        date: today.format("%Y-%m-%d").to_string(),
        price: base.clone(),
        user_price: base,
        min_stay: 1,
        booking_status: "",
        demand_color: MARKET_RATE_COLOR,
        demand_desc: MARKET_RATE_DESC,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::fake::listing;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    #[test]
    fn uses_base_price() {
        let l = listing(json!({"id": "L1", "base": 189, "min": 99}));
        let view = pricing_view(&l, day());
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!([{
                "date": "2024-07-04",
                "price": 189,
                "user_price": 189,
                "min_stay": 1,
                "booking_status": "",
                "demand_color": "#c0f1958c",
                "demand_desc": "Market Rate"
            }])
        );
    }

    #[test]
    fn missing_base_defaults_to_zero_and_is_idempotent() {
        let l = listing(json!({"id": "L1"}));
        let a = pricing_view(&l, day());
        let b = pricing_view(&l, day());
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].price, json!(0));
        assert_eq!(a[0].user_price, json!(0));
    }
}
