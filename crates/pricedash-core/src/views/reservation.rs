//! Reservation view derived from a listing's last booking.

use serde::Serialize;
use serde_json::Value;

use super::{pick, pick_number};
use crate::upstream::Listing;

const DEFAULT_CHANNEL: &str = "airbnb";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationEntry {
    pub listing_id: Value,
    pub check_in: Value,
    pub booking_status: &'static str,
    pub rental_revenue: Value,
}

/// Reservation widget body. Pagination is never offered: `next_page` is always false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationView {
    /// Usually a string; a non-string `pms` on the listing is echoed as-is.
    pub pms_name: Value,
    pub next_page: bool,
    pub data: Vec<ReservationEntry>,
}

/// Reservation view for `listing`.
///
/// The channel name is the listing's own `pms`, else `channel`, else `airbnb`.
/// At most one entry is produced: the last booking, when the listing has one.
pub fn reservation_view(listing: &Listing, channel: Option<&str>) -> ReservationView {
    let pms_name = pick(listing, &["pms"])
        .or_else(|| {
            channel
                .filter(|c| !c.trim().is_empty())
                .map(Value::from)
        })
        .unwrap_or_else(|| Value::from(DEFAULT_CHANNEL));

    let data = pick(listing, &["last_booked_date"])
        .map(|check_in| ReservationEntry {
            listing_id: listing.get("id").cloned().unwrap_or(Value::Null),
            check_in,
            booking_status: "booked",
            rental_revenue: pick_number(listing, &["revenue_past_30"]),
        })
        .into_iter()
        .collect();

    ReservationView {
        pms_name,
        next_page: false,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::fake::listing;
    use serde_json::json;

    #[test]
    fn no_last_booking_yields_empty_airbnb_view() {
        let l = listing(json!({"id": "L1", "revenue_past_30": 500}));
        let view = reservation_view(&l, None);
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"pms_name": "airbnb", "next_page": false, "data": []})
        );
    }

    #[test]
    fn last_booking_becomes_one_entry() {
        let l = listing(json!({
            "id": "L1",
            "pms": "hostaway",
            "last_booked_date": "2024-06-30",
            "revenue_past_30": 1234.5
        }));
        let view = reservation_view(&l, Some("airbnb"));
        assert_eq!(view.pms_name, json!("hostaway"));
        assert_eq!(
            serde_json::to_value(&view.data).unwrap(),
            json!([{
                "listing_id": "L1",
                "check_in": "2024-06-30",
                "booking_status": "booked",
                "rental_revenue": 1234.5
            }])
        );
    }

    #[test]
    fn channel_used_when_listing_has_no_pms() {
        let l = listing(json!({"id": "L1", "pms": "", "last_booked_date": "2024-01-02"}));
        let view = reservation_view(&l, Some("vrbo"));
        assert_eq!(view.pms_name, json!("vrbo"));
        assert_eq!(view.data[0].rental_revenue, json!(0));
        assert_eq!(reservation_view(&l, Some("  ")).pms_name, json!("airbnb"));
    }

    #[test]
    fn non_string_pms_is_echoed() {
        let l = listing(json!({"id": "L1", "pms": 42}));
        assert_eq!(reservation_view(&l, Some("vrbo")).pms_name, json!(42));

        let l = listing(json!({"id": "L1", "pms": 0}));
        assert_eq!(reservation_view(&l, None).pms_name, json!("airbnb"));
    }
}
