//! Neighborhood view: market-level and listing-level metrics side by side.

use serde::Serialize;
use serde_json::Value;

use super::{pick_number, pick_percentage};
use crate::upstream::Listing;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketMetrics {
    pub occupancy: Value,
    pub adr: Value,
    pub revenue: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingMetrics {
    pub occupancy: Value,
    pub base_price: Value,
    pub min_price: Value,
    pub max_price: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodView {
    pub market_data: MarketMetrics,
    pub listing_data: ListingMetrics,
}

/// Occupancy prefers the 7-day forward window, then the 30-day one.
pub fn neighborhood_view(listing: &Listing) -> NeighborhoodView {
    NeighborhoodView {
        market_data: MarketMetrics {
            occupancy: pick_percentage(
                listing,
                &["market_occupancy_next_7", "market_occupancy_next_30"],
            ),
            adr: pick_number(listing, &["adr_past_90"]),
            revenue: pick_number(listing, &["revenue_past_30"]),
        },
        listing_data: ListingMetrics {
            occupancy: pick_percentage(listing, &["occupancy_next_7", "occupancy_next_30"]),
            base_price: pick_number(listing, &["base"]),
            min_price: pick_number(listing, &["min"]),
            max_price: pick_number(listing, &["max"]),
        },
    }
}
