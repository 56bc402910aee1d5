//! Inbound action names.

use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FetchListing,
    FetchAllListings,
    FetchAllListingsFromAllAccounts,
    FetchPrices,
    FetchReservations,
    FetchNeighborhood,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::FetchListing,
        Action::FetchAllListings,
        Action::FetchAllListingsFromAllAccounts,
        Action::FetchPrices,
        Action::FetchReservations,
        Action::FetchNeighborhood,
    ];

    /// Wire name, as sent in the `action` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::FetchListing => "fetchListing",
            Action::FetchAllListings => "fetchAllListings",
            Action::FetchAllListingsFromAllAccounts => "fetchAllListingsFromAllAccounts",
            Action::FetchPrices => "fetchPrices",
            Action::FetchReservations => "fetchReservations",
            Action::FetchNeighborhood => "fetchNeighborhood",
        }
    }
}

impl FromStr for Action {
    type Err = ApiError;

    /// Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ApiError::InvalidAction(s.to_string()))
    }
}
