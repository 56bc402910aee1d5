//! CLI command handlers, one file per command.
//!
//! Upstream calls are blocking (curl), so handlers move them onto tokio's
//! blocking pool.

mod accounts;
mod call;
mod completions;
mod listings;
mod portfolios;
mod resolve;
mod search;
mod serve;

pub use accounts::run_accounts;
pub use call::run_call;
pub use completions::run_completions;
pub use listings::run_listings;
pub use portfolios::run_portfolios;
pub use resolve::run_resolve;
pub use search::run_search;
pub use serve::run_serve;
