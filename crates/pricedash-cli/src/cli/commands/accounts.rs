//! `pricedash accounts` – configured accounts in probe order.

use pricedash_core::config::PricedashConfig;

pub fn run_accounts(cfg: &PricedashConfig) {
    println!("{:<2} {:<12} {:<24} {}", "", "NAME", "PORTFOLIO", "KEY");
    for account in &cfg.accounts {
        let marker = if account.name == cfg.default_account {
            "*"
        } else {
            ""
        };
        println!(
            "{:<2} {:<12} {:<24} {}",
            marker,
            account.name,
            account.portfolio,
            account.api_key.masked()
        );
    }
}
