//! # Store Configuration
//!
//! Settings read once when the storefront is constructed.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GLOW_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after construction; changing it means building
//! a new [`crate::storefront::Storefront`].

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::ShippingRates;
use crate::CURRENCY_SYMBOL;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Shown in the header and on order confirmations.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Delivery fee per zone.
    pub shipping_rates: ShippingRates,

    /// Start from the sample catalog when no products record exists.
    pub seed_sample_catalog: bool,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Store: "Glow Beauty"
    /// - Currency: ৳ with 2 decimals
    /// - Shipping: ৳60 inside Dhaka, ৳120 outside
    /// - Sample catalog: seeded
    fn default() -> Self {
        StoreConfig {
            store_name: "Glow Beauty".to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            currency_decimals: 2,
            shipping_rates: ShippingRates::default(),
            seed_sample_catalog: true,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GLOW_STORE_NAME`: Override store name
    /// - `GLOW_SHIPPING_INSIDE`: Inside-Dhaka fee in whole taka (e.g. "80")
    /// - `GLOW_SHIPPING_OUTSIDE`: Outside-Dhaka fee in whole taka
    /// - `GLOW_SEED_CATALOG`: "0" or "false" disables sample seeding
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StoreConfig::default();

        if let Some(store_name) = lookup("GLOW_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(fee) = lookup("GLOW_SHIPPING_INSIDE").and_then(|v| parse_fee("GLOW_SHIPPING_INSIDE", &v)) {
            config.shipping_rates.inside_dhaka = fee;
        }

        if let Some(fee) = lookup("GLOW_SHIPPING_OUTSIDE").and_then(|v| parse_fee("GLOW_SHIPPING_OUTSIDE", &v)) {
            config.shipping_rates.outside_dhaka = fee;
        }

        if let Some(flag) = lookup("GLOW_SEED_CATALOG") {
            config.seed_sample_catalog = !matches!(flag.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }

        config
    }

    /// Formats an amount for display.
    ///
    /// ```rust
    /// use glow_core::{Money, StoreConfig};
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_major(3210)), "৳3210.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let minor = amount.minor();
        // Money always carries two minor digits; rescale to the display precision.
        let decimals = u32::from(self.currency_decimals.min(2));
        let scaled = minor / 10_i64.pow(2 - decimals);
        let divisor = 10_i64.pow(decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }
}

fn parse_fee(name: &str, raw: &str) -> Option<Money> {
    let fee = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|taka| *taka >= 0)
        .and_then(Money::checked_from_major);

    if fee.is_none() {
        warn!(variable = name, value = raw, "Ignoring invalid shipping fee");
    }
    fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> StoreConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "Glow Beauty");
        assert_eq!(config.shipping_rates.inside_dhaka, Money::from_major(60));
        assert_eq!(config.shipping_rates.outside_dhaka, Money::from_major(120));
        assert!(config.seed_sample_catalog);
    }

    #[test]
    fn test_env_overrides() {
        let config = config_with(&[
            ("GLOW_STORE_NAME", "Glow Chattogram"),
            ("GLOW_SHIPPING_INSIDE", "80"),
            ("GLOW_SHIPPING_OUTSIDE", "150"),
            ("GLOW_SEED_CATALOG", "false"),
        ]);

        assert_eq!(config.store_name, "Glow Chattogram");
        assert_eq!(config.shipping_rates.inside_dhaka, Money::from_major(80));
        assert_eq!(config.shipping_rates.outside_dhaka, Money::from_major(150));
        assert!(!config.seed_sample_catalog);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = config_with(&[("GLOW_SHIPPING_INSIDE", "sixty"), ("GLOW_SHIPPING_OUTSIDE", "-5")]);
        assert_eq!(config.shipping_rates, ShippingRates::default());
    }

    #[test]
    fn test_overflowing_fee_is_ignored() {
        let config = config_with(&[("GLOW_SHIPPING_INSIDE", "999999999999999999")]);
        assert_eq!(config.shipping_rates, ShippingRates::default());
    }

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_minor(1234)), "৳12.34");
        assert_eq!(config.format_currency(Money::zero()), "৳0.00");
        assert_eq!(config.format_currency(Money::from_minor(-1234)), "-৳12.34");
    }

    #[test]
    fn test_format_currency_whole_taka() {
        let config = StoreConfig {
            currency_decimals: 0,
            ..StoreConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_major(850)), "৳850");
    }
}
