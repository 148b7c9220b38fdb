//! Display formatting for prices and balances shown in the trading screens.

pub mod currency;

pub use currency::{format_compact_currency, format_currency, parse_amount, Currency};
