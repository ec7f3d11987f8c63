//! Listing extractor for exchange-rate export lines
//!
//! Turns one semi-structured listing line into a labeled record. The line
//! format is semicolon-separated with Russian labels, for example:
//!
//! ```text
//! CryptoKing;148 ордеров;97.30%;;92.45;Доступно;1 250.75 USDT;Лимит;₽;5 000.00;-Лимит;₽;115 590.00;Тинькофф;СБП;Купить
//! ```
//!
//! ## Architecture
//!
//! - [`patterns`] - Anchored regex sources, one named group per field
//! - [`extractor`] - Applies the patterns in field order and builds the record
//!
//! ## Usage
//!
//! ```rust
//! use exrates_loader::app::services::listing_extractor::ListingExtractor;
//! use exrates_loader::Field;
//!
//! # fn example() -> exrates_loader::Result<()> {
//! let extractor = ListingExtractor::new()?;
//! let record = extractor.extract("trader;5 ордер;99.10;;91.20;Купить");
//!
//! assert_eq!(record.get(Field::Orders), Some("5"));
//! assert_eq!(record.get(Field::Price), Some("91.20"));
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod patterns;

#[cfg(test)]
mod tests;

pub use extractor::ListingExtractor;
pub use patterns::PatternSet;
