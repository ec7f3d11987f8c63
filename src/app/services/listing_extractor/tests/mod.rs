//! Test fixtures for listing extraction
//!
//! Lines are modelled on real exports: name, order count, completion rate,
//! an empty segment, price, available quantity, a limit range and the
//! payment methods before the buy button.

use crate::app::services::listing_extractor::ListingExtractor;


/// Line carrying every field
pub const FULL_LINE: &str = "CryptoKing;148 ордеров;97.30%;;92.45;Доступно;1 250.75 USDT;Лимит;₽;5 000.00;-Лимит;₽;115 590.00;Тинькофф;СБП;Купить";

/// Same listing without the available-quantity section
pub const NO_AVAILABLE_LINE: &str = "CryptoKing;148 ордеров;97.30%;;92.45;Лимит;₽;5 000.00;-Лимит;₽;115 590.00;Тинькофф;СБП;Купить";

/// Listing from a trader with no order history shown
pub const NO_ORDERS_LINE: &str =
    "NewTrader;;93.10;Доступно;320.00 USDT;Лимит;₽;1 000.00;-Лимит;₽;29 500.00;Сбербанк;Купить";

/// Helper to build an extractor, panicking on pattern errors
pub fn extractor() -> ListingExtractor {
    ListingExtractor::new().expect("listing patterns should compile")
}
