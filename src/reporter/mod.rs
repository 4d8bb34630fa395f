//! Reporter module for output formatting

pub mod console;
pub mod html;
pub mod json;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;

use crate::SortOrder;

/// Caption under the results heading
pub(crate) fn order_caption(order: SortOrder) -> &'static str {
    match order {
        SortOrder::ByScoreDesc => "Ranked from strongest to weakest.",
        SortOrder::ByNameAsc => "Listed alphabetically by category.",
    }
}
