//! Order status derivation and view-model composition.
//!
//! `types` holds the raw records as the backend returns them; `status`,
//! `list`, and `detail` derive the presentation data from them; and
//! `page_state` carries the static per-status configuration everything
//! dispatches on.

pub mod detail;
pub mod list;
pub mod page_state;
pub mod status;
pub mod types;

pub use detail::{detail_page, detail_status, DetailStatus, OrderDetailPage, UnknownStatusError};
pub use list::{order_cards, OrderCard};
pub use page_state::PageState;
pub use status::list_status;
pub use types::{extract_order_id, Order, OrderSummary};
