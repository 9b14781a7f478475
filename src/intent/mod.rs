pub mod amount;
pub mod memo;
pub mod types;

pub use amount::{parse_amount_field, xrp_to_drops, DROPS_PER_XRP};
pub use memo::{memo_to_hex, sanitize_memo, MEMO_MAX_CHARS};
pub use types::PaymentIntent;
