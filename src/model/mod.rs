pub mod client;
pub mod contacts;

pub use client::{ExtractedIntent, ModelClient};
pub use contacts::ContactsCache;
