pub mod client;

pub use client::{LedgerClient, LedgerHealth, SubmitPaymentRequest, SubmitResult};
