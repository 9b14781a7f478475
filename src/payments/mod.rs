pub mod client;

pub use client::{
    CheckRequest, CrossCurrencyRequest, PaymentRequest, PaymentsBackend, IOU_CURRENCY_RLUSD,
    IOU_ISSUER_TESTNET,
};
