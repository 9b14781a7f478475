pub mod models;
pub mod queries;

pub use models::{Contact, IntentStatus, NewContact, PaymentIntentRecord};
pub use queries::{init_db, ContactRepo, DbPool, IntentRepo};

#[cfg(test)]
pub use queries::setup_test_db;
