pub mod directory;

pub use directory::{ResolvedRecipient, WalletDirectory, WalletEntry, WalletSecret};
