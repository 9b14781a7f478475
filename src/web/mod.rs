pub mod audio;
pub mod routes;
pub mod transaction;

pub use routes::create_router;

use crate::db::DbPool;
use crate::ledger::LedgerClient;
use crate::model::{ContactsCache, ModelClient};
use crate::payments::PaymentsBackend;
use crate::speech::SpeechClient;
use crate::wallet::WalletDirectory;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state for web handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub directory: Arc<WalletDirectory>,
    pub ledger: Arc<LedgerClient>,
    pub backend: Arc<PaymentsBackend>,
    pub model: Arc<ModelClient>,
    pub speech: Arc<SpeechClient>,
    pub contacts: Arc<ContactsCache>,
    /// Directory synthesized audio files are written to and served from
    pub audio_dir: PathBuf,
}
