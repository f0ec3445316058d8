//! External collaborators of the FingerFit dashboard: identity service,
//! per-user statistics document store, and their configuration.

mod backend;
pub mod config;
pub mod error;
pub mod firebase;
pub mod firestore;
pub mod identity;
pub mod memory;
pub mod store;

pub use backend::Backend;
pub use config::FirebaseConfig;
pub use error::{AuthError, ConfigError, FetchError};
pub use firebase::FirebaseBackend;
pub use identity::{IdentityService, SessionHub, SessionSubscription, UserIdentity};
pub use memory::{Account, MemoryBackend};
pub use store::{extract_stats, RecordLookup, RecordStore};
