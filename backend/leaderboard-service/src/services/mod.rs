/// Business logic layer
///
/// - `store`: ranked score store trait and its Redis / in-memory backends
/// - `user_registry`: JSON snapshot of registered users
/// - `report`: top-N report and public listing
/// - `export`: plain-text export file
pub mod export;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod user_registry;

pub use export::{ExportArtifact, ExportWriter};
pub use report::ReportGenerator;
pub use store::{MemoryRankedStore, RankedStore, RedisRankedStore, SharedRankedStore};
pub use user_registry::UserRegistry;
