mod error;
mod mock;
mod reconciler;
mod store;

pub use error::{StagingError, StagingResult};
pub use mock::MockStaging;
pub use reconciler::{clear_directory, delete_all, list_matching, LIST_TIMEOUT};
pub use store::{GcsStagingStore, StagingStore};
