pub mod json;
pub mod lock;

use crate::app::Result;
use crate::domain::SeenSet;

pub use json::JsonSeenStore;
pub use lock::RunLock;

pub trait SeenStore {
    /// Never fails: an absent or unreadable store is an empty set.
    fn load(&self) -> SeenSet;

    /// Replace the stored set with `seen`.
    fn save(&self, seen: &SeenSet) -> Result<()>;
}
