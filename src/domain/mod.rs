pub mod bucket;
pub mod entry;
pub mod identity;
pub mod job;
pub mod notification;
pub mod seen;
pub mod site;

pub use bucket::Bucket;
pub use entry::Entry;
pub use identity::IdentityKey;
pub use job::Job;
pub use notification::{ListingType, Notification};
pub use seen::SeenSet;
pub use site::Site;
