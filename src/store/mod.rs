mod lockfile;
mod objects;
mod refs;

pub use lockfile::Lockfile;
pub use objects::ObjectStore;
pub use refs::RefStore;
