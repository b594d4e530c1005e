// mangashelf state managers
// The bookmark store and the shared handle view code talks to.

pub mod bookmark_handle;
pub mod bookmark_store;
