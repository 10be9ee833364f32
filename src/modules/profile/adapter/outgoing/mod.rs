pub mod local_store;
pub mod remote_store;
pub mod snapshot_watch;
pub mod store_selection;

pub use local_store::{LocalStore, LocalStoreConfig};
pub use remote_store::{RemoteStore, RemoteStoreConfig};
pub use store_selection::{select_store, SelectedStore, StoreBackend};
