pub mod firestore_store;
pub mod firestore_value;
pub mod remote_config;

pub use firestore_store::RemoteStore;
pub use remote_config::RemoteStoreConfig;
