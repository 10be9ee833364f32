pub mod profile_store;

pub use profile_store::{
    ProfileEvent, ProfileStore, ProfileStoreError, ProfileSubscription, StoreKind,
};
