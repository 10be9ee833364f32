pub mod collection_editor;
pub mod document_merge;
pub mod entities;
pub mod policies;
pub mod seed;

pub use collection_editor::{CollectionEntry, CollectionName, EditorError, SkillItemField};
pub use document_merge::{
    merge_over_default, merge_with_fallbacks, MergedProfile, PatchError, ProfilePatch,
};
pub use entities::*;
