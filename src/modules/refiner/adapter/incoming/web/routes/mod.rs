mod refine_description;

pub use refine_description::*;
