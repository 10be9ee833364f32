mod refine_description_service;

pub use refine_description_service::RefineDescriptionService;
