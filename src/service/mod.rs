//! Data access and CRUD services over the entity descriptors.

mod crud;
mod entity_manager;
mod repository;
mod validation;
pub use crud::CrudService;
pub use entity_manager::EntityManager;
pub use repository::Repository;
pub use validation::RequestValidator;
