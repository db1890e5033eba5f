pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_module;
pub use get::{get_active_modules, get_all_modules, get_module};
pub use patch::{set_module_active, update_module};
pub use post::create_module;

pub(crate) const MODULE_COLUMNS: &str = "id, lecturer_name, module_name, module_description, module_objectives, email, is_active, created_at";
