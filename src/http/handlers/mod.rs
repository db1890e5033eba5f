pub mod auth;
pub mod module;
pub mod rating;
pub mod report;

pub use auth::{login_handler, me_handler, register_handler};
pub use module::{
    create_module_handler, delete_module_handler, get_active_modules_handler,
    get_all_modules_handler, set_module_active_handler, update_module_handler,
};
pub use rating::{create_rating_handler, get_ratings_handler};
pub use report::{export_report_handler, get_report_handler, get_reports_handler};

pub async fn health_handler() -> &'static str {
    "ok"
}
