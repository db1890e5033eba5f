pub mod get;
pub mod post;

pub use get::{get_admin_by_email, get_admin_by_id};
pub use post::create_admin;
