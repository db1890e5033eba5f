pub mod admin;
pub mod module;
pub mod rating;
pub mod redis;
pub mod report;

pub use admin::{Admin, Claims};
pub use module::LecturerModule;
pub use rating::Rating;
pub use report::{Averages, ModuleReport};
