pub mod get;
pub mod post;

pub use get::{count_ratings, get_ratings};
pub use post::create_rating;

pub(crate) const RATING_COLUMNS: &str = "id, lecturer_module_id, criteria_1_score, criteria_2_score, criteria_3_score, criteria_4_score, criteria_5_score, remarks, created_at, ip_address, user_agent";
