pub struct RedisKey;

impl RedisKey {
    pub fn rated_modules(client_id: &str) -> String {
        format!("client:{client_id}:rated_modules")
    }
}
