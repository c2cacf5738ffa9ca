pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAuthStore;
pub use postgres::PgAuthStore;
pub use r#trait::{AuthStore, StoredUser};
