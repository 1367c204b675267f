pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::UserStore;
