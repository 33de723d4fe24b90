pub mod backend;
pub mod cookie;
pub mod memory;
pub mod sweep;

pub use backend::SessionBackend;
pub use cookie::CookieSession;
pub use memory::MemorySessionStore;
pub use sweep::spawn_expiry_sweep;
