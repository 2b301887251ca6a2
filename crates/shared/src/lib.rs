// Public modules
pub mod assistant;
pub mod chat;
pub mod config;
pub mod digest;
pub mod intent;
pub mod models;
pub mod news;
pub mod session;

// Re-export commonly used types
pub use assistant::Assistant;
pub use chat::{extract_reply, ChatClient};
pub use config::Config;
pub use intent::Intent;
pub use models::{Message, NewsItem, Role};
pub use news::NewsClient;
pub use session::{Session, GREETING};
