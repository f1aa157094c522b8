pub mod agent;
pub mod chat;
pub mod message;
pub mod prompts;
pub mod schema;
pub mod settings;

pub use agent::*;
pub use chat::*;
pub use message::*;
pub use prompts::*;
pub use schema::*;
pub use settings::*;
