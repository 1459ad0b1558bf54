pub mod ask;
pub mod chat_page;
pub mod health;
