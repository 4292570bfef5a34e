pub mod abm;
pub mod chat;
