pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod openai;
pub mod prompts;
pub mod server;
pub mod translation;
pub mod validator;
pub mod verify;

#[cfg(test)]
mod testing;
