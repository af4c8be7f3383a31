pub mod browse;
pub mod config;
pub mod pick;
pub mod prompts;
pub mod render;
pub mod similar;
pub mod spinner;
pub mod watched;
