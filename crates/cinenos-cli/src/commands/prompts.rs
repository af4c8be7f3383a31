use color_eyre::Result;
use dialoguer::{Password, Select};

pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Index of the chosen option
pub fn prompt_select(prompt: &str, options: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}
