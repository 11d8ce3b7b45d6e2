use anyhow::Context;
use dialoguer::Password;

/// Use `value` if given, otherwise prompt on the terminal without echo.
pub fn secret_or_prompt(value: Option<&str>, prompt: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    // empty input re-prompts
    Password::new()
        .with_prompt(prompt)
        .interact()
        .with_context(|| format!("failed to read {prompt}"))
}
