pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a translator for software localization files. \
     Translate the user's message, a single string value shown in an application UI, to {target_language}. \
     Output only the translated text without quotes, explanations or line breaks. \
     Keep placeholders such as {name}, %s or {{count}} unchanged.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replacen("{target_language}", target_language, 1)
}
