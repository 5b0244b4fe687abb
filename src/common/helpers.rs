// Helper functions for safe logging and header handling

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && email.len() > 3 => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***@***.***".to_string(),
    }
}

/// Accepts either "Bearer <token>" or a raw token
pub fn strip_bearer(header_value: &str) -> &str {
    let trimmed = header_value.trim();
    trimmed.strip_prefix("Bearer ").unwrap_or(trimmed).trim()
}
