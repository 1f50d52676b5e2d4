//! Secret masking for config values that end up in logs or `Debug` output.

/// Mask a secret, keeping the first 4 chars as a hint.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() > 8 {
        format!("{}***", secret.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_hint_for_long_secrets() {
        assert_eq!(mask_secret("AIzaSyD-abcdefghijklmnop"), "AIza***");
    }

    #[test]
    fn hides_short_secrets_entirely() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "***");
    }
}
