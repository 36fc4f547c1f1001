//! Shared helper functions for CLI commands

/// Mask a secret for display, keeping only its last four characters
///
/// Secrets of four characters or fewer are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
