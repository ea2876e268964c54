//! Utility functions

/// Masks the local part of an email so it can be written to logs.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.chars().count() <= 2 { 1 } else { 2 };
        let prefix: String = local.chars().take(keep).collect();
        format!("{}***{}", prefix, domain)
    } else {
        "***".to_string()
    }
}
