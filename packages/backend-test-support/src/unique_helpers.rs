//! Unique values so tests sharing a database never collide.

use uuid::Uuid;

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// `{prefix}-{random}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", short_id())
}

/// `{prefix}-{random}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", short_id())
}

/// A vehicle plate that no other test will use, e.g. `WP-3f9a01c2d4e5`.
pub fn unique_plate() -> String {
    format!("WP-{}", short_id().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_differ() {
        assert_ne!(unique_str("user"), unique_str("user"));
        let email = unique_email("officer");
        assert!(email.starts_with("officer-"));
        assert!(email.ends_with("@example.test"));
        assert!(unique_plate().starts_with("WP-"));
    }
}
