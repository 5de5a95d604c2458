//! Internal helpers for model validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so the registry enforces the same invariants on creation,
//! update and document load.

use crate::{EngineError, ResultEngine};

/// Trim a required text field, rejecting empty values.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an e-mail address and run a shallow shape check.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required_text(value, "email")?;
    let valid_shape = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    };
    if !valid_shape || email.chars().any(char::is_whitespace) {
        return Err(EngineError::Validation(format!("invalid email: {email}")));
    }
    Ok(email)
}

/// Case-insensitive key used for e-mail uniqueness.
pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim and title-case a specialty tag (`"strength training"` -> `"Strength Training"`).
pub(crate) fn normalize_tag(value: &str) -> ResultEngine<String> {
    let trimmed = normalize_required_text(value, "specialty")?;
    let titled = trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(titled)
}

/// Normalize a list of tags, dropping duplicates while keeping first-seen order.
pub(crate) fn normalize_tags<I, S>(values: I) -> ResultEngine<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for value in values {
        let tag = normalize_tag(value.as_ref())?;
        if !tags.iter().any(|existing| existing.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// Trim free-form list entries, dropping blanks.
pub(crate) fn normalize_text_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required_text("  Ada  ", "name").unwrap(), "Ada");
        assert!(matches!(
            normalize_required_text("   ", "name"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn email_shape_is_checked() {
        assert_eq!(normalize_email(" ada@example.com ").unwrap(), "ada@example.com");
        for raw in ["ada", "ada@example", "@example.com", "a b@example.com", "a@b@c.com"] {
            assert!(normalize_email(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn tags_are_title_cased_and_deduplicated() {
        let tags = normalize_tags(["strength TRAINING", "yoga", "Strength training"]).unwrap();
        assert_eq!(tags, vec!["Strength Training".to_string(), "Yoga".to_string()]);
        assert!(normalize_tags(["  "]).is_err());
    }
}
