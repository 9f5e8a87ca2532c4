//! URL slugs for games
//!
//! A slug is lowercase ASCII letters, digits and single hyphens. Purely numeric slugs are
//! refused because `/games/:game` accepts either an id or a slug.

use unicode_normalization::UnicodeNormalization;

use crate::domain::DomainError;

/// Derive a slug from a title: accents are stripped, any run of other characters becomes
/// one hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.nfkd() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if !unicode_normalization::char::is_combining_mark(c) {
            pending_dash = true;
        }
    }

    slug
}

pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::validation("slug cannot be empty"));
    }
    if slug.len() > 100 {
        return Err(DomainError::validation("slug is longer than 100 characters"));
    }
    let well_formed = slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    });
    if !well_formed {
        return Err(DomainError::validation(format!(
            "Invalid slug '{}': use lowercase letters, digits and single hyphens",
            slug
        )));
    }
    if slug.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation("slug cannot be only digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Quran Quiz"), "quran-quiz");
        assert_eq!(slugify("  Prophets & Companions!  "), "prophets-companions");
        assert_eq!(slugify("Ṣalāh Basics"), "salah-basics");
        assert_eq!(slugify("99 Names"), "99-names");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("word-search").is_ok());
        assert!(validate_slug("99-names").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("123").is_err());
        assert!(validate_slug("Word-Search").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("-leading").is_err());
    }
}
