//! XML name validation
//!
//! This module checks strings against the xs:Name and xs:NCName lexical
//! rules of the XML 1.0 (Fifth Edition) `Name` production. These checks
//! guard member keys and type names; they are not a general validator.

use crate::error::{Error, NameRule, Result, TypeLabel};
use once_cell::sync::Lazy;
use regex::Regex;

/// Character ranges allowed as the first character of a Name
const NAME_START_CHARS: &str = concat!(
    r"A-Z_a-z:",
    r"\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}",
    r"\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}",
    r"\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}",
    r"\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}",
);

/// Additional characters allowed after the first one
const NAME_EXTRA_CHARS: &str = r"\-.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}";

static NAME: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "^[{start}][{start}{extra}]*$",
        start = NAME_START_CHARS,
        extra = NAME_EXTRA_CHARS
    );
    Regex::new(&pattern).expect("XML Name pattern is valid")
});

/// Check if a string is a valid XML Name
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    !name.contains(':') && is_valid_name(name)
}

/// Validate an XML Name and return an error if invalid
pub fn validate_name(name: &str) -> Result<()> {
    validate_name_for(name, &TypeLabel::unnamed())
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    validate_ncname_for(name, &TypeLabel::unnamed())
}

/// Validate an XML Name on behalf of a (possibly named) type
pub fn validate_name_for(name: &str, context: &TypeLabel) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidName {
            value: name.to_string(),
            rule: NameRule::Name,
            context: context.clone(),
        })
    }
}

/// Validate an NCName on behalf of a (possibly named) type
///
/// A string that is not even a Name is reported against the Name rule.
pub fn validate_ncname_for(name: &str, context: &TypeLabel) -> Result<()> {
    validate_name_for(name, context)?;
    if name.contains(':') {
        return Err(Error::InvalidName {
            value: name.to_string(),
            rule: NameRule::NCName,
            context: context.clone(),
        });
    }
    Ok(())
}
