//! Item text validation
//!
//! Mirrors the `text VARCHAR(255) NOT NULL` column.

use super::ValidationError;

/// Maximum length for item text, in characters
pub const MAX_ITEM_TEXT_LEN: usize = 255;

/// Validated item text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemText(String);

impl ItemText {
    /// Create item text, rejecting empty strings and strings longer than
    /// [`MAX_ITEM_TEXT_LEN`] characters.
    ///
    /// # Example
    /// ```
    /// use itemctl_server::models::ItemText;
    ///
    /// assert!(ItemText::new("buy milk").is_ok());
    /// assert!(ItemText::new("").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();

        if s.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }

        // VARCHAR length counts characters, not bytes
        if s.chars().count() > MAX_ITEM_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_ITEM_TEXT_LEN,
            });
        }

        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
