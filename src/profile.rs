//! Profile form values and validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const MIN_NAME_LEN: usize = 2;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Name must be at least 2 characters.")]
    NameTooShort,

    #[error("Invalid email address.")]
    InvalidEmail,
}

impl ProfileError {
    /// Form field the message belongs under
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileError::NameTooShort => ProfileField::Name,
            ProfileError::InvalidEmail => ProfileField::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
}

impl ProfileField {
    pub fn all() -> &'static [ProfileField] {
        &[ProfileField::Name, ProfileField::Email, ProfileField::Phone]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Full Name",
            ProfileField::Email => "Email Address",
            ProfileField::Phone => "Phone Number (Optional)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ProfileField::Name => "Your full name",
            ProfileField::Email => "your.email@example.com",
            ProfileField::Phone => "Your phone number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: Some("123-456-7890".to_string()),
        }
    }
}

impl ProfileForm {
    /// Check every field, collecting one error per invalid field
    pub fn validate(&self) -> Result<(), Vec<ProfileError>> {
        let mut errors = Vec::new();
        if self.name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(ProfileError::NameTooShort);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            errors.push(ProfileError::InvalidEmail);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Two-letter avatar fallback, e.g. "JD"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => self.phone.as_deref().unwrap_or(""),
        }
    }

    pub fn set_value(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::Email => self.email = value.to_string(),
            ProfileField::Phone => {
                let trimmed = value.trim();
                self.phone = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
            }
        }
    }
}
