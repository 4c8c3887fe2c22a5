/// Validates a catalog identifier.
///
/// Checks:
/// - Non-empty
/// - Does not start or end with '-'
/// - Characters are lowercase ASCII alphanumeric or '-'
pub fn validate_identifier(id: &str) -> bool {
    if id.is_empty() || id.starts_with('-') || id.ends_with('-') {
        return false;
    }
    id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[macro_export]
macro_rules! impl_validated_id {
    ($name:ident, $kind:expr) => {
        impl $name {
            /// Validate and create a new instance.
            pub fn new(id: &str) -> Result<Self, $crate::domain::AppError> {
                if $crate::domain::identities::validation::validate_identifier(id) {
                    Ok(Self(id.to_string()))
                } else {
                    Err($crate::domain::AppError::InvalidIdentifier {
                        kind: $kind,
                        value: id.to_string(),
                    })
                }
            }

            /// Return the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
