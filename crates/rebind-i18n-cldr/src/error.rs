use rebind_i18n::{I18nError, MissingKeyError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CldrError {
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// A key resolved to a value of the wrong kind, e.g. text where a list
    /// of names was expected.
    #[error("key '{key}' in locale '{locale}' is not {expected}")]
    WrongShape {
        key: &'static str,
        locale: String,
        expected: &'static str,
    },
}

impl From<MissingKeyError> for CldrError {
    fn from(err: MissingKeyError) -> Self {
        Self::I18n(I18nError::MissingKey(err))
    }
}

pub type Result<T> = std::result::Result<T, CldrError>;
