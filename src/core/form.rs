//! Submitted form fields
//!
//! `FormData` keeps every submitted `(name, value)` pair in order, so a
//! field may carry several values. Lookups through [`FormData::get`] return
//! the first one.

use crate::core::error::{ActionError, RequestError};
use axum::Form;
use axum::extract::{FromRequest, Request};

/// Multi-valued mapping of form field name to string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; existing values for the same name are kept
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted for `name`, in submission order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decodes an `application/x-www-form-urlencoded` body (or query string for
/// GET requests) into [`FormData`]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ActionError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        Ok(pairs.into_iter().collect())
    }
}
