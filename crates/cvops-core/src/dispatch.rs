//! Request dispatch: selection → registry lookup → parameter coercion → apply.
//!
//! This is the boundary where every failure is converted into a
//! [`DispatchError`] the presentation layer can show to the user.

use thiserror::Error;

use crate::buffer::Image;
use crate::ops::OperationError;
use crate::params::{coerce_params, Params};
use crate::registry;

/// User-facing dispatch failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// Category or operation was not supplied.
    #[error("Please select category and operation.")]
    MissingSelection,

    /// The pair is not in the registry.
    #[error("Selected operation is not available.")]
    UnknownOperation { category: String, operation: String },

    /// The operation failed while computing its result.
    #[error("Error applying operation: {0}")]
    Computation(#[from] OperationError),
}

impl DispatchError {
    /// Whether this is a selection problem rather than a computation failure.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingSelection | DispatchError::UnknownOperation { .. }
        )
    }
}

/// A parsed form submission: the selection plus its coerced parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub category: Option<String>,
    pub operation: Option<String>,
    pub params: Params,
}

impl Request {
    /// Split raw form fields into the selection and typed parameters.
    pub fn from_form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        let field = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };
        Request {
            category: field("category"),
            operation: field("operation"),
            params: coerce_params(fields.iter().map(|(k, v)| (k, v))),
        }
    }

    /// The selected pair, or [`DispatchError::MissingSelection`].
    pub fn selection(&self) -> Result<(&str, &str), DispatchError> {
        match (self.category.as_deref(), self.operation.as_deref()) {
            (Some(c), Some(o)) => Ok((c, o)),
            _ => Err(DispatchError::MissingSelection),
        }
    }

    /// Run the selected operation against `image`.
    pub fn run(&self, image: &Image) -> Result<Image, DispatchError> {
        let (category, operation) = self.selection()?;
        apply_params(category, operation, &self.params, image)
    }
}

/// Coerce raw parameters and run the operation selected by
/// (`category`, `operation`).
pub fn dispatch<I, K, V>(
    category: &str,
    operation: &str,
    raw_params: I,
    image: &Image,
) -> Result<Image, DispatchError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    apply_params(category, operation, &coerce_params(raw_params), image)
}

/// Run an already-coerced parameter mapping.
///
/// Empty selection strings count as missing.
pub fn apply_params(
    category: &str,
    operation: &str,
    params: &Params,
    image: &Image,
) -> Result<Image, DispatchError> {
    if category.is_empty() || operation.is_empty() {
        return Err(DispatchError::MissingSelection);
    }
    let Some(op) = registry::lookup(category, operation) else {
        log::warn!("rejected unknown operation {:?} / {:?}", category, operation);
        return Err(DispatchError::UnknownOperation {
            category: category.to_string(),
            operation: operation.to_string(),
        });
    };

    log::debug!(
        "applying {:?} to {}x{} image with {} parameter(s)",
        op.name(),
        image.width(),
        image.height(),
        params.len()
    );
    op.apply(image, params).map_err(|err| {
        log::warn!("{} failed: {}", op.name(), err);
        DispatchError::from(err)
    })
}
