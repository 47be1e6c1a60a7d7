use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use garde::{Report, Validate};
use http::request::Parts;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor wrapper, which validates extracted value
#[derive(Debug, Clone, Copy, Default)]
pub struct Garde<E>(pub E);

impl<E> Deref for Garde<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> DerefMut for Garde<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<E: Display> Display for Garde<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<E> Garde<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

#[derive(Debug)]
pub enum ValidationRejection<V, E> {
    /// extracted value is not valid
    Valid(V),
    /// inner extractor failed
    Inner(E),
}

impl<V: Display, E: Display> Display for ValidationRejection<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationRejection::Valid(errors) => write!(f, "{errors}"),
            ValidationRejection::Inner(error) => write!(f, "{error}"),
        }
    }
}

impl<V: Error + 'static, E: Error + 'static> Error for ValidationRejection<V, E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ValidationRejection::Valid(ve) => Some(ve),
            ValidationRejection::Inner(e) => Some(e),
        }
    }
}

pub type GardeRejection<E> = ValidationRejection<Report, E>;

impl<E> From<Report> for GardeRejection<E> {
    fn from(value: Report) -> Self {
        Self::Valid(value)
    }
}

/// Query problems are reported with the parameter name, as parameters have no fixed messages
fn report_messages(report: &Report) -> Vec<String> {
    report
        .iter()
        .map(|(path, error)| {
            let path = path.to_string();
            if path.is_empty() {
                error.message().to_string()
            } else {
                format!("{path}: {}", error.message())
            }
        })
        .collect()
}

impl<E: Into<ApiError>> IntoResponse for GardeRejection<E> {
    fn into_response(self) -> Response {
        let error = match self {
            ValidationRejection::Valid(report) => ApiError::InvalidRequest(
                cinelog_dal::input::ValidationErrors::new(report_messages(&report)),
            ),
            ValidationRejection::Inner(e) => e.into(),
        };
        error.into_response()
    }
}

impl<Extractor, T> FromRequestParts<AppState> for Garde<Extractor>
where
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequestParts<AppState>,
    <Extractor as FromRequestParts<AppState>>::Rejection: Into<ApiError>,
{
    type Rejection = GardeRejection<<Extractor as FromRequestParts<AppState>>::Rejection>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request_parts(parts, state)
            .await
            .map_err(GardeRejection::Inner)?;

        inner.deref().validate()?;
        Ok(Garde(inner))
    }
}
