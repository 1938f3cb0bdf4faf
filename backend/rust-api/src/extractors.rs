use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON extractor whose rejections become the API's 422 body instead of
/// axum's plain-text errors.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::unprocessable(format!(
                "Failed to parse JSON request body: {}",
                rejection
            ))),
        }
    }
}

/// Accepts either `application/x-www-form-urlencoded` or JSON, picked by the
/// request's content type. Anything that is not a form is parsed as JSON.
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(JsonOrForm(value)),
                Err(rejection) => Err(ApiError::unprocessable(format!(
                    "Failed to parse form request body: {}",
                    rejection
                ))),
            }
        } else {
            let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(value))
        }
    }
}
