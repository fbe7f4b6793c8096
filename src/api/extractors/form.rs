//! Lenient form extractor - Form bodies that never reject.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// Form extractor that falls back to `T::default()` on a malformed body.
///
/// Field-level checks belong to the service, which reports them as
/// notices; a body that does not even parse is treated like an empty form.
///
/// ```rust,ignore
/// async fn register(LenientForm(form): LenientForm<RegisterUser>) { /* ... */ }
/// ```
pub struct LenientForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(LenientForm(value)),
            Err(e) => {
                tracing::debug!(error = %e.body_text(), "Unreadable form body, using defaults");
                Ok(LenientForm(T::default()))
            }
        }
    }
}
