//! Success bodies exactly as the server sent them.
//!
//! # Design
//! A 2xx exchange always succeeds: the body is kept as a `serde_json::Value`
//! (or as a JSON string when it is not JSON at all) and handed back untouched.
//! `Payload::typed` is an optional view onto the DTOs in `crate::types`;
//! only that view can fail, with `ApiError::InvalidResponse`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub struct Payload<T> {
    value: Value,
    view: PhantomData<fn() -> T>,
}

impl<T> Payload<T> {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            view: PhantomData,
        }
    }

    /// Parse a response body. Text that is not JSON is kept as a string value.
    pub fn from_body(body: &str) -> Self {
        let value = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        Self::new(value)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl<T: DeserializeOwned> Payload<T> {
    /// Deserialize the body into its DTO.
    pub fn typed(&self) -> Result<T, ApiError> {
        T::deserialize(&self.value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

impl<T> Clone for Payload<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> fmt::Debug for Payload<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&self.value).finish()
    }
}

impl<T> PartialEq for Payload<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
