//! `reqwest`-backed [`EnrollmentApi`].
//!
//! Every failure mode (connect error, timeout, non-2xx status, malformed JSON)
//! is reported as [`EnrollmentError::Network`] carrying the method and URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{COURSES_PATH, ENROLLMENTS_PATH, EnrollmentApi, STUDENTS_PATH, enrollment_path};
use crate::config::AppConfig;
use crate::error::EnrollmentError;
use crate::model::{Course, Enrollment, EnrollmentFields, Student};

/// HTTP client for the enrollment backend.
///
/// Owns its `reqwest::Client` and base URL; construct one per backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for `base_url`. `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, EnrollmentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| EnrollmentError::Network {
            method: "-".to_string(),
            url: base_url.to_string(),
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from resolved configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, EnrollmentError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path such as `/matriculas`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the response if its status is 2xx.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, EnrollmentError> {
        let url = self.url(path);
        let network_error = |message: String| EnrollmentError::Network {
            method: method.to_string(),
            url: url.clone(),
            message,
        };

        tracing::debug!(%method, %url, "Sending request");
        let resp = build(self.http.request(method.clone(), &url))
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(network_error(format!("HTTP {status}")));
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, EnrollmentError> {
        let resp = self.send(method.clone(), path, build).await?;
        resp.json::<T>().await.map_err(|e| EnrollmentError::Network {
            method: method.to_string(),
            url: self.url(path),
            message: format!("invalid response body: {e}"),
        })
    }
}

#[async_trait]
impl EnrollmentApi for HttpApi {
    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, EnrollmentError> {
        self.send_json(Method::GET, ENROLLMENTS_PATH, |r| r).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, EnrollmentError> {
        self.send_json(Method::GET, STUDENTS_PATH, |r| r).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>, EnrollmentError> {
        self.send_json(Method::GET, COURSES_PATH, |r| r).await
    }

    async fn create_enrollment(
        &self,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, EnrollmentError> {
        self.send_json(Method::POST, ENROLLMENTS_PATH, |r| r.json(fields))
            .await
    }

    async fn update_enrollment(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Enrollment, EnrollmentError> {
        self.send_json(Method::PUT, &enrollment_path(enrollment.id), |r| {
            r.json(enrollment)
        })
        .await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<(), EnrollmentError> {
        self.send(Method::DELETE, &enrollment_path(id), |r| r)
            .await
            .map(|_| ())
    }
}
