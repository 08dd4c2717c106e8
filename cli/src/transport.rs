//! `reqwest` implementation of [`Transport`].

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::future::Future;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use session::{ApiRequest, ApiResponse, ClientError, FormPart, FormValue, Method, RequestBody, Transport};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("deployhub-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let timeout = request.timeout;
        let mut builder = self.client.request(method(request.method), &request.url).timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        tracing::debug!(url = %request.url, method = request.method.as_str(), "sending request");
        let response = builder.send().await.map_err(|err| network_failure(&err, timeout))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| network_failure(&err, timeout))?;
        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(ApiResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ClientError>> {
        self.exchange(request)
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, ClientError> {
    parts.into_iter().try_fold(Form::new(), |form, part| match part.value {
        FormValue::Text(text) => Ok(form.text(part.name, text)),
        FormValue::File { file_name, content_type, bytes } => {
            let file = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&content_type)
                .map_err(|err| ClientError::InvalidSelection(format!("bad content type `{content_type}`: {err}")))?;
            Ok(form.part(part.name, file))
        }
    })
}

fn network_failure(err: &reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::NetworkFailure(timeout_message(timeout))
    } else {
        ClientError::NetworkFailure(err.to_string())
    }
}

fn timeout_message(timeout: Duration) -> String {
    format!("no response within {}s", timeout.as_secs())
}
