//! Huawei Cloud transport.
//!
//! A blocking HTTP client for the KMS v1.0 API, signed with AK/SK, and an
//! OBS object reader built on the S3 SDK.
//! Enable with `--features huawei` (on by default).
//!
//! ## Usage
//!
//! ```toml
//! [cloud]
//! region = "sa-brazil-1"
//! project_id = "0123456789abcdef"
//! ```
//!
//! Credentials come from `HUAWEI_ACCESS_KEY_ID` and
//! `HUAWEI_SECRET_ACCESS_KEY`.

use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use chrono::Utc;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE, HOST};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::signer;
use super::{
    AliasGroup, CreateAliasRequest, CreateKeyRequest, CreateKeyResponse, KmsClient,
    ListAliasesResponse, ListByTagsRequest, ListByTagsResponse, ListKeysRequest,
    ListKeysResponse, ObjectResponse, ObjectStore, OperateKeyRequest, OperateKeyResponse,
};
use crate::core::config::{CloudConfig, Credentials};
use crate::core::obs::ObsLocation;
use crate::error::{Error, ProviderError, Result};

const API_VERSION: &str = "v1.0";
const JSON: &str = "application/json";
const PROJECT_HEADER: &str = "X-Project-Id";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

fn build_http(cloud: &CloudConfig) -> Result<Client> {
    Client::builder()
        .timeout(cloud.timeout())
        .build()
        .map_err(|e| Error::Transport(format!("failed to build http client: {}", e)))
}

fn host_of(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::Transport(format!("url has no host: {}", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Both error layouts the API gateway and KMS use.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_msg: Option<String>,
}

fn provider_error(status: u16, request_id: Option<String>, body: &[u8]) -> ProviderError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let (code, msg) = match parsed.error {
        Some(detail) => (detail.error_code, detail.error_msg),
        None => (parsed.error_code, parsed.error_msg),
    };
    let msg = msg.unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    ProviderError::http(status, code, msg).with_request_id(request_id)
}

/// The list-aliases body is a bare array on the wire; older gateways wrap it.
#[derive(Deserialize)]
#[serde(untagged)]
enum AliasesWire {
    Bare(Vec<AliasGroup>),
    Wrapped(ListAliasesResponse),
}

/// KMS v1.0 client signed with `SDK-HMAC-SHA256`.
pub struct HuaweiKms {
    http: Client,
    base_url: String,
    project_id: String,
    credentials: Credentials,
}

impl HuaweiKms {
    /// Build a client for the configured region and project.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the HTTP client cannot be built.
    pub fn new(cloud: &CloudConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            http: build_http(cloud)?,
            base_url: cloud.kms_base_url(),
            project_id: cloud.project_id.clone(),
            credentials,
        })
    }

    fn path(&self, operation: &str) -> String {
        format!("/{}/{}/kms/{}", API_VERSION, self.project_id, operation)
    }

    /// Send one signed request; non-2xx answers become `ProviderError`.
    fn send<B: Serialize>(
        &self,
        method: Method,
        operation: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let path = self.path(operation);
        let url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::Transport(format!("invalid kms url: {}", e)))?;
        let host = host_of(&url)?;
        let payload = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };
        let sdk_date = signer::timestamp(Utc::now());

        let headers = [
            (HOST.as_str(), host.as_str()),
            (CONTENT_TYPE.as_str(), JSON),
            (signer::SDK_DATE_HEADER, sdk_date.as_str()),
            (PROJECT_HEADER, self.project_id.as_str()),
        ];
        let authorization = signer::sign_sdk(
            &self.credentials,
            method.as_str(),
            &path,
            &headers,
            &payload,
            &sdk_date,
        );

        debug!(method = %method, path = %path, "kms request");
        let response = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(signer::SDK_DATE_HEADER, &sdk_date)
            .header(PROJECT_HEADER, &self.project_id)
            .header(AUTHORIZATION, authorization)
            .body(payload)
            .send()
            .map_err(|e| ProviderError::request(e.to_string()))?;

        read_kms_response(response)
    }

    fn call<B: Serialize, R: DeserializeOwned>(&self, operation: &str, body: &B) -> Result<R> {
        let bytes = self.send(Method::POST, operation, Some(body))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn read_kms_response(response: Response) -> Result<Vec<u8>> {
    let status = response.status().as_u16();
    let request_id = request_id(response.headers());
    let bytes = response
        .bytes()
        .map_err(|e| ProviderError::request(e.to_string()).with_request_id(request_id.clone()))?
        .to_vec();
    trace!(status, len = bytes.len(), "kms response");

    if status >= 300 {
        return Err(provider_error(status, request_id, &bytes).into());
    }
    Ok(bytes)
}

impl KmsClient for HuaweiKms {
    fn list_kms_by_tags(&self, request: &ListByTagsRequest) -> Result<ListByTagsResponse> {
        self.call("resource_instances/action", request)
    }

    fn list_keys(&self, request: &ListKeysRequest) -> Result<ListKeysResponse> {
        self.call("list-keys", request)
    }

    fn enable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()> {
        self.send(Method::POST, "enable-key-rotation", Some(request))
            .map(|_| ())
    }

    fn disable_key_rotation(&self, request: &OperateKeyRequest) -> Result<()> {
        self.send(Method::POST, "disable-key-rotation", Some(request))
            .map(|_| ())
    }

    fn enable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse> {
        self.call("enable-key", request)
    }

    fn disable_key(&self, request: &OperateKeyRequest) -> Result<OperateKeyResponse> {
        self.call("disable-key", request)
    }

    fn create_key(&self, request: &CreateKeyRequest) -> Result<CreateKeyResponse> {
        self.call("create-key", request)
    }

    fn list_aliases(&self) -> Result<ListAliasesResponse> {
        let bytes = self.send::<()>(Method::GET, "aliases", None)?;
        Ok(match serde_json::from_slice(&bytes)? {
            AliasesWire::Bare(body) => ListAliasesResponse { body },
            AliasesWire::Wrapped(response) => response,
        })
    }

    fn create_alias(&self, request: &CreateAliasRequest) -> Result<()> {
        self.send(Method::POST, "aliases", Some(request)).map(|_| ())
    }
}

/// OBS reader. OBS speaks the S3 protocol, so reads go through the S3 SDK
/// with a Huawei endpoint and a V4 signature scoped to the bucket's region.
pub struct HuaweiObs {
    runtime: tokio::runtime::Runtime,
    endpoint: Option<String>,
    timeout: Duration,
    credentials: Credentials,
}

impl HuaweiObs {
    /// Build a reader. `cloud.obs_endpoint`, when set, switches to
    /// path-style addressing against that endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the async runtime cannot be built.
    pub fn new(cloud: &CloudConfig, credentials: Credentials) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Transport(format!("failed to create runtime: {}", e)))?;

        Ok(Self {
            runtime,
            endpoint: cloud
                .obs_endpoint
                .as_ref()
                .map(|e| e.trim_end_matches('/').to_string()),
            timeout: cloud.timeout(),
            credentials,
        })
    }

    /// Endpoint URL and whether the bucket goes in the path.
    fn endpoint_for(&self, location: &ObsLocation) -> (String, bool) {
        match &self.endpoint {
            Some(endpoint) => (endpoint.clone(), true),
            None => (format!("https://{}", location.endpoint()), false),
        }
    }

    async fn client(&self, location: &ObsLocation) -> aws_sdk_s3::Client {
        let (endpoint, path_style) = self.endpoint_for(location);
        let credentials = aws_sdk_s3::config::Credentials::new(
            self.credentials.access_key.as_str(),
            self.credentials.secret_key.as_str(),
            None,
            None,
            "keyward",
        );

        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(location.region().to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(self.timeout)
                    .build(),
            )
            .load()
            .await;

        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(path_style)
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }

    async fn fetch(&self, location: &ObsLocation) -> Result<ObjectResponse> {
        let client = self.client(location).await;
        let result = client
            .get_object()
            .bucket(location.bucket())
            .key(location.object_key())
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                // An answered request is a status for the caller to judge.
                let Some(status) = e.raw_response().map(|r| r.status().as_u16()) else {
                    let cause = DisplayErrorContext(&e).to_string();
                    return Err(ProviderError::request(cause).into());
                };
                trace!(status, "obs refused");
                return Ok(ObjectResponse {
                    status,
                    body: Vec::new(),
                    error_code: e.code().map(str::to_string),
                    error_message: e.message().map(str::to_string),
                });
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ProviderError::request(e.to_string()))?;
        Ok(ObjectResponse {
            status: 200,
            body: body.into_bytes().to_vec(),
            error_code: None,
            error_message: None,
        })
    }
}

impl ObjectStore for HuaweiObs {
    fn get_object(&self, location: &ObsLocation) -> Result<ObjectResponse> {
        debug!(
            bucket = location.bucket(),
            object_key = location.object_key(),
            region = location.region(),
            "obs get object"
        );
        self.runtime.block_on(self.fetch(location))
    }
}
