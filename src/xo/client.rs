//! Xen Orchestra REST API client.
//!
//! Reads VM-like objects from the `/rest/v0` collections and merges them into
//! a single [`ObjectMap`].

use super::ObjectSource;
use crate::error::{InventoryError, Result};
use crate::models::{ObjectMap, XoObject};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

/// REST collections queried for objects.
pub const COLLECTIONS: [&str; 4] = ["vms", "vm-templates", "vm-snapshots", "vm-controllers"];

/// Object fields requested from the API.
const FIELDS: &str = "id,type,name_label,tags,addresses";

/// Authentication for the Xen Orchestra API.
#[derive(Clone, PartialEq)]
pub enum Credentials {
    /// Authentication token, sent as the `authenticationToken` cookie.
    Token(String),
    /// User login, sent as HTTP basic auth.
    Password { email: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => write!(f, "Token(***)"),
            Credentials::Password { email, .. } => write!(f, "Password({email}, ***)"),
        }
    }
}

/// HTTP client for the Xen Orchestra REST API.
#[derive(Debug, Clone)]
pub struct XoRestClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl XoRestClient {
    /// Create a client for `host`, which is either `host[:port]` or a full
    /// `http://` / `https://` URL.
    pub fn new(host: &str, credentials: Credentials) -> Self {
        Self::with_client(host, credentials, Client::new())
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_client(host: &str, credentials: Credentials, client: Client) -> Self {
        XoRestClient {
            client,
            base_url: base_url(host),
            credentials,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v0/{collection}?fields={FIELDS}", self.base_url)
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Token(token) => {
                request.header(reqwest::header::COOKIE, format!("authenticationToken={token}"))
            }
            Credentials::Password { email, password } => {
                request.basic_auth(email, Some(password))
            }
        }
    }

    async fn get_collection(&self, collection: &str) -> Result<Vec<XoObject>> {
        let url = self.collection_url(collection);
        log::debug!("GET {url}");

        let response = self.authenticate(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            log::error!("GET {url} failed with status {status}");
            return Err(InventoryError::Api { status, message });
        }

        let body = response.text().await?;
        let mut de = serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(&mut de)
            .map_err(|e| InventoryError::decode(format!("collection {collection}"), e))
    }
}

#[async_trait]
impl ObjectSource for XoRestClient {
    async fn get_all_objects(&self) -> Result<ObjectMap> {
        let mut objects = ObjectMap::new();
        for collection in COLLECTIONS {
            let block = self.get_collection(collection).await?;
            log::info!(
                "got collection {collection:>14} record_count=+{count:3} => {total:3}",
                count = block.len(),
                total = objects.len() + block.len(),
            );
            objects.extend(block.into_iter().map(|o| (o.id.clone(), o)));
        }
        Ok(objects)
    }
}

/// Normalise the configured host into a base URL without a trailing slash.
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else if let Some(rest) = host.strip_prefix("ws://") {
        format!("http://{rest}")
    } else if let Some(rest) = host.strip_prefix("wss://") {
        format!("https://{rest}")
    } else {
        format!("http://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("xoa.example.net"), "http://xoa.example.net");
        assert_eq!(base_url("10.0.0.2:8080/"), "http://10.0.0.2:8080");
        assert_eq!(base_url("https://xoa.example.net/"), "https://xoa.example.net");
        assert_eq!(base_url("ws://xoa.example.net"), "http://xoa.example.net");
        assert_eq!(base_url("wss://xoa.example.net"), "https://xoa.example.net");
    }

    #[test]
    fn test_collection_url() {
        let client = XoRestClient::new("xoa.lan", Credentials::Token("t".to_string()));
        assert_eq!(
            client.collection_url("vms"),
            "http://xoa.lan/rest/v0/vms?fields=id,type,name_label,tags,addresses"
        );
    }

    #[test]
    fn test_token_cookie() {
        let client = XoRestClient::new("xoa.lan", Credentials::Token("s3cr3t".to_string()));
        let request = client
            .authenticate(client.client.get("http://xoa.lan/rest/v0/vms"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers()[reqwest::header::COOKIE],
            "authenticationToken=s3cr3t"
        );
    }

    #[test]
    fn test_basic_auth() {
        let credentials = Credentials::Password {
            email: "admin@admin.net".to_string(),
            password: "admin".to_string(),
        };
        let client = XoRestClient::new("xoa.lan", credentials);
        let request = client
            .authenticate(client.client.get("http://xoa.lan/rest/v0/vms"))
            .build()
            .unwrap();
        assert!(request.headers()[reqwest::header::AUTHORIZATION]
            .to_str()
            .unwrap()
            .starts_with("Basic "));
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let token = format!("{:?}", Credentials::Token("s3cr3t".to_string()));
        assert!(!token.contains("s3cr3t"));
        let login = format!(
            "{:?}",
            Credentials::Password {
                email: "a@b.c".to_string(),
                password: "hunter2".to_string(),
            }
        );
        assert!(login.contains("a@b.c"));
        assert!(!login.contains("hunter2"));
    }
}
