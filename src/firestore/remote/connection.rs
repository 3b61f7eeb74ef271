use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::firestore::constants::{EMULATOR_HOST_ENV, FIRESTORE_API_HOST, FIRESTORE_API_VERSION};
use crate::firestore::error::{internal_error, invalid_argument, read_error, transport_error, FirestoreResult};

/// Blocking HTTP transport to the Firestore REST API.
#[derive(Clone, Debug)]
pub struct Connection {
    client: Client,
    base_url: String,
}

#[derive(Clone, Debug)]
pub struct ConnectionBuilder {
    client: Option<Client>,
    host: String,
    emulator_host: Option<String>,
}

impl ConnectionBuilder {
    /// Starts from the production host, or from `FIRESTORE_EMULATOR_HOST` when set.
    pub fn new() -> Self {
        Self {
            client: None,
            host: FIRESTORE_API_HOST.to_string(),
            emulator_host: std::env::var(EMULATOR_HOST_ENV)
                .ok()
                .filter(|host| !host.trim().is_empty()),
        }
    }

    /// Uses a preconfigured client, e.g. one with a request timeout.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Targets `host` (scheme included), discarding any emulator setting.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self.emulator_host = None;
        self
    }

    /// Targets a local emulator at `host:port` over plain HTTP.
    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }

    pub fn build(self) -> FirestoreResult<Connection> {
        let host = match self.emulator_host.as_deref() {
            Some(emulator) => format!("http://{}", emulator.trim()),
            None => self.host.clone(),
        };
        let parsed = Url::parse(&host)
            .map_err(|err| invalid_argument(format!("Invalid Firestore host '{host}': {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid_argument(format!("Invalid Firestore host '{host}'")));
        }

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|err| internal_error(err.to_string()))?,
        };
        let base_url = format!("{}/{FIRESTORE_API_VERSION}", host.trim_end_matches('/'));
        Ok(Connection { client, base_url })
    }
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// `{host}/v1beta1`, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a JSON body to `path` (relative to the base URL) and returns the raw
    /// response body.
    ///
    /// The HTTP status is not interpreted: Firestore reports query errors inside
    /// the body, which the caller decodes.
    pub fn post_json(&self, path: &str, body: String) -> FirestoreResult<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| {
                log::error!("Firestore request to {url} failed: {err}");
                transport_error(format!("Failed to send request to {url}: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("Firestore responded with HTTP {status} for {url}");
        }

        let bytes = response.bytes().map_err(|err| {
            log::error!("Failed to read Firestore response from {url}: {err}");
            read_error(format!("Failed to read response body from {url}: {err}"))
        })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::error::FirestoreErrorCode;
    use crate::test_support::start_mock_server;
    use httpmock::prelude::*;
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener};
    use std::thread;

    #[test]
    fn custom_host_gets_api_version() {
        let connection = Connection::builder()
            .with_host("http://localhost:9000/")
            .build()
            .unwrap();
        assert_eq!(connection.base_url(), "http://localhost:9000/v1beta1");
    }

    #[test]
    fn emulator_host_uses_plain_http() {
        let connection = Connection::builder()
            .with_host(FIRESTORE_API_HOST)
            .with_emulator_host("127.0.0.1:8080")
            .build()
            .unwrap();
        assert_eq!(connection.base_url(), "http://127.0.0.1:8080/v1beta1");
    }

    #[test]
    fn rejects_invalid_host() {
        let err = Connection::builder().with_host("not a url").build().unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::InvalidArgument);
    }

    #[test]
    fn post_json_returns_body_regardless_of_status() {
        let Some(server) = start_mock_server() else {
            eprintln!("Skipping post_json_returns_body_regardless_of_status: cannot bind mock server");
            return;
        };
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta1/echo")
                .header("content-type", "application/json")
                .body(r#"{"a":1}"#);
            then.status(500).body("[]");
        });

        let connection = Connection::builder().with_host(server.base_url()).build().unwrap();
        let body = connection.post_json("/echo", r#"{"a":1}"#.to_string()).unwrap();

        mock.assert();
        assert_eq!(body, b"[]");
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let connection = Connection::builder()
            .with_host("http://127.0.0.1:1")
            .build()
            .unwrap();
        let err = connection.post_json("echo", "{}".to_string()).unwrap_err();
        assert_eq!(err.code, FirestoreErrorCode::Transport);
    }

    /// Serves one request, answering with fewer body bytes than announced.
    fn serve_truncated_response(listener: TcpListener) {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        let header_end = loop {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
            if let Some(pos) = request.windows(4).position(|window| window == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while request.len() < header_end + content_length {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"document\"",
        );
        let _ = stream.flush();
        let _ = stream.shutdown(Shutdown::Write);
    }

    #[test]
    fn truncated_body_is_read_error() {
        let Ok(listener) = TcpListener::bind("127.0.0.1:0") else {
            eprintln!("Skipping truncated_body_is_read_error: cannot bind local listener");
            return;
        };
        let address = listener.local_addr().unwrap();
        let server = thread::spawn(move || serve_truncated_response(listener));

        let connection = Connection::builder()
            .with_host(format!("http://{address}"))
            .build()
            .unwrap();
        let err = connection.post_json("echo", "{}".to_string()).unwrap_err();

        assert_eq!(err.code, FirestoreErrorCode::Read);
        server.join().unwrap();
    }
}
