//! Test server wrapper that starts Colorbook on a random port

use std::net::SocketAddr;

use colorbook_config::Config;
use colorbook_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL for a path on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Base URL without a trailing path
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Post a multipart form to `/api/generate`, returning status and JSON body
    pub async fn generate(&self, form: reqwest::multipart::Form) -> (u16, serde_json::Value) {
        let resp = self
            .client
            .post(self.url("/api/generate"))
            .multipart(form)
            .send()
            .await
            .expect("request failed");

        let status = resp.status().as_u16();
        let body = resp.json().await.expect("response was not JSON");
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Multipart form as the browser page sends it
pub fn form(image: Option<&[u8]>, name: &str, background: &str) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();

    if let Some(bytes) = image {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name("photo.png")
            .mime_str("image/png")
            .expect("valid mime");
        form = form.part("image", part);
    }

    form.text("name", name.to_owned()).text("background", background.to_owned())
}
