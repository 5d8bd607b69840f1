//! One-shot protocol exchange

use lux_common::protocol::{decode_response, encode_request};
use lux_common::{Result, SearchRequest, SearchResponse};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Address of a search server
#[derive(Debug, Clone)]
pub struct LuxClient {
    host: String,
    port: u16,
}

impl LuxClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Send `request` on a new connection and read the reply to EOF
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        debug!("Connected to {}:{}", self.host, self.port);

        stream.write_all(&encode_request(request)?).await?;
        // Half-close: the server reads until it sees EOF
        stream.shutdown().await?;

        let mut body = Vec::new();
        stream.read_to_end(&mut body).await?;
        debug!("Received {} bytes", body.len());

        decode_response(&body)
    }
}
