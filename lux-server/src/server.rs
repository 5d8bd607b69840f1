//! Connection handling
//!
//! Each accepted connection runs in its own task:
//! read the request until the peer half-closes, answer it, close.
//! A failing connection is logged and dropped; the accept loop keeps going.

use std::future::Future;
use std::net::SocketAddr;

use lux_common::protocol::{decode_request, encode_response};
use lux_common::{Error, Result, SearchRequest, SearchResponse, SearchResult};
use sqlx::SqlitePool;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::{query, AppState};

/// Bind the listening socket on all interfaces
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    Ok(TcpListener::bind(addr).await?)
}

/// Accept connections until `shutdown` resolves
///
/// Connections already accepted are answered before this returns.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Server shutting down...");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let state = state.clone();
                    connections.spawn(handle_connection(stream, peer, state));
                }
                Err(e) => warn!("Failed to accept connection: {}", e),
            },
            Some(finished) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = finished {
                    error!("Connection task failed: {}", e);
                }
            }
        }
    }

    drop(listener);
    if !connections.is_empty() {
        info!("Waiting for {} open connection(s)", connections.len());
    }
    while let Some(finished) = connections.join_next().await {
        if let Err(e) = finished {
            error!("Connection task failed: {}", e);
        }
    }

    Ok(())
}

/// Serve one request/response exchange, then close
pub async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, state: AppState) {
    debug!("Accepted connection from {}", peer);

    let outcome = match state.request_timeout {
        Some(limit) => tokio::time::timeout(limit, exchange(&mut stream, &state))
            .await
            .unwrap_or(Err(Error::Timeout(limit))),
        None => exchange(&mut stream, &state).await,
    };

    match outcome {
        Ok(()) => debug!("Closed connection from {}", peer),
        Err(e) => warn!("Dropped connection from {}: {}", peer, e),
    }
}

/// Read to EOF, respond, half-close our side
pub async fn exchange<S>(stream: &mut S, state: &AppState) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = match read_request(stream, state.max_request_bytes).await {
        Ok(body) => respond(&body, &state.db).await,
        Err(e) if e.is_client_fault() => {
            warn!("Rejected request: {}", e);
            SearchResponse::error(e)
        }
        Err(e) => return Err(e),
    };

    let body = encode_response(&response)?;
    stream.write_all(&body).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Read the whole request body; the peer marks the end by half-closing
async fn read_request<S>(stream: &mut S, max_bytes: usize) -> Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    (&mut *stream)
        .take((max_bytes as u64).saturating_add(1))
        .read_to_end(&mut body)
        .await?;

    if body.len() > max_bytes {
        // Drain the rest so closing with unread input does not reset the peer
        tokio::io::copy(stream, &mut tokio::io::sink()).await?;
        return Err(Error::InvalidInput(format!(
            "request exceeds {} bytes",
            max_bytes
        )));
    }

    Ok(body)
}

/// Turn a request body into a response; never fails
///
/// Undecodable bodies and store faults both become error payloads.
pub async fn respond(body: &[u8], db: &SqlitePool) -> SearchResponse {
    let request = match decode_request(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return SearchResponse::error(e);
        }
    };
    debug!("Request: {:?}", request);

    match process(&request, db).await {
        Ok(results) => {
            info!("Answered search with {} result(s)", results.len());
            SearchResponse::results(results)
        }
        Err(e) => {
            error!("Search failed: {}", e);
            SearchResponse::error(e)
        }
    }
}

/// Run the search on a pooled connection owned by this request alone
async fn process(request: &SearchRequest, db: &SqlitePool) -> Result<Vec<SearchResult>> {
    let mut conn = db.acquire().await?;
    query::search(&mut conn, request).await
}
