//! Shared mock device for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// One request as the device saw it.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// How the device answers a route.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Reply {
    Status(u16),
    /// Never answer.
    Stall,
}

/// Start a device on an ephemeral port. Unlisted routes answer 404.
pub async fn start_mock_device(
    routes: Vec<(&str, &str, Reply)>,
) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<(String, String), Reply>> = Arc::new(
        routes
            .into_iter()
            .map(|(method, path, reply)| ((method.to_string(), path.to_string()), reply))
            .collect(),
    );
    let log = Arc::new(Mutex::new(Vec::new()));

    let requests = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let routes = routes.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);
                        let Some(request) = read_request(&mut reader).await else {
                            return;
                        };
                        let reply = routes
                            .get(&(request.method.clone(), request.path.clone()))
                            .copied()
                            .unwrap_or(Reply::Status(404));
                        requests.lock().unwrap().push(request);

                        let status = match reply {
                            Reply::Status(status) => status,
                            Reply::Stall => {
                                tokio::time::sleep(Duration::from_secs(3600)).await;
                                return;
                            }
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status,
                            reason(status)
                        );
                        let _ = write_half.write_all(response.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn read_request<R: AsyncBufReadExt + AsyncReadExt + Unpin>(
    reader: &mut R,
) -> Option<RecordedRequest> {
    let mut line = String::new();
    reader.read_line(&mut line).await.ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).await.ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
