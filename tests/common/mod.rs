//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use replica_tuner::publish::{CommandOutput, CommandRunner};
use replica_tuner::TunerConfig;

/// Start a mock Prometheus that answers every request with `status` and `body`.
///
/// Returns the bound address and the request lines received so far.
pub async fn start_mock_prometheus(status: u16, body: String) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                            }
                        }
                        let request = String::from_utf8_lossy(&buf);
                        if let Some(line) = request.lines().next() {
                            seen.lock().unwrap().push(line.to_string());
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Instant-query body with one series per `(pod, value)`.
pub fn query_body(series: &[(&str, &str)]) -> String {
    let result: Vec<serde_json::Value> = series
        .iter()
        .map(|(pod, value)| {
            serde_json::json!({
                "metric": { "pod": pod, "namespace": "default" },
                "value": [1712345678.5, value]
            })
        })
        .collect();

    serde_json::json!({
        "status": "success",
        "data": { "resultType": "vector", "result": result }
    })
    .to_string()
}

/// Config pointing at a mock backend and a scratch chart directory.
#[allow(dead_code)]
pub fn test_config(prometheus: SocketAddr, repo: &Path, threshold: f64) -> TunerConfig {
    let mut config = TunerConfig::default();
    config.metrics.prometheus_url = format!("http://{}", prometheus);
    config.metrics.timeout_secs = Some(5);
    config.chart.repo_path = repo.to_path_buf();
    config.threshold = threshold;
    config.interval_secs = 1;
    config
}

/// Command runner that records invocations instead of running git.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    fail_subcommand: Option<&'static str>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn failing(subcommand: &'static str) -> Self {
        Self {
            fail_subcommand: Some(subcommand),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Subcommands in invocation order (`add`, `commit`, `push`).
    pub fn subcommands(&self) -> Vec<String> {
        self.calls().iter().map(|args| args[2].clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        assert_eq!(program, "git");
        self.calls.lock().unwrap().push(args.to_vec());

        let failed = self.fail_subcommand.is_some_and(|sub| args[2] == sub);
        Ok(CommandOutput {
            status: Some(if failed { 1 } else { 0 }),
            output: String::new(),
        })
    }
}
