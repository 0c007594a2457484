use managed_gauges::managed;
use std::sync::atomic::{AtomicU64, Ordering};

struct Server {
    requests: AtomicU64,
    version: String,
}

#[managed(name = "http.Server")]
impl Server {
    /// Number of HTTP requests received
    /// from the client
    #[gauge]
    fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    #[gauge(name = "server.up")]
    #[gauge(absolute)]
    fn up(&self) -> bool {
        true
    }

    #[gauge]
    fn version(&self) -> &str {
        &self.version
    }

    fn reset(&self) {
        self.requests.store(0, Ordering::Relaxed);
    }
}

fn main() {
    Server {
        requests: AtomicU64::new(0),
        version: "1.0".to_string(),
    }
    .reset();
}
