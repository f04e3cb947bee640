use log::{debug, info};
use std::net::TcpListener;

/// Find the first free port starting at `port`, probing up to `scan_limit`
/// consecutive ports with a bind test.
pub fn probe_port(host: &str, port: u16, scan_limit: u16) -> Option<u16> {
    for candidate in port..port.saturating_add(scan_limit) {
        match TcpListener::bind((host, candidate)) {
            Ok(listener) => {
                drop(listener);
                if candidate != port {
                    info!(
                        "port {} busy, falling back to {} (host={})",
                        port, candidate, host
                    );
                }
                return Some(candidate);
            }
            Err(err) => {
                debug!("port probe failed (port={}, error={})", candidate, err);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::probe_port;
    use std::net::TcpListener;

    #[test]
    fn returns_start_port_when_free() {
        // Bind to an ephemeral port first so we know one that is free.
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let free = listener.local_addr().expect("addr").port();
        drop(listener);
        assert_eq!(probe_port("127.0.0.1", free, 10), Some(free));
    }

    #[test]
    fn skips_a_busy_port() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let busy = listener.local_addr().expect("addr").port();
        let probed = probe_port("127.0.0.1", busy, 10).expect("free port in range");
        assert_ne!(probed, busy);
    }

    #[test]
    fn gives_up_after_the_scan_limit() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let busy = listener.local_addr().expect("addr").port();
        assert_eq!(probe_port("127.0.0.1", busy, 1), None);
    }
}
