pub mod server;

/// Actions the CLI can dispatch to.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        base_url: String,
        session_ttl_seconds: u64,
    },
}
