pub mod calc;
pub mod clock;
pub mod config;
pub mod focus;

/// Single-threaded runtime for the commands that tick.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
