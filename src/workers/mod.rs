mod session_cleanup;

pub use session_cleanup::spawn_session_cleanup;
