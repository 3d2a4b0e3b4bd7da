/// Builds a `reqwest::Client` carrying the user agent of a [`ServerConfig`](crate::imageboards::ServerConfig).
///
/// Must be used inside a function returning a `Result` whose error converts from `reqwest::Error`.
#[macro_export]
macro_rules! client {
    ($x:expr) => {{
        reqwest::Client::builder()
            .user_agent($x.client_user_agent.as_str())
            .build()?
    }};
}

/// Joins a board and thread into the short `/board/thread` form used in progress lines.
#[macro_export]
macro_rules! thread_target {
    ($board:expr, $thread:expr) => {{
        format!("/{}/{}", $board, $thread)
    }};
}
