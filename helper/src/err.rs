/// Log the error held by a `Result` without consuming it.
#[macro_export]
macro_rules! log_err {
    ($res:expr) => {
        if let Err(err) = &$res {
            tracing::warn!("{:?}", err);
        }
    };
}
