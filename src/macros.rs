/// Unwraps a `Result<Option<T>, E>` inside a function returning
/// `Option<Result<T, F>>`: errors are converted and returned as
/// `Some(Err(_))`, the rest yields an `Option<T>`.
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(Some(v)) => Some(v),
            Ok(None) => None,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}
