//! Convenience macros for returning command results.

/// Returns an `Ok` [`MiResult`](types/type.MiResult.html).
///
/// If called with no arguments, returns an empty value as the `Ok` result.
/// If called with one argument, returns the argument as the `Ok` result, converting it
/// to a value automatically.  If called with two or more arguments, computes the `Ok`
/// result using `format!()`; the first argument is naturally the format string.
///
/// # Examples
///
/// ```
/// use mitcl::*;
///
/// fn sum() -> MiResult {
///     mi_ok!(2i64 + 3)
/// }
///
/// fn greeting(name: &str) -> MiResult {
///     mi_ok!("Hello, {}!", name)
/// }
///
/// assert_eq!(sum().unwrap().as_str(), "5");
/// assert_eq!(greeting("world").unwrap().as_str(), "Hello, world!");
/// ```
#[macro_export]
macro_rules! mi_ok {
    () => (
        Ok($crate::Value::empty())
    );
    ($arg:expr) => (
        Ok($crate::Value::from($arg))
    );
    ($($arg:tt)*) => (
        Ok($crate::Value::from($crate::__format!($($arg)*)))
    )
}

/// Returns an `Err` result whose kind is `MalformedCommand`.  The arguments are as
/// for `format!`.
///
/// # Examples
///
/// ```
/// use mitcl::*;
///
/// fn check(flag: bool) -> MiResult {
///     if !flag {
///         return mi_err!("flag is {}", flag);
///     }
///     mi_ok!()
/// }
///
/// assert_eq!(check(false).unwrap_err().to_string(), "flag is false");
/// ```
#[macro_export]
macro_rules! mi_err {
    ($($arg:tt)*) => (
        Err($crate::Exception::malformed($crate::__format!($($arg)*)))
    )
}
