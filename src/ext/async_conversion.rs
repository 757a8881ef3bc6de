/// Async counterpart to the standard library's `TryFrom<T>` trait.
///
/// Useful when building a value involves I/O, such as reading a config
/// file from disk.
///
/// # Examples
///
/// ```rust,ignore
/// use std::path::Path;
///
/// struct FileContent(String);
///
/// impl<'a> AsyncTryFrom<&'a Path> for FileContent {
///     type Error = std::io::Error;
///
///     async fn async_try_from(path: &'a Path) -> Result<Self, Self::Error> {
///         let bytes = compio::fs::read(path).await?;
///         Ok(FileContent(String::from_utf8_lossy(&bytes).into_owned()))
///     }
/// }
/// ```
pub trait AsyncTryFrom<T>: Sized {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `T` to `Self`.
    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

/// Async counterpart to `TryInto<T>`.
pub trait AsyncTryInto<T> {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `Self` to `T`.
    async fn async_try_into(self) -> Result<T, Self::Error>;
}

/// Blanket implementation for `AsyncTryInto<U>` when `U` implements `AsyncTryFrom<T>`.
///
/// This mirrors the standard library's blanket implementation for `TryInto<T>`.
impl<T, U> AsyncTryInto<U> for T
where
    U: AsyncTryFrom<T>,
{
    type Error = U::Error;

    async fn async_try_into(self) -> Result<U, Self::Error> {
        U::async_try_from(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Port(u16);

    impl<'a> AsyncTryFrom<&'a str> for Port {
        type Error = std::num::ParseIntError;

        async fn async_try_from(value: &'a str) -> Result<Self, Self::Error> {
            Ok(Port(value.parse::<u16>()?))
        }
    }

    #[test]
    fn test_async_try_from_success() {
        futures::executor::block_on(async {
            let port = Port::async_try_from("9870").await.unwrap();
            assert_eq!(port.0, 9870);
        });
    }

    #[test]
    fn test_async_try_from_failure() {
        futures::executor::block_on(async {
            let result = Port::async_try_from("not_a_port").await;
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_async_try_into() {
        futures::executor::block_on(async {
            let port: Result<Port, _> = "50070".async_try_into().await;
            assert_eq!(port.unwrap().0, 50070);
        });
    }
}
