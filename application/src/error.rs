//! GraphQL API [`Error`]s and conversions into them.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::infra::database;
use tracerr::{Trace, Traced};

/// Defines an enum of client-facing errors, each of its variants carrying a
/// [`Code`], an [`http::StatusCode`] and a message.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Client-facing error.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl $name {
            /// Returns the code this error is reported with.
            #[must_use]
            pub const fn code(self) -> $crate::error::Code {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// Returns the HTTP status this error is responded with.
            #[must_use]
            pub const fn status_code(self) -> ::http::StatusCode {
                match self {
                    $( Self::$variant => ::http::StatusCode::$status_code, )*
                }
            }
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                Self::new(err.code(), err.status_code(), err)
            }
        }
    };
}

/// Error returned by the GraphQL API.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// Machine-readable [`Code`] of this [`Error`].
    pub code: Code,

    /// [`http::StatusCode`] the response is given with.
    pub status_code: http::StatusCode,

    /// Human-readable message of this [`Error`].
    pub message: String,

    /// [`Trace`] of where this [`Error`] originated, if known.
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,
}

impl Error {
    /// Creates a new [`Error`] without a [`Trace`].
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        message: impl fmt::Display,
    ) -> Self {
        Self {
            code,
            status_code,
            message: message.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] describing a failure on the server side.
    #[must_use]
    pub fn internal(message: impl fmt::Display) -> Self {
        Self::new(
            "INTERNAL_SERVER_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            message,
        )
    }

    /// Attaches the provided [`Trace`] to this [`Error`].
    #[must_use]
    pub fn with_backtrace(mut self, trace: Trace) -> Self {
        self.backtrace = Some(trace);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)?;
        if let Some(trace) = &self.backtrace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let Self {
            code,
            message,
            backtrace,
            ..
        } = self;

        let frames = backtrace
            .iter()
            .flat_map(|trace| trace.iter())
            .map(|frame| juniper::Value::scalar(frame.to_string()))
            .collect_vec();

        let mut extensions = juniper::Object::with_capacity(2);
        for (field, value) in [
            ("code", juniper::Value::scalar(code.to_owned())),
            ("backtrace", juniper::Value::list(frames)),
        ] {
            drop(extensions.add_field(field, value));
        }
        juniper::FieldError::new(message, juniper::Value::object(extensions))
    }
}

/// Machine-readable code of an [`Error`], like `RESERVATION_NOT_EXISTS`.
pub type Code = &'static str;

/// Conversion of a failure into a client-facing [`Error`].
pub trait AsError {
    /// Returns the client-facing [`Error`] this failure is reported as.
    ///
    /// [`None`] means the failure is internal and its details are not
    /// exposed.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts this failure into an [`Error`], reporting internal failures
    /// via [`Error::internal()`].
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(self))
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        self.as_ref()
            .try_as_error()
            .map(|e| e.with_backtrace(self.trace().clone()))
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use derive_more::Display;
    use juniper::{DefaultScalarValue, IntoFieldError};
    use service::domain::reservation::PeriodError;

    use crate::{AsError, Error};

    define_error! {
        enum ReservationError {
            #[code = "RESERVATION_TAKEN"]
            #[status = CONFLICT]
            #[message = "Dates are already reserved"]
            Taken,
        }
    }

    #[derive(Debug, Display)]
    #[display("pool timed out")]
    struct PoolTimeout;

    impl AsError for PoolTimeout {
        fn try_as_error(&self) -> Option<Error> {
            None
        }
    }

    #[test]
    fn defined_error_carries_code_and_status() {
        let err = Error::from(ReservationError::Taken);

        assert_eq!(err.code, "RESERVATION_TAKEN");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(err.message, "Dates are already reserved");
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn traced_error_keeps_backtrace() {
        let err = tracerr::new!(PeriodError::StartInPast).into_error();

        assert_eq!(err.code, "INVALID_RESERVATION_PERIOD");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "start date cannot be in the past");
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn unexposed_failure_becomes_internal() {
        let err = PoolTimeout.into_error();

        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
        assert!(err.status_code.is_server_error());
        assert_eq!(err.to_string(), "[INTERNAL_SERVER_ERROR]: pool timed out");
    }

    #[test]
    fn field_error_exposes_code() {
        let field_err = IntoFieldError::<DefaultScalarValue>::into_field_error(
            Error::from(ReservationError::Taken),
        );

        assert_eq!(field_err.message(), "Dates are already reserved");
        assert_eq!(
            field_err
                .extensions()
                .as_object_value()
                .and_then(|ext| ext.get_field_value("code"))
                .and_then(|code| code.as_string_value()),
            Some("RESERVATION_TAKEN"),
        );
    }
}
