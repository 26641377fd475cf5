use provenance_core::IsTimeout;
use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("HTTP reqwest error"))]
    Request {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("HTTP middleware error: '{error}'"))]
    Middleware {
        #[snafu(implicit)]
        location: Location,
        error: String,
    },
    #[snafu(display("HTTP request timed out"))]
    Timeout {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: reqwest::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::FailedRequest { status, .. } => Some(*status),
            Error::Request { .. } | Error::Middleware { .. } | Error::Timeout { .. } => None,
        }
    }
}

impl IsTimeout for Error {
    fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::FailedRequest { status, .. } => {
                matches!(
                    *status,
                    StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT
                )
            }
            Error::Request { .. } | Error::Middleware { .. } => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    #[track_caller]
    fn from(value: reqwest::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        if value.is_timeout() {
            Error::Timeout {
                location,
                error: value,
            }
        } else {
            Error::Request {
                location,
                error: value,
            }
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    #[track_caller]
    fn from(value: reqwest_middleware::Error) -> Self {
        match value {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => {
                let location = std::panic::Location::caller();
                Error::Middleware {
                    location: Location::new(location.file(), location.line(), location.column()),
                    error: format!("{e:?}"),
                }
            }
        }
    }
}

impl From<Error> for provenance_core::Error {
    #[track_caller]
    fn from(value: Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        if value.is_timeout() {
            provenance_core::Error::Timeout {
                location,
                opaque: Box::new(value),
            }
        } else {
            provenance_core::Error::Unexpected {
                location,
                opaque: Box::new(value),
            }
        }
    }
}
