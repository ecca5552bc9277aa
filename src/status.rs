//! HTTP status codes the service answers with.
//!
//! Use [`Status`] anywhere a status code is accepted:
//! `Response::builder().status()` or [`PageError::new`](crate::PageError::new).

/// The status codes this service produces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    Ok,                  // 200
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Ok                  => 200,
            Self::BadRequest          => 400,
            Self::NotFound            => 404,
            Self::MethodNotAllowed    => 405,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable  => 503,
        }
    }

    pub fn is_server_error(self) -> bool {
        self.as_u16() >= 500
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.as_u16()
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                  => http::StatusCode::OK,
            Status::BadRequest          => http::StatusCode::BAD_REQUEST,
            Status::NotFound            => http::StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => http::StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable  => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_http_codes_agree() {
        for s in [
            Status::Ok,
            Status::BadRequest,
            Status::NotFound,
            Status::MethodNotAllowed,
            Status::InternalServerError,
            Status::ServiceUnavailable,
        ] {
            assert_eq!(http::StatusCode::from(s).as_u16(), s.as_u16());
        }
    }

    #[test]
    fn only_5xx_are_server_errors() {
        assert!(Status::InternalServerError.is_server_error());
        assert!(Status::ServiceUnavailable.is_server_error());
        assert!(!Status::NotFound.is_server_error());
    }
}
