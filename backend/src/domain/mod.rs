//! Domain core: entities, schema rules, guards, ports, and the pipeline.
//!
//! Everything here is transport agnostic. Inbound adapters translate domain
//! errors into HTTP responses; outbound adapters implement the ports against
//! concrete infrastructure.

pub mod email_guard;
pub mod error;
pub mod ports;
pub mod service;
pub mod trace_id;
pub mod user;
pub mod validate;

pub use self::error::{Error, ErrorCode, FieldError, PathSegment};
pub use self::service::UserService;
pub use self::trace_id::TraceId;
pub use self::user::User;
