//! HTTP surface of the trade desk: JWT authentication, role guards, the
//! response envelope and every `/api` route group.

pub mod auth;
pub mod extract;
pub mod response;
pub mod routes;
