//! Aura Server - briefing orchestration and HTTP surface
//!
//! Routes:
//! - `GET /briefing?codes=KSFO,KOAK&include_notams=true`
//! - `POST /api/convert-to-pirep`
//! - `GET /healthz`

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod error;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;

pub use error::{ApiError, ServerError};
pub use routes::build_router;
pub use server::serve;
pub use service::BriefingService;
pub use state::AppState;
