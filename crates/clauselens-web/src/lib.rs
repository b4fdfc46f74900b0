//! clauselens-web — Web UI and upload relay for ClauseLens.
//! Provides:
//!   - Dashboard listing contracts analyzed this session
//!   - Upload form that relays documents to the external analysis service
//!   - Per-contract analysis view with clause-level risk breakdown
//!   - `/api/analyze` relay endpoint returning the service response verbatim

pub mod handlers;
pub mod relay;
pub mod router;
pub mod state;
pub mod view;
