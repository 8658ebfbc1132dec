use rostersync_core::RawHousehold;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("roster source unavailable: {reason}")]
    Unavailable { reason: String },
}

/// The inbound port for the external directory service. Session
/// negotiation, authentication, and timeouts are the implementor's
/// concern; the engine only ever asks for the current roster.
pub trait RosterSource {
    fn fetch_roster(&self) -> Result<Vec<RawHousehold>, SourceError>;
}
