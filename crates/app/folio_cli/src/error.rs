use folio_core::chat::transport::TransportError;
use folio_core::chat::widget::SendRejected;
use folio_core::persona::PersonaError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Persona: {}", .0)]
    Persona(#[from] PersonaError),

    #[error("Transport: {}", .0)]
    Transport(#[from] TransportError),

    #[error("Send rejected: {}", .0)]
    Rejected(#[from] SendRejected),
}
