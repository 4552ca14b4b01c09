// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String), // Caller handed us something we refuse to act on
    #[error("Image load error: {0}")]
    ImageLoad(String),       // Opening/decoding the source picture failed
    #[error("Window init error: {0}")]
    WindowInit(String),      // Creating the preview window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),    // Pushing the canvas to the window failed
    #[error("Config error: {0}")]
    Config(String),          // Reading/parsing/writing config.toml failed
    #[error("Pointer device error: {0}")]
    Device(String),          // The pointer collaborator rejected an action
}

pub type Result<T> = std::result::Result<T, Error>;
