use lakitu_bytecode::BytecodeError;
use lakitu_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum RomError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("offset {offset:#06x} is outside the image ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
    #[error("no {sentinel:#04x} sentinel after offset {offset:#06x}")]
    UnterminatedStream { offset: usize, sentinel: u8 },
    #[error("area data: {0}")]
    Bytecode(#[from] BytecodeError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
