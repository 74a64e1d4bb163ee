use lakitu_bytecode::BytecodeError;
use lakitu_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum AsmError {
    #[error("area data: {0}")]
    Bytecode(#[from] BytecodeError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
