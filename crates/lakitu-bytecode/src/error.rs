//! Codec errors. Offsets are byte positions in the stream being parsed.

#[derive(Debug, thiserror::Error)]
pub enum BytecodeError {
    #[error("stream ends inside a command at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("unknown geography opcode {byte:#04x} at offset {offset}")]
    UnknownGeographyOpcode { byte: u8, offset: usize },
    #[error("unknown character opcode {opcode:#04x} at offset {offset}")]
    UnknownCharacter { opcode: u8, offset: usize },
    #[error("exit pointer names unknown area {id:?}")]
    UnknownDestination { id: String },
}
