use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Nesting deeper than {limit} levels at key {key:?}")]
    TooDeep { limit: usize, key: String },
}

impl CodecError {
    pub fn too_deep(limit: usize, key: impl Into<String>) -> Self {
        Self::TooDeep {
            limit,
            key: key.into(),
        }
    }
}
