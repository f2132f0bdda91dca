use crate::backend::{BackendError, ShaderStage};

/// Failure to produce a usable program for a draw.
///
/// Compile and link failures carry the generated source so the caller can
/// report exactly what the backend rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgramError {
    #[error("{stage:?} shader failed to compile: {log}")]
    Compile {
        stage: ShaderStage,
        log: String,
        shader_source: String,
    },
    #[error("program failed to link: {log}")]
    Link {
        log: String,
        vertex_source: String,
        fragment_source: String,
    },
    #[error("backend error: {0}")]
    Backend(String),
}

impl ProgramError {
    /// Attaches the generated sources to a backend failure.
    pub(crate) fn from_backend(err: BackendError, vertex: &str, fragment: &str) -> Self {
        match err {
            BackendError::Compile { stage, log } => {
                let source = match stage {
                    ShaderStage::Vertex => vertex,
                    ShaderStage::Fragment => fragment,
                };
                ProgramError::Compile { stage, log, shader_source: source.to_owned() }
            }
            BackendError::Link { log } => ProgramError::Link {
                log,
                vertex_source: vertex.to_owned(),
                fragment_source: fragment.to_owned(),
            },
            BackendError::Allocation(what) => ProgramError::Backend(what),
        }
    }
}
