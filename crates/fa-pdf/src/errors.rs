use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot read input PDF {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Input path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Invalid field mapping JSON: {0}")]
    Mapping(#[from] serde_json::Error),

    #[error("Field mapping must be a JSON object of field name to value")]
    MappingNotObject,
}
