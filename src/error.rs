use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("docx packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
