use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ReaderError {
    #[error("dump file reading error")]
    #[diagnostic(code(libmykey::io_error))]
    ReadFile(#[from] std::io::Error),

    #[error("first line does not start with the COGES_MYKEY_V1 magic")]
    #[diagnostic(code(libmykey::header_error))]
    MissingHeader,

    #[error("missing or malformed UID line")]
    #[diagnostic(code(libmykey::uid_error))]
    MissingUid,

    #[error("missing or malformed ENCRYPTION_KEY line")]
    #[diagnostic(code(libmykey::key_error))]
    MissingKey,
}
