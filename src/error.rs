use std::path::PathBuf;

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("couldn't open snapshot storage")]
    Storage,
    #[display("bot run failed")]
    Run,
    #[display("couldn't read snapshot {}", _0.display())]
    Snapshot(#[error(not(source))] PathBuf),
}
