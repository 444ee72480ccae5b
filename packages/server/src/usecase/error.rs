//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
}

impl From<RepositoryError> for ConnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateConnection(id) | RepositoryError::ConnectionNotFound(id) => {
                Self::DuplicateConnection(id)
            }
        }
    }
}

impl From<RepositoryError> for DisconnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateConnection(id) | RepositoryError::ConnectionNotFound(id) => {
                Self::ConnectionNotFound(id)
            }
        }
    }
}
