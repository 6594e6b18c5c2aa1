use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `derma auth login --token <ID_TOKEN>`")]
    NotAuthenticated,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),
}
