use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport failure reaching the store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned status {status} for {resource}: {body}")]
    Remote {
        status: u16,
        resource: &'static str,
        body: String,
    },

    #[error("no {entity} found matching {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
