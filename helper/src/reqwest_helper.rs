use reqwest::Response;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to get bytes from the body of the message: {0}")]
    Body(#[from] reqwest::Error),
    #[error(
        "Failed to deserialize (supposedly JSON) to the specified type, the \
         text message is {text:?}: {source}"
    )]
    Deserialize { source: serde_json::Error, text: String },
}

/// Read the whole body and deserialize it, keeping the raw text around to
/// make the error useful.
pub async fn deserialize_response<T>(response: Response) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let full = response.bytes().await?;
    deserialize_body(&full)
}

pub fn deserialize_body<T>(full: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(full).map_err(|source| Error::Deserialize {
        source,
        text: String::from_utf8_lossy(full).to_string(),
    })
}
