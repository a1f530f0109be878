use ron::extensions::Extensions;
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    OpeningFile(#[from] std::io::Error),
    #[error(transparent)]
    Ron(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait FromDisk {
    async fn from_disk(path: &Path) -> Result<Self, Error>
    where
        Self: Sized;
}

/// Parse a RON document. Newtypes are written as their inner value, so
/// `id: "L001"` fills an `Id(String)` field.
pub fn from_ron_str<T: DeserializeOwned>(
    content: &str,
) -> Result<T, ron::error::SpannedError> {
    ron::Options::default()
        .with_default_extension(Extensions::UNWRAP_NEWTYPES)
        .from_str(content)
}

/// Read a whole RON document from disk.
pub async fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(from_ron_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Listing {
        lots: Vec<String>,
    }

    #[tokio::test]
    async fn test_read_ron() {
        let path = std::env::temp_dir().join("helper_read_ron_test.ron");
        tokio::fs::write(&path, r#"(lots: ["L001", "L002"])"#).await.unwrap();
        let listing: Listing = read_ron(&path).await.unwrap();
        assert_eq!(listing.lots, vec!["L001".to_string(), "L002".to_string()]);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Lot(String);

    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        lot:   Lot,
        title: String,
    }

    #[test]
    fn test_newtypes_are_unwrapped() {
        let entry: Entry =
            from_ron_str(r#"(lot: "L001", title: "Monsoon Study")"#).unwrap();
        assert_eq!(entry.lot, Lot("L001".to_string()));
    }

    #[tokio::test]
    async fn test_read_ron_missing_file() {
        let path = std::env::temp_dir().join("helper_read_ron_missing.ron");
        let _ = tokio::fs::remove_file(&path).await;
        let res = read_ron::<Listing>(&path).await;
        assert!(matches!(res, Err(Error::OpeningFile(_))));
    }
}
