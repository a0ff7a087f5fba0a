//! Object locations in `gs://` form.

use crate::error::{DataError, Result};
use std::fmt;

/// A bucket and object name pair, parsed from or rendered as a `gs://` URI.
///
/// The object part may be empty, which names the bucket root. Trailing
/// slashes are not significant and are stripped during parsing, so
/// `gs://models/run-3/` and `gs://models/run-3` are the same location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// Bucket name
    pub bucket: String,
    /// Object name within the bucket, without a leading slash
    pub object: String,
}

impl ObjectLocation {
    /// Create a location from its parts.
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }

    /// Parse a `gs://bucket/object` URI.
    ///
    /// # Errors
    /// Returns `DataError::InvalidLocation` when the scheme is not `gs://`
    /// or the bucket name is empty.
    ///
    /// # Example
    /// ```
    /// use hobart_data::ObjectLocation;
    ///
    /// let location = ObjectLocation::parse("gs://my-bucket/models/run-3/")?;
    /// assert_eq!(location.bucket, "my-bucket");
    /// assert_eq!(location.object, "models/run-3");
    /// # Ok::<(), hobart_data::DataError>(())
    /// ```
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("gs://")
            .ok_or_else(|| DataError::InvalidLocation(format!("expected gs:// URI: {uri}")))?;

        let (bucket, object) = match rest.split_once('/') {
            Some((bucket, object)) => (bucket, object.trim_end_matches('/')),
            None => (rest, ""),
        };

        if bucket.is_empty() {
            return Err(DataError::InvalidLocation(format!(
                "empty bucket name: {uri}"
            )));
        }

        Ok(Self::new(bucket, object))
    }

    /// Return a new location with `name` appended to the object path.
    pub fn join(&self, name: &str) -> Self {
        let object = if self.object.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.object, name)
        };
        Self::new(self.bucket.clone(), object)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("gs://bucket/path/to/file.csv", "bucket", "path/to/file.csv")]
    #[case("gs://bucket/dir/", "bucket", "dir")]
    #[case("gs://bucket", "bucket", "")]
    #[case("gs://bucket/", "bucket", "")]
    fn test_parse(#[case] uri: &str, #[case] bucket: &str, #[case] object: &str) {
        let location = ObjectLocation::parse(uri).unwrap();
        assert_eq!(location.bucket, bucket);
        assert_eq!(location.object, object);
    }

    #[rstest]
    #[case("s3://bucket/key")]
    #[case("bucket/key")]
    #[case("gs:///key")]
    fn test_parse_rejects(#[case] uri: &str) {
        assert!(matches!(
            ObjectLocation::parse(uri),
            Err(DataError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_join() {
        let dir = ObjectLocation::parse("gs://models/run-3/").unwrap();
        let artifact = dir.join("model.joblib");
        assert_eq!(artifact.bucket, "models");
        assert_eq!(artifact.object, "run-3/model.joblib");

        let root = ObjectLocation::parse("gs://models").unwrap();
        assert_eq!(root.join("model.joblib").object, "model.joblib");
    }

    #[test]
    fn test_display_round_trip() {
        let location = ObjectLocation::parse("gs://bucket/a/b.bin").unwrap();
        assert_eq!(location.to_string(), "gs://bucket/a/b.bin");
    }
}
