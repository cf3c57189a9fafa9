pub mod approvals;
pub mod keywords;
pub mod website_data;

use std::path::PathBuf;

use thiserror::Error;

/// Default file names, relative to the working directory.
pub mod paths {
    pub const KEYWORDS_FILE: &str = "keywords.txt";
    pub const WEBSITE_DATA_CSV: &str = "website_data.csv";
    pub const WEBSITE_APPROVAL_CSV: &str = "website_approval.csv";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is missing column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reader that tolerates rows with a different field count than the header.
pub(crate) fn open_reader(path: &std::path::Path) -> Result<csv::Reader<std::fs::File>, StoreError> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))
}

impl StoreError {
    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = source.kind() {
            if io.kind() == std::io::ErrorKind::NotFound {
                return StoreError::NotFound(path.to_path_buf());
            }
        }
        StoreError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
