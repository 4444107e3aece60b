pub mod config;
pub mod logging;

pub mod alert;
pub mod chooser;
pub mod error;
pub mod fetcher;
pub mod paths;
pub mod policy;
pub mod remote_file;
pub mod storage;
pub mod transport;

pub use error::{FetchError, FetchErrorKind};
pub use fetcher::RemoteFileFetcher;
pub use paths::TargetDir;
pub use policy::DownloadPolicy;
pub use remote_file::{ChooserResult, RemoteFile};
