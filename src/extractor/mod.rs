pub mod models;
pub mod traits;
pub mod url;
pub mod ytdlp;

pub use models::{Format, VideoInfo};
pub use traits::Extractor;
pub use url::{is_supported_url, validate_url};
pub use ytdlp::{find_ytdlp, YtDlpExtractor};
