//! Wire-level constants shared by the gateway and its tests.

/// Header a caller sets to declare itself part of the gateway.
pub const INTERNAL_CALL_HEADER: &str = "X-Internal-Call";

/// The only accepted value of [`INTERNAL_CALL_HEADER`].
pub const INTERNAL_CALL_VALUE: &str = "true";

/// TMDB v3 REST API root.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Image CDN prefix prepended to TMDB poster and backdrop paths.
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Prefix prepended to a YouTube video key to build a trailer link.
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Review aggregator hosting the Tomatometer pages.
pub const ROTTEN_TOMATOES_BASE_URL: &str = "https://www.rottentomatoes.com";

/// Browser-like user agent sent to the review aggregator.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
