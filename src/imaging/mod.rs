//! Image normalization: turning a picked image locator into something a
//! self-contained HTML document can embed.
//!
//! | Platform | Strategy | On failure |
//! |---|---|---|
//! | **Native** | read the file, base64-encode | empty string |
//! | **Web** | HTTP GET, base64-encode | original locator, unchanged |
//!
//! Both strategies produce `data:<media-type>;base64,<payload>`. Failures are
//! logged and swallowed; generation proceeds with the degraded value.
//!
//! The module is split into:
//! - **Data URLs**: pure functions for media-type sniffing and encoding
//! - **Normalizer**: [`ImageNormalizer`] trait, [`Platform`], [`normalizer_for`]
//! - **Strategies**: [`FileNormalizer`] and [`FetchNormalizer`]

mod data_url;
pub mod fetch_normalizer;
pub mod file_normalizer;
pub mod normalizer;

pub use data_url::{DEFAULT_MEDIA_TYPE, encode_data_url, media_type};
pub use fetch_normalizer::FetchNormalizer;
pub use file_normalizer::FileNormalizer;
pub use normalizer::{ImageNormalizer, NormalizeError, Platform, normalizer_for};
