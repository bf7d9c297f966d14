//! Pure text transforms applied to sector file contents.

pub mod info;
pub mod keywords;
pub mod noise;

pub use info::{extract_info, splice_info};
pub use keywords::{KeywordChange, KeywordRule, replace_keywords};
pub use noise::strip_noise;
