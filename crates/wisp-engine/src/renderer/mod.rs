pub mod feed;

pub use feed::{RenderFeed, SparkVertex};
