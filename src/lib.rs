pub mod config;
pub mod front_matter;
pub mod index_writer;
pub mod logger;
pub mod normalizer;
pub mod paginator;
pub mod pipeline;
pub mod post;
pub mod post_index;
pub mod scaffold;
pub mod scanner;
pub mod search;
pub mod taxonomy;
mod test_data;
pub mod text_utils;
