mod format;
mod generate;

pub use format::{format_go_files, GOFMT_BIN_ENV};
pub use generate::{generate_project, GenerateOptions, GenerationScope};
