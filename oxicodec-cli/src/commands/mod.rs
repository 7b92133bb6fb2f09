//! Command implementations for OxiCodec CLI.

pub mod bench;
pub mod compress;
pub mod decompress;
pub mod inspect;
pub mod quantize;

pub use bench::cmd_bench;
pub use compress::{CompressOptions, cmd_compress};
pub use decompress::cmd_decompress;
pub use inspect::cmd_inspect;
pub use quantize::cmd_quantize;
