//! # CLI Module
//!
//! Command-line interface for the exgen code generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate Elixir sources from a resolved model document:
//!
//! ```bash
//! exgen generate --model model.yaml --output lib/generated
//! ```
//!
//! Options:
//! - `--model <FILE>` - Path to the resolved model document (required)
//! - `--output <DIR>` - Output directory (default: `generated`)
//! - `--force` - Overwrite existing files
//! - `--module <NAME>` - Restrict entity-mapping generation to one module
//!
//! ### `routes`
//!
//! Print the derived route table of every enabled web service:
//!
//! ```bash
//! exgen routes --model model.yaml
//! ```

mod commands;

pub use commands::{run_cli, Cli, Commands};
