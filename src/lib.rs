//! Hoist - deploy a bot worker to Heroku in one command.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── deploy        # Terminal reporter, prompt, entry point
//! │   ├── completions   # Shell completions
//! │   └── output        # Styled output helpers
//! └── core/             # Core library components
//!     ├── config        # .hoist.toml and flag merging
//!     ├── domain/       # Stage, Target, SecretsFile
//!     ├── pipeline      # Ordered deployment stages
//!     ├── platform      # Heroku CLI commands
//!     ├── git           # Publish commands
//!     ├── runner        # Subprocess seam (system, dry run)
//!     ├── notion        # Notion id formatting
//!     └── validation    # Key and app name checks
//! ```
//!
//! # Stages
//!
//! preflight → auth → resolve → target → secrets → publish → scale →
//! post-deploy → complete

pub mod cli;
pub mod core;
pub mod error;
