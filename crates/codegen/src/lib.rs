//! Supactl Code Generators
//!
//! Copyright 2025 Supactl Contributors
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! Generators behind the `supactl gen` commands: preview branch keys and
//! TypeScript types from a Postgres schema. The CLI only wires flags to these
//! entry points through the [`KeyGenerator`] and [`TypeGenerator`] traits.
//!
//! # Example
//!
//! ```rust,no_run
//! use supactl_codegen::{BranchKeyGenerator, CustomName, EnvSet, KeyGenerator, OutputFormat};
//!
//! let overrides = EnvSet::from_entries(&["auth.anon_key=NEXT_PUBLIC_SUPABASE_ANON_KEY"])?;
//! let names = CustomName::from_env_set(&overrides)?;
//! BranchKeyGenerator.generate(
//!     "abcdefghijklmnopqrst",
//!     OutputFormat::Env,
//!     &names,
//!     &mut std::io::stdout(),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod db;
pub mod envset;
pub mod error;
pub mod keys;
pub mod output;
pub mod typescript;

pub use db::DbConfig;
pub use envset::EnvSet;
pub use error::{EnvSetError, GenError};
pub use keys::{BranchKeyGenerator, CustomName, KeyGenerator};
pub use output::OutputFormat;
pub use typescript::{Target, TypeGenerator, TypeScriptGenerator, TypesOptions};
