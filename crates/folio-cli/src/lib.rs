//! Command-line front end for Folio.
//!
//! `folio build` renders every page under the content directory and writes
//! a navigation index; `folio check` reports pages whose edit paths point
//! nowhere; `folio config` manages the TOML configuration.
//!
//! # Modules
//!
//! - [`cli`]: Argument types (`clap` derive)
//! - [`config`]: [`FolioConfig`] loading via `confyg`
//! - [`app`]: [`FolioCli`], logging setup and dispatch
//! - [`build_handlers`]: Site build, check, index and show
//! - [`config_handlers`]: `folio config` subcommands

pub mod app;
pub mod build_handlers;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::FolioCli;
pub use cli::{CliArgs, Command, ConfigAction, Format};
pub use config::FolioConfig;
