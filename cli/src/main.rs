#![deny(missing_docs)]

//! # Inject Tag CLI
//!
//! Rewrites struct tags in generated Go files from `@inject_tag` comments.
//!
//! ```text
//! inject-tag --input 'api/*.pb.go' --xxx-skip XXX_unrecognized,XXX_sizecache
//! ```

use clap::Parser;
use inject_tag_core::TracingObserver;

use crate::error::CliResult;
use crate::logging::LogFormat;

mod error;
mod inject;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Inject custom struct tags into generated Go code")]
struct Cli {
    #[clap(flatten)]
    inject: inject::InjectArgs,

    /// Log every planned and applied tag.
    #[clap(short, long, env = "INJECT_TAG_VERBOSE")]
    verbose: bool,

    /// Log record format.
    #[clap(long, value_enum, default_value_t = LogFormat::Text, env = "INJECT_TAG_LOG_FORMAT")]
    log_format: LogFormat,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::initialize(cli.verbose, cli.log_format);

    inject::execute(&cli.inject, &TracingObserver)
}
