//! Query command: build a catalog search query string.

use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use lyrics_analysis_core::catalog::SearchQuery;

/// Arguments for the `query` subcommand.
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Track title.
    #[arg(long)]
    pub track: Option<String>,

    /// Artist name.
    #[arg(long)]
    pub artist: Option<String>,

    /// Album name.
    #[arg(long)]
    pub album: Option<String>,
}

impl From<QueryArgs> for SearchQuery {
    fn from(args: QueryArgs) -> Self {
        Self {
            track: args.track,
            artist: args.artist,
            album: args.album,
        }
    }
}

#[derive(Serialize)]
struct QueryOutput {
    query: String,
    #[serde(flatten)]
    fields: SearchQuery,
}

/// Print the catalog query string for the given fields.
#[instrument(name = "cmd_query", skip_all)]
pub fn cmd_query(args: QueryArgs, global_json: bool) -> anyhow::Result<()> {
    let fields = SearchQuery::from(args);
    debug!(?fields, "executing query command");
    fields.validate()?;

    let query = fields.to_query_string();
    if global_json {
        let output = QueryOutput { query, fields };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{query}");
    }
    Ok(())
}
