use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "serp-nav")]
#[command(about = "Replays keyboard navigation over a search-results page")]
#[command(version)]
pub struct Args {
    /// Results page to load (HTML file path, or URL with --source-type web)
    pub source: String,

    /// Where the page comes from
    #[arg(short, long, value_enum, default_value_t = SourceArg::File)]
    pub source_type: SourceArg,

    /// URL the HTML file was served from (file source only)
    #[arg(short, long, default_value = "https://www.google.com/search?q=")]
    pub page_url: String,

    /// Comma-separated key chords to replay, e.g. "alt+j,alt+j,alt+enter"
    #[arg(short, long, value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Path to JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Simulated viewport height
    #[arg(long, default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Document offset of the first result
    #[arg(long, default_value_t = 180.0)]
    pub first_top: f64,

    /// Height of each result row
    #[arg(long, default_value_t = 120.0)]
    pub row_height: f64,

    /// Replay even if the page URL doesn't match the plugin's URL pattern
    #[arg(long)]
    pub force: bool,

    /// Print the shortcut table and exit
    #[arg(long)]
    pub list_shortcuts: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Local HTML file
    File,
    /// Live page loaded through WebDriver
    Web,
}
