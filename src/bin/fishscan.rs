use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fishscan::config::{Config, RecognizerConfig};
use fishscan::downloader::YtDlpDownloader;
use fishscan::logging;
use fishscan::pipeline::Pipeline;
use fishscan::recognizer::CloudRecognizer;
use fishscan::search::YtDlpSearch;

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let api_key = match params.api_key {
        Some(key) => key,
        None => std::env::var("GOOGLE_API_KEY")
            .context("no API key: pass --api-key or set GOOGLE_API_KEY")?,
    };

    let config = Config {
        query: params.query,
        max_results: params.max_results,
        chunk_duration: Duration::from_secs(params.chunk_seconds),
        vocabulary: params.terms,
        output_dir: params.output_dir,
    };

    let recognizer = CloudRecognizer::new(RecognizerConfig::google(api_key, params.language));
    let pipeline = Pipeline::new(YtDlpSearch, YtDlpDownloader, recognizer, config);

    let records = pipeline.run()?;
    println!("{} video(s) reported", records.len());
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "fishscan")]
#[command(about = "Audit short-form videos for mentions of target terms")]
struct Params {
    /// Search query for video discovery.
    #[arg(short = 'q', long = "query")]
    pub query: String,

    /// Maximum number of videos to audit.
    #[arg(short = 'n', long = "max-results", default_value_t = 3)]
    pub max_results: usize,

    /// Terms to search for in the transcripts (vocabulary order is report
    /// order). Repeat the flag for multiple terms.
    #[arg(short = 't', long = "term", required = true)]
    pub terms: Vec<String>,

    /// Directory for transcripts and the CSV report.
    #[arg(short = 'o', long = "output-dir", default_value = "output")]
    pub output_dir: PathBuf,

    /// Recognition language code.
    #[arg(short = 'l', long = "language", default_value = "pt-BR")]
    pub language: String,

    /// Duration of each recognition chunk, in seconds.
    #[arg(long = "chunk-seconds", default_value_t = 30)]
    pub chunk_seconds: u64,

    /// Cloud Speech API key. Falls back to the GOOGLE_API_KEY environment
    /// variable.
    #[arg(long = "api-key")]
    pub api_key: Option<String>,
}
