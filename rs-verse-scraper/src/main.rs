use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use reqwest::blocking::Client;

use rs_verse_core::io::write_corpus;

mod error;
mod extract;

use error::ScrapeError;

const POEMS_URL: &str = "http://www.poesie.webnet.fr/lesgrandsclassiques/poemes/charles_baudelaire/";
const INDEX_PAGE: &str = "charles_baudelaire.html";

/// Collects a poem corpus and writes it to disk.
#[derive(Parser)]
#[command(name = "rs-verse-scraper", version, about = "Downloads a poem corpus")]
struct Args {
    /// Base URL of the poem pages; the index page is resolved against it.
    #[arg(short, long, default_value = POEMS_URL)]
    url: String,

    /// File receiving the corpus.
    #[arg(short, long, default_value = "data/baudelaire.txt")]
    output: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

/// Sends a GET request and returns the body of a successful response.
fn fetch(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

/// Crawls the index page then every poem it lists.
///
/// Poems are joined in index order, each preceded by a space.
fn scrape(client: &Client, base_url: &str) -> Result<String, ScrapeError> {
    let base_url = if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{base_url}/")
    };

    let index = fetch(client, &format!("{base_url}{INDEX_PAGE}"))?;
    let links = extract::poem_links(&index)?;
    info!("Found {} poems", links.len());

    let mut corpus = String::new();
    for link in links {
        let poem = fetch(client, &format!("{base_url}{link}"))?;
        match extract::poem_title(&poem) {
            Some(title) => info!("Crawling {title}..."),
            None => warn!("Crawling {link}: page has no title"),
        }
        corpus.push(' ');
        corpus.push_str(&extract::poem_content(&poem)?);
    }

    Ok(corpus)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let corpus = scrape(&client, &args.url)?;
    write_corpus(&args.output, &corpus)?;
    info!("Corpus written to {} ({} bytes)", args.output, corpus.len());

    Ok(())
}
