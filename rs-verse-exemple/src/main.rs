use clap::Parser;
use log::info;
use rs_verse_core::Generator;

/// Prints poems generated from a corpus file.
#[derive(Parser)]
#[command(name = "rs-verse-exemple", version, about = "Generates poems from a corpus file")]
struct Args {
    /// Corpus file to learn from.
    #[arg(short, long, default_value = "data/baudelaire.txt")]
    corpus: String,

    /// Number of tokens per text, start token and punctuation included.
    #[arg(short, long, default_value_t = 50)]
    length: usize,

    /// First token of every text, displayed as given.
    #[arg(short, long, default_value = "Je")]
    start: String,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of texts to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Build the chain from the corpus file
    let app = Generator::new(&args.corpus)?;
    info!("{} predecessors learned from {}", app.model().len(), args.corpus);

    // Create a generation input with default values, then apply the arguments
    let mut input = app.make_generation_input();
    input.set_length(args.length)?;
    input.set_start_token(&args.start)?;

    // With a seed, each text gets its own derived seed so that they differ
    // while the whole run stays reproducible
    for i in 0..args.count {
        input.seed = args.seed.map(|seed| seed.wrapping_add(i as u64));
        println!("{}", app.generate(&input)?);
        if i + 1 < args.count {
            println!();
        }
    }

    Ok(())
}
