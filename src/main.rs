use std::env;
use std::fs;
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the document path from command-line arguments ("-" reads stdin)
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .ok_or("Please provide a path to a recipe document, or - for stdin")?;

    let document = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    // Preview only: no lookups, no persistence, owner id 0
    let recipe = recipe_ingest::parse_document(&document, 0)?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
