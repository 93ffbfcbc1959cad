use std::path::PathBuf;
use std::time::Instant;

use narration_markup::{markup::MarkupParser, write_segments_json};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "config.json".to_string()));
    let spell_pause: f64 = args.next().map(|s| s.parse::<f64>()).transpose()?.unwrap_or(0.1);

    let parser = MarkupParser::from_config_file(&config_path, spell_pause);

    let markup = "[happy,excited]Welcome to our video presentation![/][pause:1.5] \
                  Artificial intelligence, or [spell]AI[/], refers to computer systems \
                  that can perform tasks typically requiring human intelligence. \
                  [happy]There are three main types of [spell]AI[/]:[/][pause:0.5]";

    let start = Instant::now();
    let outcome = parser.parse(markup);
    println!(
        "Parsed {} segments in {:.2?}",
        outcome.segments.len(),
        start.elapsed()
    );

    for diagnostic in &outcome.diagnostics {
        println!("warning: {diagnostic}");
    }

    for segment in &outcome.segments {
        println!(
            "{:<40} rate={:.3} pitch={:.3} volume={:.3} pause={:.2}/{:.2}",
            format!("{:?}", segment.text),
            segment.rate,
            segment.pitch,
            segment.volume,
            segment.pause_before,
            segment.pause_after
        );
    }

    write_segments_json(&outcome.segments, &PathBuf::from("segments.json"))?;
    println!("Saved to segments.json");
    Ok(())
}
