//! Grows, prunes, and evaluates an ID3 tree on a tab-delimited file.
//!
//! ```text
//! minitree <data-file> [dot-file]
//! ```
use colored::Colorize;

use minitree::prelude::*;

use std::env;
use std::process;


const DEFAULT_DOT_FILE: &str = "tree.dot";


fn main() {
    let args = env::args().collect::<Vec<_>>();
    if args.len() < 2 || args.len() > 3 {
        let program = args.first().map(String::as_str).unwrap_or("minitree");
        eprintln!("usage: {program} <data-file> [dot-file]");
        process::exit(2);
    }

    let data_file = &args[1];
    let dot_file = args.get(2).map(String::as_str).unwrap_or(DEFAULT_DOT_FILE);

    if let Err(e) = run(data_file, dot_file) {
        eprintln!("{} {e}", "error:".bold().red());
        process::exit(1);
    }
}


fn run(data_file: &str, dot_file: &str) -> Result<()> {
    let dataset = DatasetReader::default()
        .file(data_file)
        .read()?;
    let (n_rows, n_attributes) = dataset.shape();
    println!(
        "{} {n_rows} rows, {n_attributes} attributes",
        "[DATA]".bold().green(),
    );

    // Accuracy is estimated on unpruned trees.
    let id3 = Id3Builder::new().build()?;
    let report = LeaveOneOut::new(&dataset, &id3).run()?;

    let mut tree = id3.fit(&dataset)?;
    let collapsed = Pruner::new().prune(&mut tree)?;

    println!("{tree}");
    println!(
        "{} collapsed {collapsed} splits",
        "[PRUNE]".bold().green(),
    );
    println!("{} {report}", "[LOOCV]".bold().green());

    let caption = format!("LOOCV accuracy: {report}");
    tree.to_dot_file(dot_file, Some(&caption))?;
    println!("{} wrote {dot_file}", "[DOT]".bold().green());

    Ok(())
}
