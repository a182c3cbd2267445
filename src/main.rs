use std::{
    env,
    error::Error,
    fs,
    io::{self, Read},
    path::PathBuf,
    process,
    time::Instant,
};

use log::{debug, info};
use monkey_parser::{display_error, parse, Lexer};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let (source, file_name) = match args.len() {
        1 => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            (source, String::from("stdin"))
        }
        2 => {
            let path = PathBuf::from(&args[1]);
            let file_name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => args[1].clone(),
            };
            (fs::read_to_string(&path)?, file_name)
        }
        _ => {
            eprintln!("Usage: monkey-parse [script]");
            process::exit(64);
        }
    };

    debug!("Parsing {} ({} bytes)", file_name, source.len());

    let start = Instant::now();
    let (program, errors) = parse(Lexer::new(source.as_str(), Some(file_name)));

    info!("Parsed {} statement(s) in {:?}", program.len(), start.elapsed());

    if !errors.is_empty() {
        for error in &errors {
            display_error(error, &source);
        }
        process::exit(65);
    }

    println!("{}", program);

    Ok(())
}
