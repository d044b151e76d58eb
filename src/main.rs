use definition_finder::FileParser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: definition-finder <file>");
        std::process::exit(2);
    };

    match FileParser::from_file(&path) {
        Ok(parser) => match serde_json::to_string_pretty(parser.scope()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{path}: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    }
}
