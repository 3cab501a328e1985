use clap::Parser;
use spritetags::application::{list_rules, load_registries, Dispatcher};
use spritetags::cli::{format_reply, format_rule_list, Cli, Commands};
use spritetags::error::SpriteTagsError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for replies
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), SpriteTagsError> {
    // Registries are read-only once installed
    let registries = load_registries(cli.rules.as_deref())?.install()?;
    let dispatcher = Dispatcher::new(registries);

    let reply = match cli.command {
        Commands::Adjust(args) => dispatcher.adjust(&args.request)?,
        Commands::Default(args) => dispatcher.default_attributes(&args.request)?,
        Commands::Resolve(args) => dispatcher.resolve(&args.request)?,
        Commands::Rules => {
            println!("{}", format_rule_list(&list_rules(registries)).trim_end());
            return Ok(());
        }
    };

    println!("{}", format_reply(&reply));
    Ok(())
}
