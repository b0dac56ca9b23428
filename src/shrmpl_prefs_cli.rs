use clap::{Arg, Command};
use tracing::{debug, info};

use shrmpl_prefs::config::{load_config, parse_log_level, CliConfig};
use shrmpl_prefs::{Platform, PreferencesMap};

// Load failures print to stderr and exit(1); everything else propagates.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("shrmpl-prefs-cli")
        .about("Load a key=value preferences file and print one of its views")
        .arg(
            Arg::new("file")
                .help("Path to preferences file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to CLI config file (LOG_LEVEL, INDENT, PLATFORM)"),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .help("Platform used for overrides: linux, windows, macos or other"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Prefix for every rendered line"),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .value_parser(["all", "top", "first", "subtree"])
                .default_value("all")
                .help("Which view of the preferences to print"),
        )
        .arg(
            Arg::new("parent")
                .long("parent")
                .required_if_eq("view", "subtree")
                .help("Parent key for --view subtree"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("DEBUG, INFO, WARN or ERROR"),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = parse_log_level(level)?;
    }
    if let Some(indent) = matches.get_one::<String>("indent") {
        config.indent = indent.clone();
    }
    if let Some(platform) = matches.get_one::<String>("platform") {
        config.platform = Some(platform.parse()?);
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let platform = config.platform.unwrap_or_else(Platform::current);
    let file = matches.get_one::<String>("file").unwrap(); // required by clap
    debug!("Resolving overrides for {}", platform);

    let prefs = match PreferencesMap::from_path(file, platform) {
        Ok(prefs) => prefs,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} preferences from {}", prefs.len(), file);

    let indent = config.indent.as_str();
    match matches.get_one::<String>("view").map(String::as_str) {
        Some("top") => print!("{}", prefs.top_level_map().render(indent)),
        Some("first") => {
            for (parent, group) in prefs.first_level_map() {
                println!("{}{}", indent, parent);
                print!("{}", group.render_block(&format!("{}  ", indent)));
            }
        }
        Some("subtree") => {
            let parent = matches.get_one::<String>("parent").unwrap(); // required_if_eq
            print!("{}", prefs.sub_tree(parent).render(indent));
        }
        _ => print!("{}", prefs.render(indent)),
    }

    Ok(())
}
