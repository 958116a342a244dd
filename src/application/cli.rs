use std::io;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::SurfaceName;
use crate::domain::services::HintCache;
use crate::domain::services::HintLedger;
use crate::infrastructure::generators::GeneratorManager;

fn print_completions<G: clap_complete::Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = std::path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn set_config_value(key_str: &str, value: &str) -> Result<()> {
    let key = match ConfigKey::iter().find(|e| return e.to_string() == key_str) {
        Some(key) => key,
        None => {
            bail!(format!(
                "Unknown config key '{key_str}'. Valid keys are: {}",
                ConfigKey::VARIANTS.join(", ")
            ));
        }
    };

    Config::persist_set(key, value).await?;
    println!("Set {key_str} = {value}");
    return Ok(());
}

async fn reset_stores() -> Result<()> {
    let data_dir = std::path::PathBuf::from(Config::get(ConfigKey::DataDir));

    HintLedger::load(&data_dir).await.reset().await;
    HintCache::load(
        &data_dir,
        Config::get_seconds_as_ms(ConfigKey::CacheTtl),
        Config::get_seconds_as_ms(ConfigKey::RateLimitInterval),
    )
    .await
    .reset()
    .await;

    println!("Cleared the hint ledger and hint cache. Settings are untouched.");
    return Ok(());
}

async fn probe_generator() -> Result<()> {
    let name = GeneratorName::parse(Config::get(ConfigKey::Generator)).unwrap();
    let generator = GeneratorManager::get(name)?;

    match generator.probe().await {
        Ok(status) => {
            println!("status: {}", status.status);
            println!(
                "provider: {}",
                status.provider.unwrap_or_else(|| return "unknown".to_string())
            );
            println!(
                "model: {}",
                status.model.unwrap_or_else(|| return "unknown".to_string())
            );
        }
        Err(err) => {
            println!(
                "The generation service at {} is not reachable: {err}",
                Config::get(ConfigKey::ServerUrl)
            );
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        )
        .subcommand(
            Command::new("set")
                .about("Persists a single configuration value, e.g. `config set allow-send-to-server true`.")
                .arg(clap::Arg::new("key").help("Config key to set.").required(true))
                .arg(clap::Arg::new("value").help("Value to persist.").required(true)),
        );
}

fn arg_allow_send_to_server() -> Arg {
    return Arg::new(ConfigKey::AllowSendToServer.to_string())
        .long(ConfigKey::AllowSendToServer.to_string())
        .env("HINTERLAND_ALLOW_SEND_TO_SERVER")
        .num_args(1)
        .help(format!(
            "Consent to send problem context, including your code snippet, to the generation server. [default: {}]",
            Config::default(ConfigKey::AllowSendToServer)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerUrl.to_string())
        .long(ConfigKey::ServerUrl.to_string())
        .env("HINTERLAND_SERVER_URL")
        .num_args(1)
        .help(format!(
            "Endpoint of the hint generation server. [default: {}]",
            Config::default(ConfigKey::ServerUrl)
        ))
        .global(true);
}

fn arg_generator() -> Arg {
    return Arg::new(ConfigKey::Generator.to_string())
        .short('g')
        .long(ConfigKey::Generator.to_string())
        .env("HINTERLAND_GENERATOR")
        .num_args(1)
        .help(format!(
            "The generator implementation used for remote hints. [default: {}]",
            Config::default(ConfigKey::Generator)
        ))
        .value_parser(PossibleValuesParser::new(GeneratorName::VARIANTS))
        .global(true);
}

fn arg_surface() -> Arg {
    return Arg::new(ConfigKey::Surface.to_string())
        .long(ConfigKey::Surface.to_string())
        .env("HINTERLAND_SURFACE")
        .num_args(1)
        .help(format!(
            "The presentation surface implementation. [default: {}]",
            Config::default(ConfigKey::Surface)
        ))
        .value_parser(PossibleValuesParser::new(SurfaceName::VARIANTS))
        .global(true);
}

fn arg_data_dir() -> Arg {
    return Arg::new(ConfigKey::DataDir.to_string())
        .long(ConfigKey::DataDir.to_string())
        .env("HINTERLAND_DATA_DIR")
        .num_args(1)
        .help("Directory holding the hint ledger and hint cache files.")
        .global(true);
}

fn arg_duration(key: ConfigKey, help: &str) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(format!(
            "HINTERLAND_{}",
            key.to_string().replace('-', "_").to_uppercase()
        ))
        .num_args(1)
        .help(format!("{help} [default: {}]", Config::default(key)))
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("hinterland")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("probe").about("Asks the generation service which provider and model it is configured with."))
        .subcommand(Command::new("reset").about("Clears the hint ledger and hint cache. Settings are untouched."))
        .arg(arg_allow_send_to_server())
        .arg(arg_server_url())
        .arg(arg_generator())
        .arg(arg_surface())
        .arg(arg_data_dir())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("HINTERLAND_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_duration(
            ConfigKey::GenerateTimeout,
            "Hard timeout for a generation request, in milliseconds.",
        ))
        .arg(arg_duration(
            ConfigKey::CollectTimeout,
            "How long to wait for the page to answer a context request, in milliseconds.",
        ))
        .arg(arg_duration(
            ConfigKey::HealthCheckTimeout,
            "Timeout for the generation service health check, in milliseconds.",
        ))
        .arg(arg_duration(
            ConfigKey::CacheTtl,
            "How long a generated hint stays fresh, in seconds.",
        ))
        .arg(arg_duration(
            ConfigKey::RateLimitInterval,
            "Minimum interval between generation requests for one problem, in seconds.",
        ))
        .arg(arg_duration(
            ConfigKey::IdleThreshold,
            "Inactivity span after which a session counts as stuck, in seconds.",
        ))
        .arg(arg_duration(
            ConfigKey::FailureWindow,
            "Sliding window for recent submission failures, in seconds.",
        ))
        .arg(arg_duration(
            ConfigKey::IdleTick,
            "Period of the idle sweep, in seconds.",
        ));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            Some(("set", set_matches)) => {
                Config::load(build(), vec![&matches, set_matches]).await?;
                let key = set_matches.get_one::<String>("key").unwrap();
                let value = set_matches.get_one::<String>("value").unwrap();
                set_config_value(key, value).await?;
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("probe", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            probe_generator().await?;
            return Ok(false);
        }
        Some(("reset", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            reset_stores().await?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
