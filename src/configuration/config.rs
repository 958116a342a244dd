#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AllowSendToServer,
    CacheTtl,
    CollectTimeout,
    ConfigFile,
    DataDir,
    FailureWindow,
    GenerateTimeout,
    Generator,
    HealthCheckTimeout,
    IdleThreshold,
    IdleTick,
    RateLimitInterval,
    ServerUrl,
    Surface,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    /// Millisecond view of the duration-flavoured keys that are stored in
    /// seconds.
    pub fn get_seconds_as_ms(key: ConfigKey) -> i64 {
        return Config::get(key).parse::<i64>().unwrap_or(0) * 1000;
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::cache_dir().unwrap().join("hinterland/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(std::env::var("HOME").unwrap())
            .join(".config/hinterland/config.toml");

        let data_dir = dirs::data_dir().unwrap().join("hinterland");

        let res = match key {
            ConfigKey::AllowSendToServer => "false",
            ConfigKey::CacheTtl => "300",
            ConfigKey::CollectTimeout => "700",
            ConfigKey::FailureWindow => "300",
            ConfigKey::GenerateTimeout => "9000",
            ConfigKey::Generator => "remote",
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::IdleThreshold => "180",
            ConfigKey::IdleTick => "45",
            ConfigKey::RateLimitInterval => "30",
            ConfigKey::ServerUrl => "http://localhost:3000/hint",
            ConfigKey::Surface => "stdio",

            // Special
            ConfigKey::ConfigFile => config_path.to_str().unwrap(),
            ConfigKey::DataDir => data_dir.to_str().unwrap(),
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Some(arg_config_file) =
                matches.get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long().unwrap() == key.to_string())
                    {
                        if !arg.get_possible_values().is_empty() {
                            possible_values = arg
                                .get_possible_values()
                                .iter()
                                .map(|e| return e.get_name().to_string())
                                .collect::<Vec<String>>();
                        }
                    }

                    if let Some(val_bool) = val.as_bool() {
                        Config::set(key, &val_bool.to_string());
                    } else if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            allow_send_to_server = Config::get(ConfigKey::AllowSendToServer),
            server_url = Config::get(ConfigKey::ServerUrl),
            generator = Config::get(ConfigKey::Generator),
            surface = Config::get(ConfigKey::Surface),
            data_dir = Config::get(ConfigKey::DataDir),
            "config"
        );

        return Ok(());
    }

    /// Applies an explicit user mutation and rewrites the config file so it
    /// survives restarts. Only ever driven by user action, never by the
    /// request path.
    pub async fn persist_set(key: ConfigKey, value: &str) -> Result<()> {
        Config::set(key, value);

        let config_path = path::PathBuf::from(Config::get(ConfigKey::ConfigFile));

        let mut doc = toml_edit::Document::new();
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            doc = toml_str.parse::<toml_edit::Document>()?;
        } else if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        if value == "true" || value == "false" {
            doc[&key.to_string()] = toml_edit::value(value == "true");
        } else if let Ok(val_int) = value.parse::<i64>() {
            doc[&key.to_string()] = toml_edit::value(val_int);
        } else {
            doc[&key.to_string()] = toml_edit::value(value);
        }

        fs::write(&config_path, doc.to_string()).await?;
        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long().unwrap() == key.to_string())
                    .unwrap();

                let mut description = arg.get_help().unwrap().to_string();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val == "true" || val == "false" || val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
