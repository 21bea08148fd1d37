use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use toml_edit::{value, DocumentMut};

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, bool);

macro_rules! gen_config {
    (
        $( $(#[$doc:meta])* $name:ident: $type:ty = $default:expr ),* $(,)?
    ) => {
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
        pub struct PluginConfig {
            $(
                $(#[$doc])*
                pub $name: $type,
            )*
        }

        impl Default for PluginConfig {
            fn default() -> PluginConfig {
                PluginConfig {
                    $( $name: $default, )*
                }
            }
        }

        impl PluginConfig {
            /// Reads `config_file`, writing back any keys that were missing with their defaults.
            pub fn load(config_file: impl AsRef<Path>) -> Result<PluginConfig> {
                let config_file = config_file.as_ref();
                let str = match fs::read_to_string(config_file) {
                    Ok(str) => str,
                    Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
                    Err(err) => {
                        return Err(err)
                            .with_context(|| format!("failed to read {}", config_file.display()))
                    }
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("failed to parse {}", config_file.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    fs::write(config_file, &patched)
                        .with_context(|| format!("failed to write {}", config_file.display()))?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("invalid settings in {}", config_file.display()))
            }
        }
    };
}

gen_config! {
    /// YAML file holding the `disabled-users` list.
    data_file: String = "plugins/ColoredChatNames/config.yml".to_string(),
    /// Leave messages alone when the sender already used formatting codes.
    skip_preformatted: bool = true,
    /// Exact first message that gets a player removed. Empty disables the filter.
    advertisement_signature: String = String::new(),
    advertisement_kick_message: String = "Advertising is not allowed on this server.".to_string(),
    chat_format: String = "<{username}> {message}".to_string(),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config, PluginConfig::default());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("skip_preformatted = true"));
        assert!(written.contains("chat_format = \"<{username}> {message}\""));
    }

    #[test]
    fn existing_values_are_kept_and_missing_keys_added() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        fs::write(
            &path,
            "# tuned by the admin\nadvertisement_signature = \"join my server\"\nskip_preformatted = false\n",
        )
        .unwrap();

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config.advertisement_signature, "join my server");
        assert!(!config.skip_preformatted);
        assert_eq!(config.data_file, PluginConfig::default().data_file);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# tuned by the admin"));
        assert!(written.contains("data_file"));
    }

    #[test]
    fn wrong_types_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        fs::write(&path, "skip_preformatted = \"yes\"\n").unwrap();

        assert!(PluginConfig::load(&path).is_err());
    }
}
