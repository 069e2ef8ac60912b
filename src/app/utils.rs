use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Read the config file, environment variables with `env_prefix` take precedence
pub fn read_config<'a, T>(file_name: &str, env_prefix: Option<&str>) -> Result<T, ConfigError>
where
    T: Deserialize<'a>,
{
    let mut config_builder = Config::builder().add_source(File::new(file_name, FileFormat::Toml));

    if let Some(env_prefix) = env_prefix {
        // `PREFIX_SECTION__KEY`
        config_builder = config_builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        );
    }

    config_builder.build()?.try_deserialize()
}

/// Generate an id which sorts by creation time, `prefix_<uuid v7>`
pub fn generate_time_ordered_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    format!("{prefix}_{}", uuid.as_simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ordered_ids_carry_prefix() {
        let first = generate_time_ordered_id("conn");
        let second = generate_time_ordered_id("conn");

        assert!(first.starts_with("conn_"));
        assert_ne!(first, second);
    }

    #[test]
    fn reads_bundled_server_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/server.toml");
        let config = read_config::<crate::app::types::ServerConfig>(path, None).unwrap();

        let server = config.server.unwrap_or_default();
        assert_eq!(server.address(), "127.0.0.1:6969");
        assert_eq!(config.words.unwrap_or_default().path, "config/words.txt");
        assert!(config.game.unwrap_or_default().expire_empty_rooms);
    }

    #[test]
    fn environment_overrides_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/server.toml");
        std::env::set_var("HINTWORD_UTILS_TEST_GAME__EXPIRE_EMPTY_ROOMS", "false");
        std::env::set_var("HINTWORD_UTILS_TEST_WORDS__PATH", "/tmp/words.txt");

        let config =
            read_config::<crate::app::types::ServerConfig>(path, Some("HINTWORD_UTILS_TEST"))
                .unwrap();

        assert!(!config.game.unwrap_or_default().expire_empty_rooms);
        assert_eq!(config.words.unwrap_or_default().path, "/tmp/words.txt");
        // Untouched values still come from the file
        assert_eq!(config.server.unwrap_or_default().port, "6969");
    }
}
