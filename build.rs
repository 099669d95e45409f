use std::fs;

const REQUIRED_KEYS: &[&str] = &["base_path", "content_dir", "static_dir", "output_dir", "template"];

fn main() {
    // The bundled site config is parsed at runtime by Config::compiled_default
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={config_path}");

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    match table.get("clean") {
        Some(toml::Value::Boolean(_)) => {}
        Some(other) => panic!("default_config.toml: `clean` must be a boolean, got {other}"),
        None => panic!("default_config.toml: missing `clean`"),
    }

    for key in REQUIRED_KEYS {
        match table.get(*key) {
            Some(toml::Value::String(_)) => {}
            Some(other) => panic!("default_config.toml: `{key}` must be a string, got {other}"),
            None => panic!("default_config.toml: missing `{key}`"),
        }
    }
}
