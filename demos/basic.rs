use cot_config::{config_schema, field, Config, Inputs, Table};

config_schema! {
    /// Settings for a small web service.
    pub struct AppConfig {
        pub name: String = field(),
        pub debug: bool = field().with_default(false),
        pub port: u16 = field().with_default(8080),
        pub allowed_hosts: Vec<String> = field().with_default_factory(|| vec!["localhost".to_string()]),
    }
}

const DEFAULTS: &str = r#"
name = "demo"
port = 3000
"#;

const DEV: &str = r#"
debug = true
allowed_hosts = ["localhost", "dev.internal"]
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let defaults: Table = toml::from_str(DEFAULTS)?;
    let dev: Table = toml::from_str(DEV)?;

    let config: AppConfig = Inputs::builder()
        .with_source("defaults", defaults.clone())
        .with_source("dev", dev)
        .build()?;

    println!("{config}");
    println!("App: {} (debug={}) on port {}", config.name, config.debug, config.port);

    let plain = AppConfig::from_data([defaults])?;
    println!("without overrides: {plain}");
    println!("equal: {}", plain == config);

    Ok(())
}
