use meetyourmaker::config::{Config, StoreBackend};

fn presence(value: Option<&str>) -> &'static str {
    if value.is_some_and(|v| !v.trim().is_empty()) {
        "set"
    } else {
        "not set"
    }
}

pub fn render_status(config: &Config) -> String {
    let mut lines = vec![
        "◆ meetyourmaker status".to_string(),
        String::new(),
        format!("  Version      {}", env!("CARGO_PKG_VERSION")),
        format!("  Config       {}", config.config_path.display()),
        format!("  Persona      {}", config.persona_name),
        String::new(),
        format!("  Model        {}", config.completion.model),
        format!("  Endpoint     {}", config.completion.base_url),
        format!(
            "  API key      {}",
            presence(config.completion.api_key.as_deref())
        ),
        format!(
            "  Timeout      {}",
            if config.completion.timeout_secs == 0 {
                "none".to_string()
            } else {
                format!("{}s", config.completion.timeout_secs)
            }
        ),
        String::new(),
        format!("  Store        {}", config.store.backend),
    ];

    if config.store.backend == StoreBackend::Firestore {
        lines.push(format!(
            "    project    {}",
            config.store.project_id.as_deref().unwrap_or("-")
        ));
        lines.push(format!("    database   {}", config.store.database));
        lines.push(format!(
            "    API key    {}",
            presence(config.store.api_key.as_deref())
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  Gateway      {}:{}",
        config.gateway.host, config.gateway.port
    ));
    lines.push(format!("  Log level    {}", config.logging.max_level()));
    lines.join("\n")
}
