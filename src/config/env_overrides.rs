use super::{Config, StoreBackend};

fn non_empty_var(primary: &str, fallback: Option<&str>) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| fallback.and_then(|name| std::env::var(name).ok()))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_var("MEETYOURMAKER_OPENAI_API_KEY", Some("OPENAI_API_KEY")) {
            self.completion.api_key = Some(key);
        }

        if let Some(model) = non_empty_var("MEETYOURMAKER_MODEL", None) {
            self.completion.model = model;
        }

        if let Some(backend) = non_empty_var("MEETYOURMAKER_STORE_BACKEND", None)
            && let Some(backend) = StoreBackend::parse(&backend)
        {
            self.store.backend = backend;
        }

        if let Some(project) = non_empty_var("MEETYOURMAKER_FIRESTORE_PROJECT", None) {
            self.store.project_id = Some(project);
        }

        if let Some(key) = non_empty_var("MEETYOURMAKER_FIRESTORE_API_KEY", None) {
            self.store.api_key = Some(key);
        }

        if let Some(host) = non_empty_var("MEETYOURMAKER_GATEWAY_HOST", Some("HOST")) {
            self.gateway.host = host;
        }

        if let Some(port_str) = non_empty_var("MEETYOURMAKER_GATEWAY_PORT", Some("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(level) = non_empty_var("MEETYOURMAKER_LOG", None) {
            self.logging.level = level;
        }
    }
}
