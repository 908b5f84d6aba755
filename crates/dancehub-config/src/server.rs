use crate::env::{parse_or, process_env, string_or};

/// Listen address of the gateway (`SERVER_HOST`, `SERVER_PORT`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: string_or(&lookup, "SERVER_HOST", "0.0.0.0"),
            port: parse_or(&lookup, "SERVER_PORT", 3000),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::from_lookup(|k| (k == "SERVER_PORT").then(|| "8080".into()));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
