use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    pub in_memory: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service: Option<ServiceConfig>,
    pub store: Option<StoreConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: None,
            api_key: None,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("RESTYLE_API_URL").ok();
        let api_key = env::var("RESTYLE_API_KEY").ok();

        ServiceConfig { base_url, api_key }
    }

    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            in_memory: false,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let path = env::var("RESTYLE_PREFS_PATH").ok().map(PathBuf::from);

        StoreConfig {
            path,
            in_memory: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self.in_memory = false;
        self
    }

    pub fn in_memory() -> Self {
        StoreConfig {
            path: None,
            in_memory: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: None,
            store: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            service: Some(ServiceConfig::from_env()),
            store: Some(StoreConfig::from_env()),
        }
    }

    pub fn with_service(mut self, config: ServiceConfig) -> Self {
        self.service = Some(config);
        self
    }

    pub fn with_store(mut self, config: StoreConfig) -> Self {
        self.store = Some(config);
        self
    }
}
