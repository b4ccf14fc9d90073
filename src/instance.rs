use std::fmt;

use url::Url;

static PRODUCTION_URL: &str = "https://zenodo.org";
static SANDBOX_URL: &str = "https://sandbox.zenodo.org";

/// Zenodo runs two hosts with an identical API surface
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZenodoInstance {
    Production,
    Sandbox,
}

impl ZenodoInstance {
    pub fn from_sandbox_flag(sandbox: bool) -> ZenodoInstance {
        match sandbox {
            true => ZenodoInstance::Sandbox,
            false => ZenodoInstance::Production,
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            ZenodoInstance::Production => PRODUCTION_URL,
            ZenodoInstance::Sandbox => SANDBOX_URL,
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.host())
    }
}

impl fmt::Display for ZenodoInstance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZenodoInstance::Production => write!(f, "production"),
            ZenodoInstance::Sandbox => write!(f, "sandbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_flag_selects_sandbox_host() {
        let instance = ZenodoInstance::from_sandbox_flag(true);
        assert_eq!(instance, ZenodoInstance::Sandbox);
        assert_eq!(instance.base_url().unwrap().as_str(), "https://sandbox.zenodo.org/");
    }

    #[test]
    fn production_is_the_default_host() {
        let instance = ZenodoInstance::from_sandbox_flag(false);
        assert_eq!(instance.base_url().unwrap().host_str(), Some("zenodo.org"));
        assert_eq!(instance.to_string(), "production");
    }
}
