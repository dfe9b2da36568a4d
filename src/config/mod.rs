use anyhow::{anyhow, Result};
use picnic_core::{
    entities::{Distance, Url},
    usecases::MaxDistance,
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "picnicdb.toml";

const ENV_NAME_BACKEND_URL: &str = "PICNIC_BACKEND_URL";
const ENV_NAME_BACKEND_ANON_KEY: &str = "PICNIC_BACKEND_ANON_KEY";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_DEVICE_ID: &str = "PICNIC_DEVICE_ID";

pub struct Config {
    /// `None` if no backend is configured
    pub backend: Option<Backend>,
    pub identity: Identity,
    pub search: Search,
    pub geocoding: Geocoding,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        apply_env_overrides(&mut raw_config, |name| env::var(name).ok());
        Self::try_from(raw_config)
    }
}

fn apply_env_overrides<F>(cfg: &mut raw::Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name| var(name).filter(|v: &String| !v.trim().is_empty());
    if let Some(url) = var(ENV_NAME_BACKEND_URL) {
        cfg.backend.get_or_insert_with(Default::default).url = Some(url);
    }
    if let Some(key) = var(ENV_NAME_BACKEND_ANON_KEY) {
        cfg.backend.get_or_insert_with(Default::default).anon_key = Some(key);
    }
    if let Some(api_key) = var(ENV_NAME_OPENCAGE_API_KEY) {
        cfg.geocoding = Some(raw::Geocoding {
            gateway: Some(raw::GeocodingGateway::Opencage),
        });
        cfg.gateway.get_or_insert_with(Default::default).opencage = Some(raw::OpenCage { api_key });
    }
    if let Some(device_id) = var(ENV_NAME_DEVICE_ID) {
        cfg.identity.get_or_insert_with(Default::default).device_id = Some(device_id);
    }
}

pub struct Backend {
    pub url: Url,
    pub anon_key: String,
    pub photo_bucket: String,
    pub request_timeout: Duration,
}

pub struct Identity {
    /// File system directory for locally cached values
    pub data_dir: PathBuf,
    pub device_id: Option<String>,
}

pub struct Search {
    pub default_max_distance: MaxDistance,
    pub nearby_radius: Distance,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            backend,
            identity,
            search,
            geocoding,
            gateway,
        } = from;

        let raw::Backend {
            url,
            anon_key,
            photo_bucket,
            request_timeout,
        } = backend.unwrap_or_default();

        let backend = match (url, anon_key) {
            (Some(url), Some(anon_key)) => {
                let url = url
                    .parse()
                    .map_err(|err| anyhow!("Invalid backend URL '{url}': {err}"))?;
                Some(Backend {
                    url,
                    anon_key,
                    photo_bucket: photo_bucket.unwrap_or_else(|| "photos".to_owned()),
                    request_timeout: request_timeout.unwrap_or(Duration::from_secs(30)),
                })
            }
            (None, None) => None,
            (Some(_), None) => return Err(anyhow!("Missing anon key of the backend")),
            (None, Some(_)) => return Err(anyhow!("Missing URL of the backend")),
        };

        let raw::Identity {
            data_dir,
            device_id,
        } = identity.unwrap_or_default();
        let identity = Identity {
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from(".picnicdb")),
            device_id,
        };

        let raw::Search {
            default_max_distance_km,
            nearby_radius_km,
        } = search.unwrap_or_default();
        let default_max_distance = match default_max_distance_km {
            Some(km) if km < 0.0 => MaxDistance::Unlimited,
            Some(km) if km.is_finite() => MaxDistance::from_km(km),
            Some(km) => return Err(anyhow!("Invalid default max. distance: {km}")),
            None => MaxDistance::default(),
        };
        let nearby_radius = match nearby_radius_km {
            Some(km) if km.is_finite() && km > 0.0 => Distance::from_km(km),
            Some(km) => return Err(anyhow!("Invalid nearby radius: {km}")),
            None => picnic_core::usecases::DEFAULT_NEARBY_RADIUS,
        };
        let search = Search {
            default_max_distance,
            nearby_radius,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let gateway = gateway.ok_or_else(|| anyhow!("Missing gateway configuration"))?;
                let gw = match gw_name {
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key } = gateway.opencage.ok_or_else(|| {
                            anyhow!("Missing 'opencage' gateway configuration")
                        })?;
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        Ok(Self {
            backend,
            identity,
            search,
            geocoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = Some(Path::new("does-not-exist.toml"));
        let cfg: Config = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!(cfg.search.default_max_distance, MaxDistance::from_km(5.0));
        assert_eq!(cfg.identity.data_dir, PathBuf::from(".picnicdb"));
    }

    #[test]
    fn backend_is_optional() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert!(cfg.backend.is_none());
        assert!(cfg.geocoding.gateway.is_none());
    }

    #[test]
    fn backend_from_env() {
        let mut raw = raw::Config::default();
        apply_env_overrides(
            &mut raw,
            env(&[
                (ENV_NAME_BACKEND_URL, "https://abc.supabase.co"),
                (ENV_NAME_BACKEND_ANON_KEY, "anon"),
                (ENV_NAME_OPENCAGE_API_KEY, "oc-key"),
                (ENV_NAME_DEVICE_ID, "phone"),
            ]),
        );
        let cfg = Config::try_from(raw).unwrap();
        let backend = cfg.backend.unwrap();
        assert_eq!(backend.url.as_str(), "https://abc.supabase.co/");
        assert_eq!(backend.anon_key, "anon");
        assert_eq!(backend.photo_bucket, "photos");
        assert_eq!(backend.request_timeout, Duration::from_secs(30));
        assert!(matches!(
            cfg.geocoding.gateway,
            Some(GeocodingGateway::OpenCage { ref api_key }) if api_key == "oc-key"
        ));
        assert_eq!(cfg.identity.device_id.as_deref(), Some("phone"));
    }

    #[test]
    fn incomplete_backend() {
        let mut raw = raw::Config::default();
        apply_env_overrides(&mut raw, env(&[(ENV_NAME_BACKEND_URL, "https://abc.supabase.co")]));
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut raw = raw::Config::default();
        apply_env_overrides(&mut raw, env(&[(ENV_NAME_BACKEND_URL, "  ")]));
        assert!(Config::try_from(raw).unwrap().backend.is_none());
    }

    #[test]
    fn unlimited_default_distance() {
        let cfg: raw::Config = toml::from_str(
            r#"
            [search]
            default-max-distance-km = -1.0
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(cfg).unwrap();
        assert_eq!(cfg.search.default_max_distance, MaxDistance::Unlimited);
        assert_eq!(cfg.search.nearby_radius, Distance::from_km(5.0));
    }

    #[test]
    fn load_full_example() {
        let cfg = Config::try_load_from_file_or_default(Some(
            "src/config/picnicdb.full-example.toml",
        ))
        .unwrap();
        assert!(cfg.backend.is_some());
        assert_eq!(cfg.search.default_max_distance, MaxDistance::from_km(10.0));
        assert_eq!(cfg.identity.device_id.as_deref(), Some("my-phone"));
    }
}
