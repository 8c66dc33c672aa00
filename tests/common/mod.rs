#![allow(dead_code)]

use std::{
    cell::RefCell,
    fs,
    rc::Rc,
    time::Duration,
};

use azely::{
    config::ConfigStore,
    engine::{EngineError, SkyEngine},
    env_state::AzelyEnv,
    location::Location,
    object::Object,
    services::{HttpClient, ServiceError},
    time::TimeSpec,
    Azely,
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use tempfile::TempDir;

pub const TOKYO_IPINFO: &str = r#"{"ip": "203.0.113.7", "city": "Tokyo", "region": "Tokyo", "country": "JP", "loc": "35.0,139.0", "timezone": "Asia/Tokyo"}"#;

pub const MITAKA_NOMINATIM: &str = r#"[{"display_name": "Mitaka, Tokyo, Japan", "lat": "35.6835", "lon": "139.5597"}]"#;

pub const M87_SESAME: &str = "# M87\n#=S=Simbad (via url):    1\n%J 187.70593075 +12.39112331 = 12:30:49.42 +12:23:28.0\n";

pub const MYTAG_CATALOG: &str = include_str!("../data/mytag.toml");

/// HTTP fake answering by URL prefix and recording every request.
#[derive(Default)]
pub struct ScriptedHttp {
    routes: Vec<(String, Result<String, ServiceErrorKind>)>,
    requests: RefCell<Vec<String>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ServiceErrorKind {
    Timeout,
    ServerError,
}

impl ScriptedHttp {
    pub fn answer(mut self, url_prefix: &str, body: &str) -> Self {
        self.routes.push((url_prefix.to_string(), Ok(body.to_string())));
        self
    }

    pub fn fail(mut self, url_prefix: &str, kind: ServiceErrorKind) -> Self {
        self.routes.push((url_prefix.to_string(), Err(kind)));
        self
    }

    /// Number of requests whose URL starts with `url_prefix`.
    pub fn count(&self, url_prefix: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|url| url.starts_with(url_prefix))
            .count()
    }

    pub fn total(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpClient for ScriptedHttp {
    fn get_text(
        &self,
        url: &str,
        _params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<String, ServiceError> {
        self.requests.borrow_mut().push(url.to_string());

        match self.routes.iter().find(|(prefix, _)| url.starts_with(prefix)) {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(ServiceErrorKind::Timeout))) => Err(ServiceError::Timeout(timeout)),
            Some((_, Err(ServiceErrorKind::ServerError))) | None => Err(ServiceError::Status {
                status: 503,
                url: url.to_string(),
            }),
        }
    }
}

/// One call received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCall {
    pub object: Object,
    pub site: Location,
    pub samples: usize,
    pub first: Option<DateTime<Utc>>,
    pub frame: String,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub calls: RefCell<Vec<EngineCall>>,
    pub fail_with: Option<String>,
}

impl SkyEngine for RecordingEngine {
    type Output = EngineCall;

    fn compute(
        &self,
        object: &Object,
        site: &Location,
        time: &TimeSpec,
        frame: &str,
    ) -> Result<Self::Output, EngineError> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone().into());
        }
        let call = EngineCall {
            object: object.clone(),
            site: site.clone(),
            samples: time.len(),
            first: time.instants().first().copied(),
            frame: frame.to_string(),
        };
        self.calls.borrow_mut().push(call.clone());
        Ok(call)
    }
}

/// Isolated azely directory holding the config, the caches and the catalogs.
pub struct Sandbox {
    _tmp: TempDir,
    pub dir: Utf8PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::write(dir.join("mytag.toml"), MYTAG_CATALOG).unwrap();
        Sandbox { _tmp: tmp, dir }
    }

    /// Write `config.toml`, catalogs always searched in the sandbox only.
    pub fn with_config(self, extra: &str) -> Self {
        let text = format!("[catalog]\ndirs = [{:?}]\n\n{extra}", self.dir.as_str());
        fs::write(self.dir.join("config.toml"), text).unwrap();
        self
    }

    pub fn path(&self) -> &Utf8Path {
        &self.dir
    }

    /// A fresh [`Azely`] over this sandbox, as a new process would see it.
    pub fn azely(&self, http: Rc<ScriptedHttp>) -> Azely {
        let config = ConfigStore::from_dir(&self.dir).unwrap();
        Azely::with_env(AzelyEnv::with_http(http), config).unwrap()
    }
}
