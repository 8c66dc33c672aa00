use std::{rc::Rc, time::Duration};

use reqwest::Url;

use super::{HttpClient, NameResolver, ServiceError, SkyPosition};
use crate::constants::SESAME_URL;

/// [`NameResolver`] backed by the CDS Sesame service (Simbad, NED, VizieR).
///
/// The plain-text answer carries the ICRS J2000 position on a `%J` line:
///
/// ```text
/// %J 187.70593075 +12.39112331 = 12:30:49.42 +12:23:28.0
/// ```
///
/// An unknown name produces an answer without any `%J` line.
pub struct SesameResolver {
    http: Rc<dyn HttpClient>,
    url: String,
}

impl SesameResolver {
    pub fn new(http: Rc<dyn HttpClient>) -> Self {
        SesameResolver {
            http,
            url: SESAME_URL.to_string(),
        }
    }
}

impl NameResolver for SesameResolver {
    fn resolve_name(
        &self,
        name: &str,
        timeout: Duration,
    ) -> Result<Option<SkyPosition>, ServiceError> {
        // Sesame takes the bare name as the whole query string
        let mut url = Url::parse(&self.url).map_err(|e| ServiceError::InvalidUrl(e.to_string()))?;
        url.set_query(Some(name));

        let body = self.http.get_text(url.as_str(), &[], timeout)?;
        parse_sesame(&body)
    }
}

fn parse_sesame(body: &str) -> Result<Option<SkyPosition>, ServiceError> {
    let Some(line) = body.lines().find_map(|l| l.trim_start().strip_prefix("%J")) else {
        return Ok(None);
    };

    let mut fields = line.split_whitespace();
    let mut next = |what: &str| {
        fields
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| ServiceError::InvalidResponse(format!("bad {what} in %J{line}")))
    };

    let ra = next("right ascension")?;
    let dec = next("declination")?;
    Ok(Some(SkyPosition { ra, dec }))
}

#[cfg(test)]
mod sesame_test {
    use super::*;
    use crate::services::http::http_test::FakeHttpClient;

    const M87: &str = "# M87\t#Q23185367\n#=S=Simbad (via url):    1\n%@ 1234\n%I.0 M  87\n%C.0 AGN\n%J 187.70593075 +12.39112331 = 12:30:49.42 +12:23:28.0\n%I NAME Virgo A\n";

    #[test]
    fn test_resolve_name_reads_j_line() {
        let http = Rc::new(FakeHttpClient::answering(M87));
        let pos = SesameResolver::new(http)
            .resolve_name("M87", Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(pos.ra, 187.70593075);
        assert_eq!(pos.dec, 12.39112331);
    }

    #[test]
    fn test_resolve_name_nothing_found() {
        let http = Rc::new(FakeHttpClient::answering(
            "# NotAThing\t#Q1\n#! *** Nothing found *** \n",
        ));
        let pos = SesameResolver::new(http)
            .resolve_name("NotAThing", Duration::from_secs(5))
            .unwrap();
        assert_eq!(pos, None);
    }

    #[test]
    fn test_resolve_name_garbled_j_line() {
        assert!(parse_sesame("%J 187.7 north").is_err());
    }
}
