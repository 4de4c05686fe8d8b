//! Client-side routes of the console.

use url::form_urlencoded;

use crate::api::LOGIN_PATH;

pub const DATASET_ID_PARAM: &str = "dataset-id";
pub const FROM_PARAM: &str = "from";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    DataSources,
    Datasets,
    Dataset { dataset_id: Option<String> },
    Destinations,
    Settings,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Dashboard => "/dashboard",
            Route::DataSources => "/data-sources/home",
            Route::Datasets => "/datasets/home",
            Route::Dataset { .. } => "/dataset/home",
            Route::Destinations => "/destinations/home",
            Route::Settings => "/settings/home",
        }
    }

    /// Path plus query string, ready for `history.pushState`.
    pub fn href(&self) -> String {
        match self {
            Route::Dataset {
                dataset_id: Some(id),
            } => format!("{}?{}", self.path(), encode_pair(DATASET_ID_PARAM, id)),
            _ => self.path().to_string(),
        }
    }

    /// Resolves a location. Unknown paths land on the dashboard.
    pub fn from_location(path: &str, search: &str) -> Route {
        match path.trim_end_matches('/') {
            LOGIN_PATH => Route::Login,
            "/data-sources/home" => Route::DataSources,
            "/datasets/home" => Route::Datasets,
            "/dataset/home" => Route::Dataset {
                dataset_id: query_param(search, DATASET_ID_PARAM),
            },
            "/destinations/home" => Route::Destinations,
            "/settings/home" => Route::Settings,
            _ => Route::Dashboard,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn requires_superuser(&self) -> bool {
        matches!(self, Route::Settings)
    }

    /// Label in the navigation bar.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::DataSources => "Data Sources",
            Route::Datasets | Route::Dataset { .. } => "Datasets",
            Route::Destinations => "Destinations",
            Route::Settings => "Settings",
        }
    }
}

fn encode_pair(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

/// Login route that remembers where the user was heading. `from` is a path
/// with its query string and travels as a single encoded parameter.
pub fn login_href(from: &str) -> String {
    let path = from.split_once('?').map_or(from, |(path, _)| path);
    if path.is_empty() || path == LOGIN_PATH {
        return LOGIN_PATH.to_string();
    }
    format!("{LOGIN_PATH}?{}", encode_pair(FROM_PARAM, from))
}

/// Reads and decodes one parameter of a `?a=b&c=d` query string.
pub fn query_param(search: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataset_id() {
        assert_eq!(
            Route::from_location("/dataset/home", "?dataset-id=abc&tab=expectations"),
            Route::Dataset {
                dataset_id: Some("abc".into())
            }
        );
        assert_eq!(
            Route::Dataset {
                dataset_id: Some("abc".into())
            }
            .href(),
            "/dataset/home?dataset-id=abc"
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_dashboard() {
        assert_eq!(Route::from_location("/nope", ""), Route::Dashboard);
        assert_eq!(Route::from_location("/settings/home/", ""), Route::Settings);
    }

    #[test]
    fn login_href_keeps_origin() {
        assert_eq!(login_href("/datasets/home"), "/login?from=%2Fdatasets%2Fhome");
        assert_eq!(login_href("/login"), "/login");
        assert_eq!(login_href("/login?from=%2Fdashboard"), "/login");
    }

    #[test]
    fn origin_with_query_survives_the_login_round_trip() {
        let origin = "/dataset/home?dataset-id=a&tab=x";
        let href = login_href(origin);
        let (path, search) = href.split_once('?').unwrap();
        assert_eq!(path, "/login");
        assert_eq!(query_param(search, FROM_PARAM).as_deref(), Some(origin));
        assert_eq!(query_param(search, "tab"), None);

        let (path, search) = origin.split_once('?').unwrap();
        assert_eq!(
            Route::from_location(path, search),
            Route::Dataset {
                dataset_id: Some("a".into())
            }
        );
    }

    #[test]
    fn query_values_are_decoded() {
        assert_eq!(
            query_param("?from=%2Fsettings%2Fhome&x=1", FROM_PARAM).as_deref(),
            Some("/settings/home")
        );
        assert_eq!(query_param("?code=a+b", "code").as_deref(), Some("a b"));
        assert_eq!(query_param("?code=", "code"), None);
    }

    #[test]
    fn dataset_href_encodes_the_id() {
        let route = Route::Dataset {
            dataset_id: Some("a&b".into()),
        };
        assert_eq!(route.href(), "/dataset/home?dataset-id=a%26b");
        let href = route.href();
        let (path, search) = href.split_once('?').unwrap();
        assert_eq!(Route::from_location(path, search), route);
    }
}
