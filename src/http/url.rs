//! URL assembly from endpoint templates.

use reqwest::Url;

use super::error::HttpError;

/// Query flag appended when related records should be embedded.
pub const INCLUDE_EXTRA: (&str, &str) = ("is_include_extra", "true");
/// Query flag appended when change history should be embedded.
pub const INCLUDE_HISTORY: (&str, &str) = ("is_include_history", "true");

/// Build a request URL.
///
/// Every `{param}` token in `template` is replaced by the matching entry of
/// `path_params`; the substituted segment is percent-encoded. Query pairs are
/// appended in order, followed by the extra/history flags when requested.
pub fn build_url(
    base_url: &str,
    template: &str,
    path_params: &[(String, String)],
    query_params: &[(String, String)],
    include_extra: bool,
    include_history: bool,
) -> Result<Url, HttpError> {
    let mut url = Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl(format!("'{}' cannot be a base", base_url)))?;
        segments.pop_if_empty();
        for raw in template.split('/').filter(|s| !s.is_empty()) {
            let segment = substitute(raw, path_params, template)?;
            segments.push(&segment);
        }
    }

    let mut pairs: Vec<(&str, &str)> = query_params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if include_extra {
        pairs.push(INCLUDE_EXTRA);
    }
    if include_history {
        pairs.push(INCLUDE_HISTORY);
    }
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (k, v) in pairs {
            query.append_pair(k, v);
        }
    }

    Ok(url)
}

fn substitute(
    segment: &str,
    path_params: &[(String, String)],
    template: &str,
) -> Result<String, HttpError> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + close];
        let value = path_params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| HttpError::MissingPathParam {
                param: name.to_string(),
                template: template.to_string(),
            })?;
        out.push_str(&rest[..open]);
        out.push_str(value);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn plain_template() {
        let url = build_url("http://host:8080", "/svc/court_cases", &[], &[], false, false).unwrap();
        assert_eq!(url.as_str(), "http://host:8080/svc/court_cases");
    }

    #[test]
    fn base_url_with_path_and_trailing_slash() {
        let url = build_url("http://host/api/", "/clients/client", &[], &[], false, false).unwrap();
        assert_eq!(url.as_str(), "http://host/api/clients/client");
    }

    #[test]
    fn path_params_are_substituted_and_encoded() {
        let url = build_url(
            "http://host",
            "/cases/{id}/notes/{note}",
            &[p("id", "42"), p("note", "a b")],
            &[],
            false,
            false,
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://host/cases/42/notes/a%20b");
    }

    #[test]
    fn missing_path_param_fails() {
        let err = build_url("http://host", "/cases/{id}", &[], &[], false, false).unwrap_err();
        assert!(matches!(err, HttpError::MissingPathParam { ref param, .. } if param == "id"));
    }

    #[test]
    fn query_and_flags_appended_in_order() {
        let url = build_url(
            "http://host",
            "/cases",
            &[],
            &[p("page", "2"), p("per_page", "25")],
            true,
            true,
        )
        .unwrap();
        assert_eq!(
            url.query(),
            Some("page=2&per_page=25&is_include_extra=true&is_include_history=true")
        );
    }

    #[test]
    fn no_query_means_no_question_mark() {
        let url = build_url("http://host", "/cases", &[], &[], false, false).unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            build_url("not a url", "/x", &[], &[], false, false),
            Err(HttpError::InvalidUrl(_))
        ));
    }
}
