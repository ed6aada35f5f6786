use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::domain::entities::view_state::ViewState;
use crate::domain::error::ViewerError;

pub const STATE_PARAM: &str = "state";

/// JSON, then URL-safe base64 without padding. This is a transport encoding, not a secret.
pub fn encode(state: &ViewState) -> String {
    // ViewState only holds strings, maps and sets, which always serialize.
    let json = serde_json::to_vec(state).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Accepts URL-safe or standard base64, padded or not.
pub fn decode(token: &str) -> Result<ViewState, ViewerError> {
    let normalized: String = token
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|err| ViewerError::StateDecode(format!("invalid base64: {err}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ViewerError::StateDecode(format!("invalid state json: {err}")))
}

/// `base_url` with its `state` parameter set to the encoded view state.
pub fn share_link(base_url: &str, state: &ViewState) -> String {
    let (path, query) = match base_url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (base_url, ""),
    };
    let mut params: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(STATE_PARAM))
        .map(str::to_string)
        .collect();
    params.push(format!("{STATE_PARAM}={}", encode(state)));
    format!("{path}?{}", params.join("&"))
}

/// Token carried by a shared link, or `input` itself when it is a bare token.
pub fn token_from_link(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let Some((_, query)) = input.split_once('?') else {
        return Some(input.to_string());
    };
    let query = query.split('#').next().unwrap_or("");
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == STATE_PARAM)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

pub fn state_from_link(input: &str) -> Result<ViewState, ViewerError> {
    let token = token_from_link(input)
        .ok_or_else(|| ViewerError::StateDecode("link has no state parameter".to_string()))?;
    decode(&token)
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;

    use super::*;
    use crate::domain::entities::dataset::{SortDirection, SortState};
    use crate::domain::entities::filter::{FilterCondition, FilterPredicate, FilterSet};
    use crate::domain::entities::view_state::ChartAxes;

    fn sample_state() -> ViewState {
        ViewState {
            filters: FilterSet::new().with(
                "age",
                FilterPredicate::new(FilterCondition::GreaterThan, "26"),
            ),
            hidden_columns: ["notes".to_string()].into(),
            sort: SortState::by("name", SortDirection::Desc),
            chart: ChartAxes::new("age", "score"),
            search: "ü?&/".to_string(),
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let state = sample_state();
        assert_eq!(decode(&encode(&state)), Ok(state));
        assert_eq!(
            decode(&encode(&ViewState::default())),
            Ok(ViewState::default())
        );
    }

    #[test]
    fn token_is_url_safe() {
        let token = encode(&sample_state());
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn standard_padded_base64_is_accepted() {
        let state = sample_state();
        let json = serde_json::to_vec(&state).expect("state should serialize");
        assert_eq!(decode(&STANDARD.encode(json)), Ok(state));
    }

    #[test]
    fn malformed_tokens_are_decode_errors() {
        assert!(matches!(decode("***"), Err(ViewerError::StateDecode(_))));
        let not_json = URL_SAFE_NO_PAD.encode("{not json");
        assert!(matches!(decode(&not_json), Err(ViewerError::StateDecode(_))));
    }

    #[test]
    fn link_replaces_existing_state_parameter() {
        let state = sample_state();
        let link = share_link("https://example.com/view?lang=en&state=old", &state);

        assert!(link.starts_with("https://example.com/view?lang=en&state="));
        assert!(!link.contains("state=old"));
        assert_eq!(state_from_link(&link), Ok(state));
    }

    #[test]
    fn percent_encoded_parameter_is_decoded() {
        let state = sample_state();
        let json = serde_json::to_vec(&state).expect("state should serialize");
        let encoded = urlencoding::encode(&STANDARD.encode(json)).into_owned();
        let link = format!("http://localhost:8080/?state={encoded}#top");

        assert_eq!(state_from_link(&link), Ok(state));
    }

    #[test]
    fn link_without_state_is_an_error() {
        assert!(state_from_link("http://localhost/?page=2").is_err());
        assert!(state_from_link("   ").is_err());
    }
}
