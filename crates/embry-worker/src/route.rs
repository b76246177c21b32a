//! Route resolution.
//!
//! Maps a normalized request onto exactly one downstream operation. The
//! decision order is a hard contract: the OpenAI-route family first, then
//! rerank, then plain embedding. A request carrying both `openai_route` and
//! `query` is treated exclusively as an OpenAI-route request.

use serde_json::Value;
use strum::IntoStaticStr;

use embry_core::{Error, Result};
use embry_engine::EmbeddingInput;

use crate::request::JobInput;

/// OpenAI-compatible model listing path.
const ROUTE_MODELS: &str = "/v1/models";

/// OpenAI-compatible embeddings path.
const ROUTE_EMBEDDINGS: &str = "/v1/embeddings";

/// One downstream operation together with its argument bundle.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    /// List the models served by the engine.
    ListModels,
    /// Generate embeddings.
    Embeddings {
        input: Option<EmbeddingInput>,
        model: Option<String>,
        as_list: bool,
    },
    /// Rank documents against a query.
    Rerank {
        query: String,
        docs: Vec<Value>,
        return_docs: bool,
        model: Option<String>,
    },
}

impl Route {
    /// Static name of the selected operation, for logging.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Selects the downstream operation for a request.
    ///
    /// `raw` is the original job payload, quoted verbatim when no route
    /// family matches. Pure and synchronous; never touches the engine.
    pub fn resolve(request: &JobInput, raw: &Value) -> Result<Self> {
        if let Some(openai_route) = &request.openai_route {
            return Self::resolve_openai(openai_route, request);
        }

        if let Some(query) = &request.query {
            return Ok(Self::Rerank {
                query: query.clone(),
                docs: request.docs.clone().unwrap_or_default(),
                return_docs: request.return_docs,
                model: request.model.clone(),
            });
        }

        if let Some(input) = &request.input {
            return Ok(Self::Embeddings {
                input: Some(input.clone()),
                model: request.model.clone(),
                as_list: true,
            });
        }

        Err(Error::invalid_request(format!("Invalid input: {raw}")))
    }

    fn resolve_openai(openai_route: &str, request: &JobInput) -> Result<Self> {
        let openai_input = match &request.openai_input {
            Some(map) if !map.is_empty() => map,
            _ => return Err(Error::invalid_request("Missing openai_input")),
        };

        match openai_route {
            ROUTE_MODELS => Ok(Self::ListModels),
            ROUTE_EMBEDDINGS => {
                let model = match openai_input.get("model").and_then(Value::as_str) {
                    Some(model) if !model.is_empty() => model.to_owned(),
                    _ => {
                        return Err(Error::invalid_request(
                            "Did not specify model in openai_input",
                        ));
                    }
                };

                let input = openai_input
                    .get("input")
                    .map(|value| {
                        serde_json::from_value::<EmbeddingInput>(value.clone()).map_err(|error| {
                            Error::validation(format!("openai_input.input: {error}"))
                        })
                    })
                    .transpose()?;

                Ok(Self::Embeddings {
                    input,
                    model: Some(model),
                    as_list: true,
                })
            }
            other => Err(Error::invalid_request(format!(
                "Invalid OpenAI Route: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(payload: Value) -> Result<Route> {
        let request = JobInput::from_value(&payload)?;
        Route::resolve(&request, &payload)
    }

    #[test]
    fn test_plain_embedding() {
        let route = resolve(json!({"input": "hello"})).unwrap();
        assert_eq!(
            route,
            Route::Embeddings {
                input: Some(EmbeddingInput::Text("hello".into())),
                model: None,
                as_list: true,
            }
        );
    }

    #[test]
    fn test_rerank() {
        let route = resolve(json!({"query": "q", "docs": ["a", "b"], "model": "m"})).unwrap();
        assert_eq!(
            route,
            Route::Rerank {
                query: "q".into(),
                docs: vec![json!("a"), json!("b")],
                return_docs: false,
                model: Some("m".into()),
            }
        );
    }

    #[test]
    fn test_list_models() {
        let route = resolve(json!({
            "openai_route": "/v1/models",
            "openai_input": {"any": true},
        }))
        .unwrap();
        assert_eq!(route, Route::ListModels);
    }

    #[test]
    fn test_openai_route_requires_openai_input() {
        let error = resolve(json!({"openai_route": "/v1/models"})).unwrap_err();
        assert_eq!(error.to_string(), "Missing openai_input");
    }

    #[test]
    fn test_empty_openai_input_is_missing() {
        let error = resolve(json!({
            "openai_route": "/v1/models",
            "openai_input": {},
        }))
        .unwrap_err();
        assert_eq!(error.to_string(), "Missing openai_input");
    }

    #[test]
    fn test_openai_embeddings_requires_model() {
        let error = resolve(json!({
            "openai_route": "/v1/embeddings",
            "openai_input": {"input": "x"},
        }))
        .unwrap_err();
        assert_eq!(error.to_string(), "Did not specify model in openai_input");
    }

    #[test]
    fn test_openai_embeddings_rejects_empty_model() {
        let error = resolve(json!({
            "openai_route": "/v1/embeddings",
            "openai_input": {"input": "x", "model": ""},
        }))
        .unwrap_err();
        assert_eq!(error.to_string(), "Did not specify model in openai_input");
    }

    #[test]
    fn test_openai_embeddings_resolves() {
        let route = resolve(json!({
            "openai_route": "/v1/embeddings",
            "openai_input": {"input": ["a", "b"], "model": "m"},
        }))
        .unwrap();
        assert_eq!(
            route,
            Route::Embeddings {
                input: Some(EmbeddingInput::Sequence(vec![json!("a"), json!("b")])),
                model: Some("m".into()),
                as_list: true,
            }
        );
    }

    #[test]
    fn test_unknown_openai_route_is_quoted_verbatim() {
        let error = resolve(json!({
            "openai_route": "/v1/chat/completions",
            "openai_input": {"model": "m"},
        }))
        .unwrap_err();
        assert!(error.to_string().contains("/v1/chat/completions"));
        assert!(error.to_string().starts_with("Invalid OpenAI Route:"));
    }

    #[test]
    fn test_openai_route_shadows_query_and_input() {
        // Carrying every family at once still resolves as OpenAI-route.
        let route = resolve(json!({
            "openai_route": "/v1/models",
            "openai_input": {"model": "m"},
            "query": "q",
            "input": "x",
        }))
        .unwrap();
        assert_eq!(route, Route::ListModels);
    }

    #[test]
    fn test_query_shadows_input() {
        let route = resolve(json!({"query": "q", "input": "x"})).unwrap();
        assert!(matches!(route, Route::Rerank { .. }));
    }

    #[test]
    fn test_no_family_is_invalid() {
        let payload = json!({"model": "m"});
        let error = resolve(payload.clone()).unwrap_err();
        assert!(error.to_string().starts_with("Invalid input:"));
        assert!(error.to_string().contains("\"model\""));
    }

    #[test]
    fn test_empty_input_still_routes_to_embeddings() {
        // An explicitly empty string or sequence is present, not absent.
        for payload in [json!({"input": ""}), json!({"input": []})] {
            let route = resolve(payload).unwrap();
            assert!(matches!(route, Route::Embeddings { .. }));
        }
    }

    #[test]
    fn test_rerank_without_docs_gets_empty_set() {
        let route = resolve(json!({"query": "q"})).unwrap();
        assert_eq!(
            route,
            Route::Rerank {
                query: "q".into(),
                docs: Vec::new(),
                return_docs: false,
                model: None,
            }
        );
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::ListModels.name(), "list_models");
    }
}
