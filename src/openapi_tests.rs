#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "HealthResponse",
            "PredictionRequest",
            "ForecastPoint",
            "TransactionEnvelope",
            "TransactionRecord",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        // Verify that the schema can be serialized to JSON without errors
        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.contains(&field.to_string()));
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "dataset", "forecast_backend"] {
            assert!(properties.contains(&field.to_string()));
        }
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let point = object_properties("ForecastPoint");
        assert!(point.contains(&"predictedBalance".to_string()));

        let record = object_properties("TransactionRecord");
        assert!(record.contains(&"transactionDate".to_string()));
        assert!(record.contains(&"originialTransactionCode".to_string()));
    }

    #[test]
    fn test_openapi_paths() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let health = paths.get("/health").unwrap();
        let health_get = health.operations.get(&PathItemType::Get).unwrap();
        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));

        let transactions = paths.get("/api/transactions").unwrap();
        let transactions_get = transactions.operations.get(&PathItemType::Get).unwrap();
        assert!(transactions_get.responses.responses.contains_key("404"));

        let prediction = paths.get("/api/prediction").unwrap();
        let prediction_post = prediction.operations.get(&PathItemType::Post).unwrap();
        for status in ["200", "400", "404", "500"] {
            assert!(prediction_post.responses.responses.contains_key(status));
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }
}
