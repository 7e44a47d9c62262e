// Typed request description: path template, path parameters and optional body
use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    template: String,
    path_params: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn get(template: &str) -> Self {
        Self::new(Method::GET, template)
    }

    pub fn post(template: &str, body: Value) -> Self {
        let mut request = Self::new(Method::POST, template);
        request.body = Some(body);
        request
    }

    fn new(method: Method, template: &str) -> Self {
        Self {
            method,
            template: template.to_string(),
            path_params: Vec::new(),
            body: None,
        }
    }

    pub fn path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((name.to_string(), value.into()));
        self
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Substitute `{name}` placeholders with percent-encoded values.
    pub fn path(&self) -> String {
        resolve_path(&self.template, &self.path_params)
    }
}

/// Replace `{key}` placeholders in a path template. Values are percent-encoded
/// so free text (city names with spaces, apostrophes, slashes) stays one segment.
pub fn resolve_path(template: &str, params: &[(String, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let params = vec![
            ("city".to_string(), "St. John's".to_string()),
            ("timePeriod".to_string(), "week".to_string()),
        ];

        let path = resolve_path("/api/average-energy-zip/{city}/{timePeriod}", &params);

        assert_eq!(path, "/api/average-energy-zip/St.%20John%27s/week");
    }

    #[test]
    fn test_slash_in_city_stays_in_one_segment() {
        let request = ApiRequest::get("/top-units/{city}").path_param("city", "A/B");
        assert_eq!(request.path(), "/top-units/A%2FB");
        assert_eq!(request.method, Method::GET);
    }

    #[test]
    fn test_post_carries_body() {
        let request = ApiRequest::post(
            "/api/average-daily-usage-by-unit-type",
            serde_json::json!({"city_name": "Toronto"}),
        );
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body().unwrap()["city_name"], "Toronto");
        assert_eq!(request.path(), "/api/average-daily-usage-by-unit-type");
    }
}
