use serde::{Deserialize, Serialize};

/// Body of `POST /api/tailor-resume`, for both success and failure.
/// Error responses from the backend omit `success`, so it defaults to false.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TailorResponse {
    #[serde(default)]
    pub success: bool,
    pub tailored_resume: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocxRequest<'a> {
    pub resume_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let r: TailorResponse =
            serde_json::from_str(r#"{"success": true, "tailored_resume": "SUMMARY"}"#).unwrap();
        assert!(r.success);
        assert_eq!(r.tailored_resume.as_deref(), Some("SUMMARY"));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_error_only_body_is_not_success() {
        let r: TailorResponse =
            serde_json::from_str(r#"{"error": "No resume file uploaded"}"#).unwrap();
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("No resume file uploaded"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let r: TailorResponse =
            serde_json::from_str(r#"{"success": false, "code": 7, "error": null}"#).unwrap();
        assert_eq!(r, TailorResponse::default());
    }

    #[test]
    fn test_docx_request_shape() {
        let body = serde_json::to_value(DocxRequest { resume_text: "x" }).unwrap();
        assert_eq!(body, serde_json::json!({ "resume_text": "x" }));
    }
}
