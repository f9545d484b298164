use async_trait::async_trait;
use reqwest::{
    multipart::{
        Form,
        Part,
    },
    Client,
    Url,
};

use super::{
    AnalysisService,
    BatchResponse,
    FilePart,
};
use crate::{
    config::Settings,
    core::{
        http::{
            ensure_success,
            http_client,
        },
        DatacleanError,
    },
};

pub struct AnalysisApi {
    client: Client,
    url: Url,
}

impl AnalysisApi {
    pub fn new(settings: &Settings) -> Result<Self, DatacleanError> {
        Ok(Self { client: http_client(settings.request_timeout())?, url: settings.analyze_url()? })
    }
}

#[async_trait]
impl AnalysisService for AnalysisApi {
    async fn analyze_batch(
        &self,
        instruction: String,
        files: Vec<FilePart>,
    ) -> Result<BatchResponse, DatacleanError> {
        let mut form = Form::new().text("prompt", instruction);
        for file in files {
            let part = Part::bytes(file.bytes).file_name(file.name).mime_str(&file.mime_type)?;
            form = form.part("files", part);
        }

        let response = self.client.post(self.url.clone()).multipart(form).send().await?;
        ensure_success(&response)?;
        let body = response.bytes().await?;

        parse_batch_response(&body)
    }
}

/// Decodes the `{ "results": [...] }` envelope. Anything else is malformed.
pub fn parse_batch_response(body: &[u8]) -> Result<BatchResponse, DatacleanError> {
    let response: BatchResponse = serde_json::from_slice(body)
        .map_err(|e| DatacleanError::MalformedResponse(format!("analysis response: {e}")))?;

    if let Some(total) = response.total {
        if total != response.results.len() {
            tracing::warn!(
                "Analysis service reported {} result(s) but returned {}",
                total,
                response.results.len()
            );
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_envelope() {
        let body = br#"{
            "results": [
                {"filename": "a.csv", "mime_type": "text/csv", "analysis": {"summary": "ok"}, "status": "success"},
                {"filename": "b.png", "error": "quota", "status": "failed"}
            ],
            "total": 2
        }"#;
        let response = parse_batch_response(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.total, Some(2));
        assert_eq!(response.results[0].summary(), Some("ok"));
    }

    #[test]
    fn one_mistyped_record_does_not_sink_the_batch() {
        let body = br#"{
            "results": [
                {"filename": "a.csv", "analysis": {"summary": "ok", "usable_for_training": true}},
                {"filename": "b.csv", "analysis": {"summary": {"es": "x"}, "usable_for_training": "true"}},
                {"filename": "c.csv", "analysis": "unparsed model output"}
            ],
            "total": "3"
        }"#;
        let response = parse_batch_response(body).unwrap();

        assert_eq!(response.results.len(), 3);
        assert_eq!(response.total, None);
        assert_eq!(response.results[0].summary(), Some("ok"));
        assert_eq!(response.results[1].summary(), None);
        assert!(response.results[2].analysis.is_none());
        assert_eq!(crate::core::aggregate(&response.results).usable, 1);
    }

    #[test]
    fn missing_results_is_malformed() {
        let err = parse_batch_response(br#"{"detail": "Internal Server Error"}"#).unwrap_err();
        assert!(matches!(err, DatacleanError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_batch_response(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, DatacleanError::MalformedResponse(_)));
    }

    #[test]
    fn results_of_wrong_shape_is_malformed() {
        let err = parse_batch_response(br#"{"results": "pending"}"#).unwrap_err();
        assert!(matches!(err, DatacleanError::MalformedResponse(_)));
    }
}
