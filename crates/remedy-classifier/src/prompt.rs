//! Prompt construction for the analysis request.

/// Build the analysis prompt for one log line. The model is instructed
/// to answer with bare JSON carrying exactly the four verdict fields.
pub fn analysis_prompt(log_line: &str) -> String {
    format!(
        r#"Analyze this application log line and provide a JSON response:

Log: {log_line}

Provide analysis in this exact JSON format:
{{
    "anomaly": "Brief description of the issue",
    "severity": "Critical/High/Medium/Low",
    "category": "performance/network/security/database/application",
    "description": "Detailed explanation of the issue"
}}

Only return valid JSON, no other text."#
    )
}
