use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COUNTRY_CODE: &str = "+1";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "App Development")]
    AppDevelopment,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "AI Model Development")]
    AiModelDevelopment,
    #[serde(rename = "Logo and Branding Design")]
    LogoAndBrandingDesign,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::AppDevelopment,
        Service::WebDevelopment,
        Service::AiModelDevelopment,
        Service::LogoAndBrandingDesign,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Service::AppDevelopment => "App Development",
            Service::WebDevelopment => "Web Development",
            Service::AiModelDevelopment => "AI Model Development",
            Service::LogoAndBrandingDesign => "Logo and Branding Design",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Service::AppDevelopment => "app",
            Service::WebDevelopment => "web",
            Service::AiModelDevelopment => "ai",
            Service::LogoAndBrandingDesign => "branding",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Service::ALL
            .into_iter()
            .find(|service| {
                service.display_name().eq_ignore_ascii_case(wanted)
                    || service.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown service: {}", wanted))
    }
}

/// The in-progress inquiry collected by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLead {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub details: String,
    pub currency: String,
    pub budget: String,
    pub services: Vec<Service>,
}

impl Default for DraftLead {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            phone: String::new(),
            details: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            budget: String::new(),
            services: Vec::new(),
        }
    }
}

impl DraftLead {
    /// Adds the service when absent and removes it when present.
    pub fn toggle_service(&mut self, service: Service) {
        if let Some(pos) = self.services.iter().position(|s| *s == service) {
            self.services.remove(pos);
        } else {
            self.services.push(service);
        }
    }

    pub fn has_service(&self, service: Service) -> bool {
        self.services.contains(&service)
    }

    pub fn services_line(&self) -> String {
        self.services
            .iter()
            .map(Service::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn phone_line(&self) -> String {
        format!("{} {}", self.country_code, self.phone)
    }

    pub fn budget_line(&self) -> String {
        format!("{} {}", self.currency, self.budget)
    }

    /// Plain-text body sent to the business, one labeled field per line.
    pub fn format_message(&self) -> String {
        format!(
            "Services: {}\nPhone: {}\nBudget: {}\n\nProject Details:\n{}",
            self.services_line(),
            self.phone_line(),
            self.budget_line(),
            self.details
        )
    }
}

/// Structured lead fields carried next to the formatted message so the
/// auto-reply can be rendered without re-reading the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetails {
    pub services: Vec<Service>,
    pub phone: String,
    pub budget: String,
    pub project_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<LeadDetails>,
}

impl LeadSubmission {
    /// Plain contact-form submission without structured lead fields.
    pub fn contact(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn from_draft(draft: &DraftLead) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            message: draft.format_message(),
            details: Some(LeadDetails {
                services: draft.services.clone(),
                phone: draft.phone_line(),
                budget: draft.budget_line(),
                project_details: draft.details.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Success,
    Failure { reason: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    BusinessNotification,
    AutoReply,
}

impl MessageKind {
    pub fn slug(&self) -> &'static str {
        match self {
            MessageKind::BusinessNotification => "business-notification",
            MessageKind::AutoReply => "auto-reply",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::BusinessNotification => f.write_str("business notification"),
            MessageKind::AutoReply => f.write_str("auto-reply"),
        }
    }
}

/// A single rendered email ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    #[serde(skip)]
    pub kind: MessageKind,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Sent as a header so provider retries cannot deliver twice.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = DraftLead::default();
        assert_eq!(draft.country_code, "+1");
        assert_eq!(draft.currency, "USD");
        assert!(draft.services.is_empty());
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_toggle_twice_returns_to_empty() {
        for service in Service::ALL {
            let mut draft = DraftLead::default();
            draft.toggle_service(service);
            assert!(draft.has_service(service));
            draft.toggle_service(service);
            assert!(draft.services.is_empty());
        }
    }

    #[test]
    fn test_toggle_keeps_unique_membership_and_order() {
        let mut draft = DraftLead::default();
        draft.toggle_service(Service::WebDevelopment);
        draft.toggle_service(Service::AppDevelopment);
        draft.toggle_service(Service::AiModelDevelopment);
        draft.toggle_service(Service::AppDevelopment);
        assert_eq!(
            draft.services,
            vec![Service::WebDevelopment, Service::AiModelDevelopment]
        );
    }

    #[test]
    fn test_service_parsing() {
        assert_eq!("web".parse::<Service>().unwrap(), Service::WebDevelopment);
        assert_eq!(
            "logo and branding design".parse::<Service>().unwrap(),
            Service::LogoAndBrandingDesign
        );
        assert_eq!(" AI ".parse::<Service>().unwrap(), Service::AiModelDevelopment);
        assert!("seo".parse::<Service>().is_err());
    }

    #[test]
    fn test_format_message_lines() {
        let draft = DraftLead {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234".to_string(),
            details: "Need a landing page".to_string(),
            budget: "2,000".to_string(),
            services: vec![Service::WebDevelopment, Service::LogoAndBrandingDesign],
            ..DraftLead::default()
        };

        let message = draft.format_message();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "Services: Web Development, Logo and Branding Design");
        assert_eq!(lines[1], "Phone: +1 5551234");
        assert_eq!(lines[2], "Budget: USD 2,000");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Project Details:");
        assert_eq!(lines[5], "Need a landing page");
    }

    #[test]
    fn test_submission_from_draft_carries_structured_fields() {
        let draft = DraftLead {
            name: "  Jane Doe ".to_string(),
            email: "jane@example.com ".to_string(),
            phone: "5551234".to_string(),
            details: "Need a landing page".to_string(),
            currency: "EUR".to_string(),
            budget: "2,000".to_string(),
            services: vec![Service::WebDevelopment],
            ..DraftLead::default()
        };

        let submission = LeadSubmission::from_draft(&draft);
        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.email, "jane@example.com");
        let details = submission.details.unwrap();
        assert_eq!(details.services, vec![Service::WebDevelopment]);
        assert_eq!(details.budget, "EUR 2,000");
        assert_eq!(details.phone, "+1 5551234");
    }

    #[test]
    fn test_submission_json_shape() {
        let json = serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "message": "Hello"
        });
        let submission: LeadSubmission = serde_json::from_value(json).unwrap();
        assert!(submission.details.is_none());

        let outcome = serde_json::to_value(SubmissionOutcome::Failure {
            reason: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(outcome["status"], "failure");
        assert_eq!(outcome["reason"], "nope");
    }
}
