use crate::core::ConfigProvider;
use crate::domain::model::{LeadSubmission, MessageKind, OutboundEmail};
use chrono::{DateTime, Utc};

/// Escapes text for safe interpolation into HTML bodies.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn business_notification<C: ConfigProvider + ?Sized>(
    config: &C,
    submission: &LeadSubmission,
    received_at: DateTime<Utc>,
) -> OutboundEmail {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let message = escape_html(submission.message.trim());
    let received = received_at.format("%Y-%m-%d %H:%M UTC");

    let html = format!(
        r#"<div style="font-family: 'Helvetica Neue', Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9;">
  <div style="background-color: #101010; color: #EAEFFF; padding: 30px; border-radius: 8px;">
    <h2 style="color: #EAEFFF; margin: 0 0 20px 0;">New Contact Form Submission</h2>
    <div style="background-color: #151515; padding: 20px; border-radius: 6px; margin: 20px 0;">
      <p style="margin: 10px 0;"><strong>Name:</strong> {name}</p>
      <p style="margin: 10px 0;"><strong>Email:</strong> {email}</p>
      <p style="margin: 10px 0;"><strong>Received:</strong> {received}</p>
      <p style="margin: 10px 0;"><strong>Message:</strong></p>
      <div style="background-color: #1a1a1a; padding: 15px; border-radius: 4px; margin-top: 10px; white-space: pre-wrap;">{message}</div>
    </div>
    <p style="margin: 20px 0 0 0; font-size: 14px; opacity: 0.8;">Reply directly to this email to respond to {name}.</p>
  </div>
</div>"#
    );

    let text = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\nReceived: {}\n\n{}\n\nReply directly to this email to respond to {}.",
        submission.name,
        submission.email,
        received,
        submission.message.trim(),
        submission.name
    );

    OutboundEmail {
        kind: MessageKind::BusinessNotification,
        from: config.notification_from().to_string(),
        to: vec![config.business_address().to_string()],
        subject: format!("New contact form submission from {}", submission.name),
        html,
        text,
        reply_to: Some(submission.email.clone()),
        idempotency_key: None,
    }
}

pub fn auto_reply<C: ConfigProvider + ?Sized>(config: &C, submission: &LeadSubmission) -> OutboundEmail {
    let brand = config.brand_name();
    let (summary_html, summary_text) = match &submission.details {
        Some(details) => {
            let services = details
                .services
                .iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            let html = format!(
                r#"<div class="detail-item"><span class="detail-label">Services:</span><span class="detail-value">{}</span></div>
        <div class="detail-item"><span class="detail-label">Budget:</span><span class="detail-value">{}</span></div>
        <div class="detail-item" style="margin-top: 15px;"><div class="detail-label">Project Details:</div><div class="detail-value" style="margin-left: 0; white-space: pre-wrap;">{}</div></div>"#,
                escape_html(&services),
                escape_html(&details.budget),
                escape_html(details.project_details.trim())
            );
            let text = format!(
                "Services: {}\nBudget: {}\n\nProject Details:\n{}",
                services,
                details.budget,
                details.project_details.trim()
            );
            (html, text)
        }
        None => (
            format!(
                r#"<div class="detail-item"><div class="detail-value" style="margin-left: 0; white-space: pre-wrap;">{}</div></div>"#,
                escape_html(submission.message.trim())
            ),
            submission.message.trim().to_string(),
        ),
    };

    let name = escape_html(&submission.name);
    let contact = escape_html(config.contact_address());
    let site = escape_html(config.site_url());
    let brand_html = escape_html(brand);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Thank you for contacting {brand_html}.</title>
  <style>
    body {{ margin: 0; padding: 0; font-family: 'Helvetica Neue', Arial, sans-serif; background-color: #101010; color: #EAEFFF; line-height: 1.6; }}
    .container {{ max-width: 600px; margin: 0 auto; }}
    .header, .footer {{ background-color: #151515; padding: 30px; text-align: center; }}
    .content {{ padding: 40px 30px; }}
    .details-section {{ background-color: #151515; border: 1px solid #252525; border-radius: 8px; padding: 25px; margin: 30px 0; }}
    .detail-item {{ margin: 10px 0; font-size: 14px; }}
    .detail-label {{ opacity: 0.7; font-weight: 500; }}
    .detail-value {{ margin-left: 10px; }}
    .next-steps {{ background-color: #1a1a1a; border-left: 3px solid #EAEFFF; padding: 20px 25px; margin: 30px 0; }}
    a {{ color: #EAEFFF; text-decoration: none; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>{brand_html}.</h1></div>
    <div class="content">
      <h2>Hello {name},</h2>
      <p>Thank you for reaching out to {brand_html}. We've received your project inquiry and are excited to learn more about your vision.</p>
      <div class="details-section">
        <h3>Your Submission Details</h3>
        {summary_html}
      </div>
      <div class="next-steps">
        <h3>What happens next?</h3>
        <p>Our team will review your project details and respond within 6 hours with next steps, timeline estimates, and any questions we might have about your vision.</p>
      </div>
      <p>Best regards,<br><strong>{brand_html}</strong></p>
    </div>
    <div class="footer">
      <p>This is an automated response confirming we've received your inquiry.</p>
      <p><a href="mailto:{contact}">{contact}</a></p>
      <p><a href="{site}">{site}</a></p>
    </div>
  </div>
</body>
</html>"#
    );

    let text = format!(
        "Hello {},\n\nThank you for reaching out to {}. We've received your project inquiry.\n\nYour Submission Details\n{}\n\nOur team will review your project details and respond within 6 hours.\n\nBest regards,\n{}\n{}\n{}",
        submission.name,
        brand,
        summary_text,
        brand,
        config.contact_address(),
        config.site_url()
    );

    OutboundEmail {
        kind: MessageKind::AutoReply,
        from: config.auto_reply_from().to_string(),
        to: vec![submission.email.clone()],
        subject: format!("Hey! {} received your idea 👍🏼", brand),
        html,
        text,
        reply_to: None,
        idempotency_key: None,
    }
}
