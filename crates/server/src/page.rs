//! Landing page rendering.
//!
//! The page served behind each QR identifier: reminder details plus
//! an "Add to My Calendar" link to the uploaded .ics file.

use minijinja::{AutoEscape, Environment};

/// Values exposed to the page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    pub pet_name: String,
    pub product_name: String,
    pub calendar_url: String,
    pub frequency: String,
    pub time: String,
    pub duration: String,
    pub notes: Option<String>,
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ pet_name | upper }} - Medication Reminder</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #08312a;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: #ffffff;
        }
        .container {
            background: linear-gradient(135deg, #0a3d33, #08312a);
            border: 2px solid #00e47c;
            border-radius: 20px;
            padding: 30px;
            max-width: 420px;
            width: 100%;
            text-align: center;
        }
        .pet-name {
            font-size: 32px;
            font-weight: bold;
            color: #00e47c;
            text-transform: uppercase;
            letter-spacing: 2px;
        }
        .medication {
            font-size: 20px;
            margin-bottom: 25px;
            opacity: 0.9;
        }
        .details {
            background: rgba(0, 228, 124, 0.1);
            border: 1px solid #00e47c;
            border-radius: 15px;
            padding: 20px;
            margin-bottom: 25px;
            text-align: left;
        }
        .detail-row {
            display: flex;
            justify-content: space-between;
            margin-bottom: 10px;
            font-size: 15px;
        }
        .detail-label {
            color: #00e47c;
            font-weight: 600;
        }
        .notes-section {
            border: 1px dashed #00e47c;
            border-radius: 10px;
            padding: 15px;
            margin-top: 15px;
            text-align: left;
            font-size: 14px;
        }
        .btn {
            display: block;
            width: 100%;
            padding: 18px;
            border: none;
            border-radius: 12px;
            font-size: 16px;
            font-weight: 700;
            text-decoration: none;
            text-transform: uppercase;
            background: linear-gradient(45deg, #00e47c, #00b85c);
            color: #08312a;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="pet-name">{{ pet_name | upper }}</div>
        <div class="medication">{{ product_name }}</div>
        <div class="details">
            <div class="detail-row">
                <span class="detail-label">Frequency:</span>
                <span>{{ frequency }}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Time:</span>
                <span>{{ time }}</span>
            </div>
            <div class="detail-row">
                <span class="detail-label">Duration:</span>
                <span>{{ duration }}</span>
            </div>
            {% if notes %}
            <div class="notes-section">
                <div class="detail-label">Additional Notes:</div>
                <div>{{ notes }}</div>
            </div>
            {% endif %}
        </div>
        <a href="{{ calendar_url }}" class="btn" download>Add to My Calendar</a>
    </div>
</body>
</html>
"#;

/// Render the landing page. A fresh [`minijinja::Environment`] per
/// call; the template is a single static string.
pub fn render(ctx: &PageContext) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    // render_str templates have no .html name, so force escaping.
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.render_str(PAGE_TEMPLATE, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> PageContext {
        PageContext {
            pet_name: "Daisy".to_string(),
            product_name: "NexGard SPECTRA".to_string(),
            calendar_url: "https://bucket.s3.us-east-1.amazonaws.com/calendars/QR0001_Daisy_NexGardSPE.ics".to_string(),
            frequency: "Monthly".to_string(),
            time: "08:30".to_string(),
            duration: "12 occurrences".to_string(),
            notes: None,
        }
    }

    #[test]
    fn renders_pet_and_calendar_link() {
        let html = render(&sample_context()).unwrap();
        assert!(html.contains("DAISY"));
        assert!(html.contains("NexGard SPECTRA"));
        assert!(html.contains("calendars/QR0001_Daisy_NexGardSPE.ics"));
        assert!(html.contains("12 occurrences"));
    }

    #[test]
    fn notes_render_only_when_present() {
        let without = render(&sample_context()).unwrap();
        assert!(!without.contains("Additional Notes"));

        let mut ctx = sample_context();
        ctx.notes = Some("Give with food".to_string());
        let with = render(&ctx).unwrap();
        assert!(with.contains("Additional Notes"));
        assert!(with.contains("Give with food"));
    }

    #[test]
    fn markup_is_escaped() {
        let mut ctx = sample_context();
        ctx.pet_name = "<script>".to_string();
        let html = render(&ctx).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;"));
    }
}
