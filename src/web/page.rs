//! HTML rendering for the single-page form.

use escaper::{encode_attribute, encode_minimal};

pub const TITLE: &str = "Know Your Ingredient App 🌽";
pub const TAGLINE: &str =
    "Identify ingredients in your images and learn about their pros and cons!";
pub const REQUIREMENT_LABEL: &str = "Any specific requirements for ingredient analysis:";
pub const UPLOAD_LABEL: &str = "Upload your image (* JPEG or PNG allowed)";
pub const BUTTON_LABEL: &str = "Analyze Ingredient";
pub const BUSY_MESSAGE: &str = "Analyzing Ingredient...";
pub const UPLOAD_SUCCESS: &str = "🎉 Image uploaded successfully!";
pub const PREVIEW_CAPTION: &str = "Food Label Uploaded Image";
pub const ANALYSIS_SUBHEADER: &str = "Ingredient Analysis:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "notice success",
            Notice::Warning(_) => "notice warning",
            Notice::Error(_) => "notice error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Everything the page shows besides its static parts.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub requirement: String,
    /// `data:` URL of the uploaded image.
    pub preview: Option<String>,
    pub notices: Vec<Notice>,
    pub analysis: Option<String>,
}

impl PageView {
    pub fn with_requirement(requirement: String) -> Self {
        Self {
            requirement,
            ..Self::default()
        }
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("<title>Know Your Ingredient</title>\n");
    html.push_str("<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🌽</text></svg>\">\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<main>\n");

    html.push_str(&format!("<h1>{}</h1>\n", encode_minimal(TITLE)));
    html.push_str(&format!("<p>{}</p>\n", encode_minimal(TAGLINE)));

    html.push_str(
        "<form id=\"analyze-form\" method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">\n",
    );
    html.push_str(&format!(
        "<label for=\"requirement\">{}</label>\n",
        encode_minimal(REQUIREMENT_LABEL)
    ));
    html.push_str(&format!(
        "<input type=\"text\" id=\"requirement\" name=\"requirement\" value=\"{}\">\n",
        encode_attribute(&view.requirement)
    ));
    html.push_str(&format!(
        "<label for=\"image\">{}</label>\n",
        encode_minimal(UPLOAD_LABEL)
    ));
    html.push_str(
        "<input type=\"file\" id=\"image\" name=\"image\" accept=\".jpg,.jpeg,.png,image/jpeg,image/png\">\n",
    );
    html.push_str(&format!(
        "<button type=\"submit\">{}</button>\n",
        encode_minimal(BUTTON_LABEL)
    ));
    html.push_str("</form>\n");

    html.push_str(&format!(
        "<div id=\"busy\" class=\"busy\" hidden><span class=\"spinner\"></span>{}</div>\n",
        encode_minimal(BUSY_MESSAGE)
    ));

    for notice in &view.notices {
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            notice.class(),
            encode_minimal(notice.message())
        ));
    }

    if let Some(preview) = &view.preview {
        html.push_str(&format!(
            "<figure><img src=\"{}\" width=\"300\" alt=\"{}\"><figcaption>{}</figcaption></figure>\n",
            encode_attribute(preview),
            encode_attribute(PREVIEW_CAPTION),
            encode_minimal(PREVIEW_CAPTION)
        ));
    }

    if let Some(analysis) = &view.analysis {
        html.push_str(&format!(
            "<section id=\"analysis\">\n<h2>{}</h2>\n<pre>{}</pre>\n</section>\n",
            encode_minimal(ANALYSIS_SUBHEADER),
            encode_minimal(analysis)
        ));
    }

    html.push_str("</main>\n");
    html.push_str(FOOTER);
    html.push_str(SCRIPT);
    html.push_str("</body>\n</html>\n");

    html
}

const STYLE: &str = r#"<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0 auto; max-width: 1100px; padding: 2rem; color: #262730; }
label { display: block; margin-top: 1rem; font-size: 0.9rem; }
input[type=text] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: 0.5rem 1rem; border-radius: 0.5rem; border: 1px solid #ccc; background: #fff; cursor: pointer; }
.notice { margin-top: 1rem; padding: 1rem; border-radius: 0.5rem; }
.success { background: #dff0d8; color: #1e6b35; }
.warning { background: #fff8e1; color: #8a6d3b; }
.error { background: #fde8e8; color: #a61b1b; }
.busy { margin-top: 1rem; }
.spinner { display: inline-block; width: 1rem; height: 1rem; margin-right: 0.5rem; border: 2px solid #ddd; border-top-color: #ff4b4b; border-radius: 50%; animation: spin 1s linear infinite; vertical-align: middle; }
@keyframes spin { to { transform: rotate(360deg); } }
pre { white-space: pre-wrap; font-family: inherit; }
footer a { font-size: 12px; text-decoration: none; }
</style>
"#;

const FOOTER: &str = r#"<footer>
<hr style="border:0.5px solid #808080">
<div style="display: flex; justify-content: space-between; align-items: center; padding-top: 10px; padding-bottom: 10px;">
    <div>
        <a href="https://ashusnapx.vercel.app/" target="_blank" style="color: #1DA1F2;">Ashutosh Kumar</a><br>
        <span style="font-size: 12px;">Software Developer</span>
    </div>
    <div>
        <a href="https://twitter.com/ashusnapx" target="_blank" style="color: #1DA1F2;">Twitter</a><br>
        <a href="https://www.linkedin.com/in/ashusnapx" target="_blank" style="color: #0077B5;">LinkedIn</a>
    </div>
</div>
</footer>
"#;

const SCRIPT: &str = r#"<script>
document.getElementById('analyze-form').addEventListener('submit', function () {
    document.getElementById('busy').hidden = false;
});
</script>
"#;
