//! Meta pixel installer

use thiserror::Error;

use crate::domain::{InjectionRule, RuleError, Side, SupersedeMode};

#[derive(Debug, Error, PartialEq)]
pub enum PixelIdError {
    #[error("Pixel ID must not be empty")]
    Empty,

    #[error("Pixel ID must contain only digits, got '{0}'")]
    NotNumeric(String),
}

/// A validated Meta pixel identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelId(String);

impl PixelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PixelId {
    type Err = PixelIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PixelIdError::Empty);
        }
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PixelIdError::NotNumeric(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

pub const MARKER: &str = "Meta Pixel Code";

const LEGACY_BLOCK: &str = r"(?s)<!-- Facebook Pixel Code -->.*?<!-- End Facebook Pixel Code -->";

/// Renders the pixel block for `id`
pub fn snippet(id: &PixelId) -> String {
    let id = id.as_str();
    format!(
        r#"<!-- Meta Pixel Code -->
<script>
!function(f,b,e,v,n,t,s)
{{if(f.fbq)return;n=f.fbq=function(){{n.callMethod?
n.callMethod.apply(n,arguments):n.queue.push(arguments)}};
if(!f._fbq)f._fbq=n;n.push=n;n.loaded=!0;n.version='2.0';
n.queue=[];t=b.createElement(e);t.async=!0;
t.src=v;s=b.getElementsByTagName(e)[0];
s.parentNode.insertBefore(t,s)}}(window, document,'script',
'https://connect.facebook.net/en_US/fbevents.js');
fbq('init', '{id}');
fbq('track', 'PageView');
</script>
<noscript><img height="1" width="1" style="display:none"
src="https://www.facebook.com/tr?id={id}&ev=PageView&noscript=1"
/></noscript>
<!-- End Meta Pixel Code -->
"#
    )
}

/// Installs the pixel before `</head>`, retiring the old Facebook-branded block
pub fn rule(id: &PixelId) -> Result<InjectionRule, RuleError> {
    InjectionRule::builder("meta-pixel", MARKER, snippet(id))
        .anchor("</head>", Side::Before)
        .supersede_regex(LEGACY_BLOCK, SupersedeMode::Remove)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{apply, Outcome};

    fn id() -> PixelId {
        "1234567890".parse().unwrap()
    }

    #[test]
    fn pixel_id_validation() {
        assert_eq!("".parse::<PixelId>(), Err(PixelIdError::Empty));
        assert!(matches!("12ab".parse::<PixelId>(), Err(PixelIdError::NotNumeric(_))));
        assert_eq!(" 42 ".parse::<PixelId>().unwrap().as_str(), "42");
    }

    #[test]
    fn snippet_embeds_id_twice() {
        let s = snippet(&id());
        assert_eq!(s.matches("1234567890").count(), 2);
        assert!(s.contains("fbq('init', '1234567890');"));
        assert!(s.ends_with("<!-- End Meta Pixel Code -->\n"));
    }

    #[test]
    fn installs_before_head_close() {
        let rule = rule(&id()).unwrap();
        let (out, outcome) = apply("index.html", "<head><title>t</title></head><body></body>", &rule);

        assert_eq!(outcome, Outcome::Inserted);
        assert!(out.contains("<!-- End Meta Pixel Code -->\n</head>"));
    }

    #[test]
    fn replaces_legacy_facebook_block() {
        let rule = rule(&id()).unwrap();
        let doc = "<head>\n<!-- Facebook Pixel Code -->\n<script>old</script>\n<!-- End Facebook Pixel Code -->\n</head>";
        let (out, outcome) = apply("index.html", doc, &rule);

        assert_eq!(outcome, Outcome::Inserted);
        assert!(!out.contains("Facebook Pixel Code"));
        assert_eq!(out.matches(MARKER).count(), 2); // opening and closing comments
    }

    #[test]
    fn already_installed_is_skipped() {
        let rule = rule(&id()).unwrap();
        let (once, _) = apply("index.html", "<head></head>", &rule);
        let (_, outcome) = apply("index.html", &once, &rule);
        assert_eq!(outcome, Outcome::AlreadyPresent);
    }
}
