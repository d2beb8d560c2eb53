//! Meta parameter builder
//!
//! Two independent rules: the CDN bundle goes right after the pixel block
//! (or before `</head>` on pages without one), and the init script goes at
//! the end of `<body>`.

use crate::domain::{Anchor, InjectionRule, Pattern, RuleError, Side};

pub const BUNDLE_TAG: &str = r#"<script src="https://capi-automation.s3.us-east-2.amazonaws.com/public/client_js/capiParamBuilder/clientParamBuilder.bundle.js"></script>"#;
pub const INIT_TAG: &str = r#"<script src="js/param-builder-client.js" defer></script>"#;

pub const BUNDLE_MARKER: &str = "clientParamBuilder.bundle.js";
pub const INIT_MARKER: &str = "param-builder-client.js";

const PIXEL_END: &str = "<!-- End Meta Pixel Code -->";

pub fn bundle_rule() -> Result<InjectionRule, RuleError> {
    let mut after_pixel = Anchor::new(Pattern::literal(PIXEL_END), Side::After);
    after_pixel.snippet = Some(format!("\n{}", BUNDLE_TAG));

    InjectionRule::builder("param-builder-bundle", BUNDLE_MARKER, format!("{}\n", BUNDLE_TAG))
        .anchor_with(after_pixel)
        .anchor("</head>", Side::Before)
        .build()
}

pub fn init_rule() -> Result<InjectionRule, RuleError> {
    InjectionRule::builder("param-builder-init", INIT_MARKER, format!("    {}\n", INIT_TAG))
        .anchor("</body>", Side::Before)
        .build()
}

pub fn rules() -> Result<Vec<InjectionRule>, RuleError> {
    Ok(vec![bundle_rule()?, init_rule()?])
}
