//! # Built-in Rule Presets
//!
//! Ready-made rule sets for the marketing site's recurring edits.
//!
//! | Preset | Rules | Marker |
//! |--------|-------|--------|
//! | `pixel` | Meta pixel before `</head>` | `Meta Pixel Code` |
//! | `param-builder` | CDN bundle after the pixel, init script before `</body>` | `clientParamBuilder.bundle.js`, `param-builder-client.js` |
//! | `cta` | Footer call-to-action | `footer-cta-persuasivo` |
//! | `testimonials` | Testimonial footer, replacing old CTAs | `global-social-proof-footer` |

mod footer;
mod param_builder;
mod pixel;

pub use footer::{cta_rule, social_proof_rule, CTA_MARKER, EXCLUDED_PAGES, PROOF_MARKER};
pub use param_builder::{bundle_rule, init_rule, BUNDLE_TAG, INIT_TAG};
pub use pixel::{PixelId, PixelIdError};

use crate::domain::{InjectionRule, RuleError};

/// A built-in rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preset {
    Pixel(PixelId),
    ParamBuilder,
    Cta,
    Testimonials,
}

impl Preset {
    /// Name and one-line description of every preset
    pub fn catalog() -> &'static [(&'static str, &'static str)] {
        &[
            ("pixel", "Install the Meta pixel (requires a pixel ID)"),
            ("param-builder", "Install the Meta parameter builder bundle and init script"),
            ("cta", "Inject the footer call-to-action"),
            ("testimonials", "Inject the testimonial footer, replacing old CTAs"),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Pixel(_) => "pixel",
            Preset::ParamBuilder => "param-builder",
            Preset::Cta => "cta",
            Preset::Testimonials => "testimonials",
        }
    }

    /// Builds the preset's rules, in application order
    pub fn rules(&self) -> Result<Vec<InjectionRule>, RuleError> {
        match self {
            Preset::Pixel(id) => Ok(vec![pixel::rule(id)?]),
            Preset::ParamBuilder => param_builder::rules(),
            Preset::Cta => Ok(vec![cta_rule()?]),
            Preset::Testimonials => Ok(vec![social_proof_rule()?]),
        }
    }
}
