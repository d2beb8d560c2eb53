//! Footer call-to-action and testimonial blocks
//!
//! Pages come with one of several footer shapes. Each shape is an anchor;
//! the list order is the order the shapes are tried in.

use crate::domain::{Anchor, InjectionRule, Pattern, RuleError, Side, SupersedeMode};

/// Pages that never receive footer blocks
pub const EXCLUDED_PAGES: &[&str] = &["testimonios.html", "googleb3cccf1efd67c490.html"];

pub const CTA_MARKER: &str = "footer-cta-persuasivo";
pub const PROOF_MARKER: &str = "global-social-proof-footer";

const CTA_MODERN: &str = r##"            <div class="footer-cta-persuasivo" style="background: rgba(255,255,255,0.05); padding: 2rem; border-radius: 1rem; margin-bottom: 3rem; border: 1px solid rgba(255,255,255,0.1); text-align: center;">
                <h3 style="color: white; font-family: 'Outfit', sans-serif; font-size: 1.5rem; margin-bottom: 1rem;">¿Aún con dudas?</h3>
                <p style="font-size: 1.1rem; color: #cbd5e1; margin-bottom: 1.5rem; max-width: 600px; margin-left: auto; margin-right: auto;">Únete a las más de 10,000 personas que ya transformaron su vida. Descubre sus historias aquí y toma acción hoy.</p>
                <a href="testimonios.html" style="display: inline-block; background: var(--primary); color: white; padding: 0.8rem 2rem; border-radius: 2rem; text-decoration: none; font-weight: 600; transition: background 0.3s; box-shadow: 0 4px 15px rgba(37,99,235,0.3);">Ver Casos de Éxito</a>
            </div>
"##;

/// Grid-spanning variant for `fl-footer` pages
const CTA_FL: &str = r##"            <div class="fl-footer-cta-persuasivo" style="background: rgba(255,255,255,0.05); padding: 2rem; border-radius: 1rem; margin-bottom: 3rem; border: 1px solid rgba(255,255,255,0.1); text-align: center; grid-column: 1 / -1;">
                <h3 style="color: white; font-family: 'Outfit', sans-serif; font-size: 1.5rem; margin-bottom: 1rem;">¿Aún con dudas?</h3>
                <p style="font-size: 1.1rem; color: #cbd5e1; margin-bottom: 1.5rem; max-width: 600px; margin-left: auto; margin-right: auto;">Únete a las más de 10,000 personas que ya transformaron su vida. Descubre sus historias aquí y toma acción hoy.</p>
                <a href="testimonios.html" style="display: inline-block; background: linear-gradient(135deg, #2563eb, #1d4ed8); color: white; padding: 0.8rem 2rem; border-radius: 2rem; text-decoration: none; font-weight: 600; transition: transform 0.3s; box-shadow: 0 4px 15px rgba(37,99,235,0.3);">Ver Casos de Éxito</a>
            </div>
"##;

const SOCIAL_PROOF: &str = r##"<!-- Global Social Proof Footer -->
<div class="global-social-proof-footer" style="padding: 4rem 0; background: #0a0a0b; border-top: 1px solid rgba(255,255,255,0.05);">
    <div class="container" style="max-width: 1200px; margin: 0 auto; padding: 0 1.5rem;">
        <div style="text-align: center; margin-bottom: 3rem;">
            <p style="color: #3b82f6; text-transform: uppercase; letter-spacing: 0.1em; font-weight: 700; font-size: 0.8rem; margin-bottom: 0.5rem; font-family: 'Outfit', sans-serif;">Resultados Probados</p>
            <h2 style="color: white; font-family: 'Outfit', sans-serif; font-size: clamp(1.5rem, 4vw, 2.2rem); margin-bottom: 1rem;">Historias que inspiran acción.</h2>
        </div>

        <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 1.5rem; margin-bottom: 3rem;">
            <!-- Card 1: Elena Villalobos -->
            <div style="background: rgba(255,255,255,0.03); border: 1px solid rgba(255,255,255,0.08); padding: 2rem; border-radius: 20px; transition: transform 0.3s ease;">
                <div style="display: flex; align-items: center; gap: 1rem; margin-bottom: 1.5rem;">
                    <img src="https://i.pravatar.cc/150?u=elena" alt="Dra. Elena Villalobos" style="width: 48px; height: 48px; border-radius: 50%; object-fit: cover;">
                    <div>
                        <h4 style="color: white; margin: 0; font-size: 1rem; font-family: 'Outfit', sans-serif;">Dra. Elena Villalobos</h4>
                        <p style="color: #64748b; margin: 0; font-size: 0.8rem;">Pediatra · Madre de Mateo</p>
                    </div>
                </div>
                <div style="color: #3b82f6; font-family: 'JetBrains Mono', monospace; font-size: 1.2rem; margin-bottom: 1rem; font-weight: 700;">6.2 → 9.1 <span style="font-size: 0.7rem; color: #64748b;">PROMEDIO</span></div>
                <p style="color: #cbd5e1; font-style: italic; line-height: 1.6; font-size: 0.95rem;">"El promedio de Mateo saltó de 6.2 a 9.1 en solo 4 semanas. La inversión se pagó sola en el segundo mes."</p>
            </div>

            <!-- Card 2: Alejandro Torres -->
            <div style="background: rgba(255,255,255,0.03); border: 1px solid rgba(255,255,255,0.08); padding: 2rem; border-radius: 20px; transition: transform 0.3s ease;">
                <div style="display: flex; align-items: center; gap: 1rem; margin-bottom: 1.5rem;">
                    <img src="https://i.pravatar.cc/150?u=alejandro" alt="Alejandro Torres" style="width: 48px; height: 48px; border-radius: 50%; object-fit: cover;">
                    <div>
                        <h4 style="color: white; margin: 0; font-size: 1rem; font-family: 'Outfit', sans-serif;">Alejandro Torres</h4>
                        <p style="color: #64748b; margin: 0; font-size: 0.8rem;">Dir. Operaciones · TechLogistics</p>
                    </div>
                </div>
                <div style="color: #3b82f6; font-family: 'JetBrains Mono', monospace; font-size: 1.2rem; margin-bottom: 1rem; font-weight: 700;">34 MIN <span style="font-size: 0.7rem; color: #64748b;">300 PÁGINAS</span></div>
                <p style="color: #cbd5e1; font-style: italic; line-height: 1.6; font-size: 0.95rem;">"WorldBrain me enseñó a leer 300 páginas en 34 minutos con retención real. Ahora devoro 2 libros por semana."</p>
            </div>

            <!-- Card 3: Silvia Ortiz -->
            <div style="background: rgba(255,255,255,0.03); border: 1px solid rgba(255,255,255,0.08); padding: 2rem; border-radius: 20px; transition: transform 0.3s ease;">
                <div style="display: flex; align-items: center; gap: 1rem; margin-bottom: 1.5rem;">
                    <img src="https://i.pravatar.cc/150?u=silvia" alt="Silvia Ortiz" style="width: 48px; height: 48px; border-radius: 50%; object-fit: cover;">
                    <div>
                        <h4 style="color: white; margin: 0; font-size: 1rem; font-family: 'Outfit', sans-serif;">Silvia Ortiz</h4>
                        <p style="color: #64748b; margin: 0; font-size: 0.8rem;">Mamá de Diego · COMIPEMS</p>
                    </div>
                </div>
                <div style="color: #3b82f6; font-family: 'JetBrains Mono', monospace; font-size: 1.2rem; margin-bottom: 1rem; font-weight: 700;">118 / 128 <span style="font-size: 0.7rem; color: #64748b;">ACIERTOS</span></div>
                <p style="color: #cbd5e1; font-style: italic; line-height: 1.6; font-size: 0.95rem;">"Mi hijo sacó 118 de 128 y quedó en Prepa 6 UNAM gracias a Fotolectura y súper-memoria."</p>
            </div>
        </div>

        <div style="text-align: center;">
            <a href="testimonios.html" style="display: inline-block; background: #2563eb; color: white; padding: 1rem 2.5rem; border-radius: 50px; text-decoration: none; font-weight: 700; transition: all 0.3s ease; box-shadow: 0 10px 20px rgba(37,99,235,0.2); font-family: 'Outfit', sans-serif;">
                Ver más casos de éxito <i class="fas fa-arrow-right" style="margin-left: 0.5rem;"></i>
            </a>
        </div>
    </div>
</div>
"##;

const FL_GRID: &str = r#"(?s)<footer class="fl-footer".*?<div class="fl-footer-grid">"#;
const MODERN_CONTAINER: &str = r#"(?s)<footer class="footer-modern"[^>]*>.*?<div class="container">"#;
const COSMIC_CONTENT: &str = r#"(?s)<footer class="cosmic-footer">.*?<div class="footer-content">"#;
const ANY_CONTAINER: &str = r#"(?s)<footer[^>]*>.*?<div class="container">"#;

const OLD_CTA_FL: &str = r#"(?s)<div class="fl-footer-cta-persuasivo".*?</div>"#;
const OLD_CTA: &str = r#"(?s)<div class="footer-cta-persuasivo".*?</div>"#;

fn regex_anchor(rule: &str, source: &str, snippet: Option<String>) -> Result<Anchor, RuleError> {
    let mut anchor = Anchor::new(Pattern::regex(rule, source)?, Side::After);
    anchor.snippet = snippet;
    Ok(anchor)
}

/// "Still unsure?" call-to-action linking to the testimonials page
pub fn cta_rule() -> Result<InjectionRule, RuleError> {
    let name = "footer-cta";
    let mut builder = InjectionRule::builder(name, CTA_MARKER, format!("\n{}", CTA_MODERN))
        .anchor_with(regex_anchor(name, FL_GRID, Some(format!("\n{}", CTA_FL)))?)
        .anchor_with(regex_anchor(name, MODERN_CONTAINER, None)?)
        .anchor_with(regex_anchor(name, COSMIC_CONTENT, None)?)
        .anchor_with(regex_anchor(name, ANY_CONTAINER, None)?);

    for page in EXCLUDED_PAGES {
        builder = builder.exclude(*page);
    }
    builder.build()
}

/// Testimonial footer; takes the place of an existing CTA block if there is one
pub fn social_proof_rule() -> Result<InjectionRule, RuleError> {
    let mut builder = InjectionRule::builder("social-proof", PROOF_MARKER, format!("\n{}", SOCIAL_PROOF))
        .supersede_regex(OLD_CTA_FL, SupersedeMode::Replace)
        .supersede_regex(OLD_CTA, SupersedeMode::Replace)
        .anchor_regex(COSMIC_CONTENT, Side::After)
        .anchor_regex(r#"<footer[^>]*>\s*<div class="container">"#, Side::After)
        .anchor_regex(r#"<footer[^>]*>\s*<div class="fl-footer-grid">"#, Side::After)
        .anchor_regex(r"<footer[^>]*>", Side::After);

    for page in EXCLUDED_PAGES {
        builder = builder.exclude(*page);
    }
    builder.build()
}
