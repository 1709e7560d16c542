// All LLM prompt constants for portfolio generation.
// The per-request sections are assembled in compiler.rs; everything here is fixed text.

/// System instruction sent with every generation call.
pub const PORTFOLIO_SYSTEM: &str = "You are an expert web developer and designer who creates \
    stunning, modern, responsive portfolio websites. \
    Generate complete, production-ready HTML with inline CSS and JavaScript.";

/// Opening line of every compiled prompt.
pub const PROMPT_HEADER: &str = "Create a STUNNING, PROFESSIONAL, and FULLY RESPONSIVE portfolio \
website as a single HTML file with inline CSS and JavaScript.";

pub const NO_PROJECTS: &str = "No projects listed";
pub const NO_EXPERIENCE: &str = "No experience listed";
pub const NO_EDUCATION: &str = "No education listed";
pub const NO_CERTIFICATIONS: &str = "No certifications listed";
pub const NO_ANIMATIONS: &str = "None";

pub const TECHNICAL_REQUIREMENTS: &str = r#"## Technical Requirements:
1. Create a COMPLETE single HTML file with inline CSS and JavaScript
2. Make it FULLY RESPONSIVE (mobile, tablet, desktop)
3. Use the specified color scheme and fonts
4. Include smooth scroll behavior
5. Add hover effects and animations as specified
6. Use Font Awesome icons (via CDN)
7. Include meta tags for SEO with proper title, description, keywords
8. Add smooth transitions between sections
9. Make navigation sticky/fixed on scroll
10. Include a hero section with gradient background matching the theme
11. Use CSS Grid/Flexbox for modern, responsive layouts
12. Add scroll-triggered animations using Intersection Observer
13. Include social media icons with proper links
14. Make all buttons and links beautifully styled with hover effects
15. Add a professional footer with copyright and links
16. Use CSS variables for easy theming
17. Make the contact form functional with FormSpree or EmailJS integration
18. Add smooth page transitions and loading states
19. Include proper semantic HTML5
20. Ensure WCAG accessibility compliance"#;

/// Output framing rules. The sanitizer relies on the DOCTYPE-first and
/// no-fence instructions below.
pub const CRITICAL_REQUIREMENTS: &str = r#"## CRITICAL REQUIREMENTS:
- Start DIRECTLY with <!DOCTYPE html>
- End with </html>
- Do NOT include markdown code blocks (```)
- Do NOT include explanations or comments outside the HTML
- Output ONE self-contained HTML document: all CSS in <style> and all JavaScript in <script>
- Make it production-ready and visually stunning
- Ensure all sections flow naturally
- Test all interactive elements work properly

Generate ONLY the complete, production-ready HTML code now."#;
