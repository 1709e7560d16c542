//! Prompt compiler. Serializes a `PortfolioRequest` into one instruction string.
//!
//! Deterministic: the same request always yields byte-identical output. User
//! text is emitted verbatim; nothing is escaped or templated a second time.

use std::fmt::Write;

use crate::portfolio::models::{Degree, FeatureOptions, PortfolioRequest, Position, Project};
use crate::portfolio::prompts::{
    CRITICAL_REQUIREMENTS, NO_ANIMATIONS, NO_CERTIFICATIONS, NO_EDUCATION, NO_EXPERIENCE,
    NO_PROJECTS, PROMPT_HEADER, TECHNICAL_REQUIREMENTS,
};

/// Builds the full generation prompt for a request.
pub fn compile_prompt(request: &PortfolioRequest) -> String {
    let personal = &request.personal;
    let social = &request.social;
    let skills = &request.skills;
    let design = &request.design;

    let mut social_lines = format!(
        "- GitHub: {}\n- LinkedIn: {}\n- Twitter: {}\n- Website: {}\n- Portfolio: {}",
        social.github, social.linkedin, social.twitter, social.website, social.portfolio
    );
    for (network, handle) in &social.other {
        // Writing to a String cannot fail.
        let _ = write!(social_lines, "\n- {network}: {handle}");
    }

    let animations = if design.animations.is_empty() {
        NO_ANIMATIONS.to_string()
    } else {
        design.animations.join(", ")
    };

    let certifications = if request.certifications.trim().is_empty() {
        NO_CERTIFICATIONS
    } else {
        request.certifications.as_str()
    };

    format!(
        "{PROMPT_HEADER}

## Personal Information:
- Name: {name}
- Title: {title}
- Bio: {bio}
- Email: {email}
- Phone: {phone}
- Location: {location}

## Social Links:
{social_lines}

## Skills:
- Technical: {technical}
- Soft Skills: {soft}
- Tools: {tools}

## Projects:
{projects}

## Experience:
{experience}

## Education:
{education}

## Certifications:
{certifications}

## Design Requirements:
- Theme: {theme}
- Layout: {layout}
- Fonts: {fonts} (headings: {heading_font}, body: {body_font}, stylesheet: {font_url})
- Animations: {animations}
- Primary Color: {primary}
- Secondary Color: {secondary}
- Accent Color: {accent}

## Features to Include:
{features}

{TECHNICAL_REQUIREMENTS}

## Style Guidelines:
- Use the {theme} color palette with gradients
- Apply {fonts} font pairing from Google Fonts
- Implement {layout} layout structure
- Include these animations: {animations}
- Professional spacing, shadows, rounded corners, and transitions
- Use placeholder images from placeholder.com or unsplash

{CRITICAL_REQUIREMENTS}",
        name = personal.name,
        title = personal.title,
        bio = personal.bio,
        email = personal.email,
        phone = personal.phone,
        location = personal.location,
        technical = skills.technical,
        soft = skills.soft,
        tools = skills.tools,
        projects = section_or(&request.projects, NO_PROJECTS, project_block),
        experience = section_or(&request.experience, NO_EXPERIENCE, position_block),
        education = section_or(&request.education, NO_EDUCATION, degree_block),
        theme = design.theme,
        layout = design.layout,
        fonts = design.fonts,
        heading_font = design.font_pair.heading,
        body_font = design.font_pair.body,
        font_url = design.font_pair.url,
        primary = design.color_scheme.primary,
        secondary = design.color_scheme.secondary,
        accent = design.color_scheme.accent,
        features = feature_lines(&request.options),
    )
}

/// One block per entry joined by newlines, or the placeholder when empty so
/// the model does not invent a section.
fn section_or<T>(entries: &[T], placeholder: &str, block: fn(&T) -> String) -> String {
    if entries.is_empty() {
        placeholder.to_string()
    } else {
        entries.iter().map(block).collect::<Vec<_>>().join("\n")
    }
}

fn project_block(p: &Project) -> String {
    format!(
        "### {}\n- Tech: {}\n- Description: {}\n- URL: {}\n- Date: {}",
        p.name, p.technologies, p.description, p.url, p.date
    )
}

fn position_block(e: &Position) -> String {
    format!(
        "### {} at {}\n- Duration: {}\n- Location: {}\n- Description: {}",
        e.title, e.company, e.duration, e.location, e.description
    )
}

fn degree_block(d: &Degree) -> String {
    format!(
        "### {}\n- Institution: {}\n- Year: {}\n- GPA: {}",
        d.degree, d.institution, d.year, d.gpa
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn feature_lines(options: &FeatureOptions) -> String {
    [
        ("Contact Form", options.contact_form),
        ("Resume Download Button", options.resume_button),
        ("Testimonials", options.testimonials),
        ("Blog/Articles Section", options.blog),
        ("SEO Optimized", options.seo),
        ("Google Analytics Ready", options.analytics),
    ]
    .iter()
    .map(|(label, flag)| format!("- {label}: {}", yes_no(*flag)))
    .collect::<Vec<_>>()
    .join("\n")
}
