//! Portfolio data model: the raw form payload and the request built from it.
//!
//! `PortfolioForm` mirrors what the UI submits, blank rows included.
//! `PortfolioRequest` is what the compiler sees: blank rows dropped, theme and
//! fonts resolved against the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::portfolio::themes::{
    color_scheme_for, font_pair_for, ColorScheme, FontPair, DEFAULT_ANIMATIONS, DEFAULT_FONT_PAIR,
    DEFAULT_LAYOUT, DEFAULT_THEME,
};

pub const MAX_PROJECTS: usize = 10;
pub const MAX_POSITIONS: usize = 10;
pub const MAX_DEGREES: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Form sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Social handles. The well-known networks always render; anything else the
/// client sends is kept in `other`, ordered by network name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub website: String,
    /// Behance / Dribbble style portfolio link.
    pub portfolio: String,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: String,
    pub soft: String,
    pub tools: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub title: String,
    pub company: String,
    pub location: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Degree {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignChoices {
    pub theme: String,
    pub layout: String,
    pub fonts: String,
    pub animations: Vec<String>,
}

impl Default for DesignChoices {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            layout: DEFAULT_LAYOUT.to_string(),
            fonts: DEFAULT_FONT_PAIR.to_string(),
            animations: DEFAULT_ANIMATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    pub contact_form: bool,
    pub resume_button: bool,
    pub testimonials: bool,
    pub blog: bool,
    pub seo: bool,
    pub analytics: bool,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            contact_form: true,
            resume_button: true,
            testimonials: false,
            blog: false,
            seo: true,
            analytics: true,
        }
    }
}

/// Raw form payload as submitted by the client. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioForm {
    pub personal: PersonalInfo,
    pub social: SocialLinks,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub experience: Vec<Position>,
    pub education: Vec<Degree>,
    pub certifications: String,
    pub design: DesignChoices,
    pub options: FeatureOptions,
}

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Design choices with the catalog lookups already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDesign {
    pub theme: String,
    pub layout: String,
    pub fonts: String,
    pub animations: Vec<String>,
    pub color_scheme: ColorScheme,
    pub font_pair: FontPair,
}

/// One generation attempt's input. Built fresh from a form on every attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRequest {
    pub personal: PersonalInfo,
    pub social: SocialLinks,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub experience: Vec<Position>,
    pub education: Vec<Degree>,
    pub certifications: String,
    pub design: ResolvedDesign,
    pub options: FeatureOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .fields.join(", "))]
    MissingRequired { fields: Vec<&'static str> },

    #[error("Too many {section}: {count} given, at most {max} allowed")]
    TooManyEntries {
        section: &'static str,
        count: usize,
        max: usize,
    },
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

impl From<PortfolioForm> for PortfolioRequest {
    /// Drops rows whose identifying field is blank and resolves the theme and
    /// font pair. Never fails; see `validate` for submission rules.
    fn from(form: PortfolioForm) -> Self {
        let design = ResolvedDesign {
            color_scheme: color_scheme_for(&form.design.theme),
            font_pair: font_pair_for(&form.design.fonts),
            theme: form.design.theme,
            layout: form.design.layout,
            fonts: form.design.fonts,
            animations: form.design.animations,
        };

        Self {
            personal: form.personal,
            social: form.social,
            skills: form.skills,
            projects: form
                .projects
                .into_iter()
                .filter(|p| is_present(&p.name))
                .collect(),
            experience: form
                .experience
                .into_iter()
                .filter(|e| is_present(&e.title))
                .collect(),
            education: form
                .education
                .into_iter()
                .filter(|d| is_present(&d.degree))
                .collect(),
            certifications: form.certifications,
            design,
            options: form.options,
        }
    }
}

impl PortfolioRequest {
    /// Checks the request is fit to send. Runs before any network call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", &self.personal.name),
            ("title", &self.personal.title),
            ("bio", &self.personal.bio),
        ]
        .into_iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired { fields: missing });
        }

        for (section, count, max) in [
            ("projects", self.projects.len(), MAX_PROJECTS),
            ("positions", self.experience.len(), MAX_POSITIONS),
            ("degrees", self.education.len(), MAX_DEGREES),
        ] {
            if count > max {
                return Err(ValidationError::TooManyEntries {
                    section,
                    count,
                    max,
                });
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::minimal_form;
    use super::*;
    use crate::portfolio::themes::THEMES;

    #[test]
    fn test_minimal_form_is_valid() {
        let request = PortfolioRequest::from(minimal_form());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_each_missing_required_field_is_reported() {
        for field in ["name", "title", "bio"] {
            let mut form = minimal_form();
            match field {
                "name" => form.personal.name.clear(),
                "title" => form.personal.title = "   ".to_string(),
                _ => form.personal.bio.clear(),
            }

            let err = PortfolioRequest::from(form).validate().unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingRequired {
                    fields: vec![field]
                }
            );
        }
    }

    #[test]
    fn test_all_missing_fields_listed_in_message() {
        let err = PortfolioRequest::from(PortfolioForm::default())
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: name, title, bio"
        );
    }

    #[test]
    fn test_blank_rows_are_filtered_in_order() {
        let mut form = minimal_form();
        form.projects = vec![
            Project {
                name: "Analytical Engine".to_string(),
                ..Default::default()
            },
            Project {
                name: "".to_string(),
                description: "orphan description".to_string(),
                ..Default::default()
            },
            Project {
                name: "Note G".to_string(),
                ..Default::default()
            },
        ];
        form.experience = vec![Position {
            title: " ".to_string(),
            company: "Nowhere".to_string(),
            ..Default::default()
        }];
        form.education = vec![
            Degree::default(),
            Degree {
                degree: "Mathematics".to_string(),
                ..Default::default()
            },
        ];

        let request = PortfolioRequest::from(form);
        let names: Vec<_> = request.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Analytical Engine", "Note G"]);
        assert!(request.experience.is_empty());
        assert_eq!(request.education.len(), 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_too_many_projects_rejected() {
        let mut form = minimal_form();
        form.projects = (0..=MAX_PROJECTS)
            .map(|i| Project {
                name: format!("Project {i}"),
                ..Default::default()
            })
            .collect();

        let err = PortfolioRequest::from(form).validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyEntries {
                section: "projects",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_theme_resolves_to_default_scheme_but_keeps_name() {
        let mut form = minimal_form();
        form.design.theme = "Vaporwave".to_string();

        let request = PortfolioRequest::from(form);
        assert_eq!(request.design.theme, "Vaporwave");
        assert_eq!(request.design.color_scheme, THEMES[0].colors);
    }

    #[test]
    fn test_form_defaults_match_ui_defaults() {
        let form: PortfolioForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.design.theme, "Modern Gradient");
        assert_eq!(form.design.animations, ["Fade In", "Hover Effects"]);
        assert!(form.options.contact_form);
        assert!(!form.options.blog);
    }

    #[test]
    fn test_extra_social_networks_are_collected() {
        let json = r#"{"social": {"github": "ada", "mastodon": "@ada@hachyderm.io"}}"#;
        let form: PortfolioForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.social.github, "ada");
        assert_eq!(
            form.social.other.get("mastodon").map(String::as_str),
            Some("@ada@hachyderm.io")
        );
    }
}
