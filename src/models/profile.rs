// src/models/profile.rs

use std::collections::BTreeMap;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Represents a document in the 'profiles' collection.
/// One-to-one extension of a User; at most one per user, handle unique
/// across all profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning user id.
    pub user: String,

    /// Unique human-readable identifier, analogous to a username.
    pub handle: String,

    pub status: String,

    /// Ordered skill list; submitted as a comma-separated string and stored
    /// split and trimmed. Deduplication is not enforced.
    pub skills: Vec<String>,

    pub bio: String,

    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub githubaccount: Option<String>,

    pub social: Social,

    /// Newest entries first.
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,

    pub date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Social {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Experience entry embedded in a profile. Owned exclusively by the parent
/// profile, no identity outside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: chrono::DateTime<chrono::Utc>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Education entry embedded in a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: chrono::DateTime<chrono::Utc>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// DTO for creating or updating a profile. Social links arrive flat in the
/// request body and are nested into [`Social`] on the stored document.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 40,
        message = "Handle must be between 3 and 40 characters long"
    ))]
    pub handle: String,

    #[serde(default)]
    #[validate(length(min = 3, message = "Status must be at least 3 characters long"))]
    pub status: String,

    /// Comma-separated skill list, e.g. "php, css, html".
    #[serde(default)]
    #[validate(length(min = 3, message = "Skills must be at least 3 characters long"))]
    pub skills: String,

    #[serde(default)]
    #[validate(length(min = 3, message = "Bio must be at least 3 characters long"))]
    pub bio: String,

    #[validate(length(min = 3, message = "Company must be at least 3 characters long"))]
    pub company: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(min = 3, message = "Location must be at least 3 characters long"))]
    pub location: Option<String>,

    #[validate(length(
        min = 3,
        message = "Github account must be at least 3 characters long"
    ))]
    pub githubaccount: Option<String>,

    #[validate(url(message = "Youtube must be a valid URL"))]
    pub youtube: Option<String>,

    #[validate(url(message = "Twitter must be a valid URL"))]
    pub twitter: Option<String>,

    #[validate(url(message = "Facebook must be a valid URL"))]
    pub facebook: Option<String>,

    #[validate(url(message = "Linkedin must be a valid URL"))]
    pub linkedin: Option<String>,

    #[validate(url(message = "Instagram must be a valid URL"))]
    pub instagram: Option<String>,
}

impl ProfileRequest {
    /// Trims every string field before length checks, matching the
    /// schema policy of the API.
    pub fn trimmed(mut self) -> Self {
        fn trim(value: String) -> String {
            value.trim().to_string()
        }
        fn trim_opt(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string())
        }

        self.handle = trim(self.handle);
        self.status = trim(self.status);
        self.skills = trim(self.skills);
        self.bio = trim(self.bio);
        self.company = trim_opt(self.company);
        self.website = trim_opt(self.website);
        self.location = trim_opt(self.location);
        self.githubaccount = trim_opt(self.githubaccount);
        self.youtube = trim_opt(self.youtube);
        self.twitter = trim_opt(self.twitter);
        self.facebook = trim_opt(self.facebook);
        self.linkedin = trim_opt(self.linkedin);
        self.instagram = trim_opt(self.instagram);
        self
    }

    /// Splits the comma-separated skills string into a trimmed ordered list.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect()
    }

    pub fn social(&self) -> Social {
        Social {
            youtube: self.youtube.clone(),
            twitter: self.twitter.clone(),
            facebook: self.facebook.clone(),
            linkedin: self.linkedin.clone(),
            instagram: self.instagram.clone(),
        }
    }

    /// Builds a fresh profile document for the given owner.
    pub fn into_profile(self, user_id: String) -> Profile {
        let skills = self.skill_list();
        let social = self.social();
        Profile {
            id: ObjectId::new().to_hex(),
            user: user_id,
            handle: self.handle,
            status: self.status,
            skills,
            bio: self.bio,
            company: self.company,
            website: self.website,
            location: self.location,
            githubaccount: self.githubaccount,
            social,
            experience: Vec::new(),
            education: Vec::new(),
            date: chrono::Utc::now(),
        }
    }

    /// Applies the request as a full field replacement on an existing
    /// profile. Experience, education, owner and creation date are kept.
    pub fn apply_to(self, profile: &mut Profile) {
        profile.skills = self.skill_list();
        profile.social = self.social();
        profile.handle = self.handle;
        profile.status = self.status;
        profile.bio = self.bio;
        profile.company = self.company;
        profile.website = self.website;
        profile.location = self.location;
        profile.githubaccount = self.githubaccount;
    }
}

/// Parses a submitted date: full RFC 3339 or a plain `YYYY-MM-DD` day
/// (taken as midnight UTC).
fn parse_date(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn validate_from_date(value: &str) -> Result<(), validator::ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        let mut error = validator::ValidationError::new("required");
        error.message = Some("From date is required".into());
        return Err(error);
    }
    if parse_date(value).is_none() {
        let mut error = validator::ValidationError::new("date");
        error.message = Some("From date must be a valid date".into());
        return Err(error);
    }
    Ok(())
}

fn validate_to_date(value: &str) -> Result<(), validator::ValidationError> {
    let value = value.trim();
    if !value.is_empty() && parse_date(value).is_none() {
        let mut error = validator::ValidationError::new("date");
        error.message = Some("To date must be a valid date".into());
        return Err(error);
    }
    Ok(())
}

fn unparsable_date(field: &str, label: &str) -> AppError {
    let mut errors = BTreeMap::new();
    errors.insert(
        field.to_string(),
        format!("{} date must be a valid date", label),
    );
    AppError::Validation(errors)
}

/// DTO for adding an experience entry. Dates arrive as strings so a missing
/// or malformed date lands in the validation error map with the other field
/// violations instead of failing JSON deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[serde(default)]
    #[validate(length(min = 3, message = "Title must be at least 3 characters long"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 3, message = "Company must be at least 3 characters long"))]
    pub company: String,

    #[validate(length(min = 3, message = "Location must be at least 3 characters long"))]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(custom(function = validate_from_date))]
    pub from: String,

    #[validate(custom(function = validate_to_date))]
    pub to: Option<String>,

    #[serde(default)]
    pub current: bool,

    #[validate(length(
        min = 3,
        message = "Description must be at least 3 characters long"
    ))]
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn into_entry(self) -> Result<Experience, AppError> {
        let from = parse_date(self.from.trim()).ok_or_else(|| unparsable_date("from", "From"))?;
        let to = match self.to.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                Some(parse_date(value).ok_or_else(|| unparsable_date("to", "To"))?)
            }
            _ => None,
        };

        Ok(Experience {
            id: ObjectId::new().to_hex(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.map(|v| v.trim().to_string()),
            from,
            to,
            current: self.current,
            description: self.description.map(|v| v.trim().to_string()),
        })
    }
}

/// DTO for adding an education entry.
#[derive(Debug, Deserialize, Validate)]
pub struct EducationRequest {
    #[serde(default)]
    #[validate(length(min = 3, message = "School must be at least 3 characters long"))]
    pub school: String,

    #[serde(default)]
    #[validate(length(min = 3, message = "Degree must be at least 3 characters long"))]
    pub degree: String,

    #[serde(default)]
    #[validate(length(
        min = 3,
        message = "Field of study must be at least 3 characters long"
    ))]
    pub fieldofstudy: String,

    #[serde(default)]
    #[validate(custom(function = validate_from_date))]
    pub from: String,

    #[validate(custom(function = validate_to_date))]
    pub to: Option<String>,

    #[serde(default)]
    pub current: bool,

    #[validate(length(
        min = 3,
        message = "Description must be at least 3 characters long"
    ))]
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn into_entry(self) -> Result<Education, AppError> {
        let from = parse_date(self.from.trim()).ok_or_else(|| unparsable_date("from", "From"))?;
        let to = match self.to.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                Some(parse_date(value).ok_or_else(|| unparsable_date("to", "To"))?)
            }
            _ => None,
        };

        Ok(Education {
            id: ObjectId::new().to_hex(),
            school: self.school.trim().to_string(),
            degree: self.degree.trim().to_string(),
            fieldofstudy: self.fieldofstudy.trim().to_string(),
            from,
            to,
            current: self.current,
            description: self.description.map(|v| v.trim().to_string()),
        })
    }
}
