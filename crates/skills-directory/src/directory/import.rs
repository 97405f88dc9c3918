use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::catalog::{CatalogError, SkillCatalog};
use super::domain::{Profile, ProfileId, Skill, SkillId, MAX_PROFICIENCY, MIN_PROFICIENCY};

/// Loads directory records exported by the profile store as JSON arrays.
pub struct DirectoryImporter;

impl DirectoryImporter {
    pub fn profiles_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Profile>, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::profiles_from_reader(file)
    }

    pub fn profiles_from_reader<R: Read>(reader: R) -> Result<Vec<Profile>, DirectoryImportError> {
        let profiles: Vec<Profile> = serde_json::from_reader(reader)?;

        let mut seen = HashSet::new();
        for (index, profile) in profiles.iter().enumerate() {
            check_profile(index, profile)?;
            if !seen.insert(&profile.id) {
                return Err(DirectoryImportError::DuplicateProfile(profile.id.clone()));
            }
        }

        Ok(profiles)
    }

    pub fn catalog_from_path<P: AsRef<Path>>(path: P) -> Result<SkillCatalog, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::catalog_from_reader(file)
    }

    pub fn catalog_from_reader<R: Read>(reader: R) -> Result<SkillCatalog, DirectoryImportError> {
        let skills: Vec<Skill> = serde_json::from_reader(reader)?;
        Ok(SkillCatalog::new(skills)?)
    }
}

fn check_profile(index: usize, profile: &Profile) -> Result<(), DirectoryImportError> {
    let required = [
        ("id", profile.id.0.as_str()),
        ("full_name", profile.full_name.as_str()),
        ("email", profile.email.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DirectoryImportError::MissingField { index, field });
        }
    }

    if let Some(percent) = profile.availability_percent {
        if percent > 100 {
            return Err(DirectoryImportError::AvailabilityOutOfRange {
                profile_id: profile.id.clone(),
                value: percent,
            });
        }
    }

    let mut held = HashSet::new();
    for skill in &profile.skills {
        if !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&skill.proficiency_level) {
            return Err(DirectoryImportError::ProficiencyOutOfRange {
                profile_id: profile.id.clone(),
                skill_id: skill.skill_id.clone(),
                level: skill.proficiency_level,
            });
        }
        if !held.insert(&skill.skill_id) {
            return Err(DirectoryImportError::DuplicateSkill {
                profile_id: profile.id.clone(),
                skill_id: skill.skill_id.clone(),
            });
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryImportError {
    #[error("failed to read directory export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid directory JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("profile #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("profile '{0}' appears more than once")]
    DuplicateProfile(ProfileId),
    #[error("profile '{profile_id}' lists skill '{skill_id}' more than once")]
    DuplicateSkill {
        profile_id: ProfileId,
        skill_id: SkillId,
    },
    #[error("profile '{profile_id}' declares level {level} for '{skill_id}' (expected 1-5)")]
    ProficiencyOutOfRange {
        profile_id: ProfileId,
        skill_id: SkillId,
        level: u8,
    },
    #[error("profile '{profile_id}' declares availability {value}% (expected 0-100)")]
    AvailabilityOutOfRange { profile_id: ProfileId, value: u8 },
}
