use std::collections::BTreeMap;

use super::domain::{Skill, SkillCategory, SkillId};
use super::filter::FilterSpec;

/// Explicit skill catalog shared by the search service and the matching engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: BTreeMap<SkillId, Skill>,
}

impl SkillCatalog {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for skill in skills {
            if catalog.skills.contains_key(&skill.id) {
                return Err(CatalogError::DuplicateSkill(skill.id));
            }
            catalog.skills.insert(skill.id.clone(), skill);
        }
        Ok(catalog)
    }

    /// Built-in catalog covering the consulting practice areas.
    pub fn standard() -> Self {
        let groups: [(SkillCategory, &[&str]); 6] = [
            (
                SkillCategory::DataAi,
                &[
                    "Python",
                    "R",
                    "SQL",
                    "Spark",
                    "Databricks",
                    "Pandas",
                    "scikit-learn",
                    "TensorFlow",
                    "PyTorch",
                    "MLflow",
                    "MLOps",
                    "Data Engineering",
                    "Power BI",
                    "Azure ML",
                    "Prompt Engineering",
                    "LLM Fine-tuning",
                    "LangChain",
                    "Vector DBs",
                ],
            ),
            (
                SkillCategory::Cyber,
                &[
                    "ISO 27001",
                    "NIST CSF",
                    "SOC 2",
                    "IAM",
                    "PAM",
                    "Microsoft Sentinel",
                    "EDR",
                    "Threat Modeling",
                    "DevSecOps",
                    "Secure SDLC",
                    "Cloud Security (Azure)",
                    "Pen Testing",
                    "Incident Response",
                ],
            ),
            (
                SkillCategory::CloudInfra,
                &[
                    "Azure Core",
                    "Azure DevOps",
                    "Terraform",
                    "Docker",
                    "Kubernetes",
                    "Linux Admin",
                    "Windows Server",
                    "Networking",
                    "Azure Functions",
                    "APIM",
                    "CI/CD",
                    "Monitoring (AppInsights)",
                ],
            ),
            (
                SkillCategory::Web,
                &[
                    "JavaScript",
                    "TypeScript",
                    "React",
                    "Angular",
                    "Node.js",
                    ".NET (ASP.NET Core)",
                    "Java Spring",
                    "REST APIs",
                    "GraphQL",
                    "PostgreSQL",
                    "Redis",
                    "Microservices",
                    "OAuth/OIDC",
                ],
            ),
            (
                SkillCategory::PmBa,
                &[
                    "Agile Scrum",
                    "Kanban",
                    "Jira",
                    "Confluence",
                    "Requirements",
                    "Stakeholder Mgmt",
                    "Roadmapping",
                    "Risk Mgmt",
                ],
            ),
            (
                SkillCategory::Qa,
                &[
                    "Test Strategy",
                    "Test Automation",
                    "Selenium",
                    "Cypress",
                    "Playwright",
                    "Unit/Integration/E2E",
                    "Performance Testing",
                    "API Testing",
                    "ISTQB",
                ],
            ),
        ];

        let mut catalog = Self::default();
        for (category, names) in groups {
            for name in names {
                let skill = Skill {
                    id: skill_id_for(name),
                    name: (*name).to_string(),
                    category,
                    is_active: true,
                };
                catalog.skills.insert(skill.id.clone(), skill);
            }
        }
        catalog
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn category_of(&self, id: &SkillId) -> Option<SkillCategory> {
        self.skills.get(id).map(|skill| skill.category)
    }

    /// Active skills ordered by category, then display name.
    pub fn active(&self) -> Vec<&Skill> {
        let mut skills: Vec<&Skill> = self.skills.values().filter(|s| s.is_active).collect();
        skills.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        skills
    }

    /// Active skills whose display name contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&Skill> {
        let needle = query.trim().to_lowercase();
        self.active()
            .into_iter()
            .filter(|skill| skill.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Register a new active skill, deriving its id from the display name.
    pub fn add(&mut self, name: &str, category: SkillCategory) -> Result<&Skill, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let id = skill_id_for(name);
        if self.skills.contains_key(&id) {
            return Err(CatalogError::DuplicateSkill(id));
        }

        let skill = Skill {
            id: id.clone(),
            name: name.to_string(),
            category,
            is_active: true,
        };
        Ok(self.skills.entry(id).or_insert(skill))
    }

    /// Flip a skill's active flag, returning the new value.
    pub fn toggle_active(&mut self, id: &SkillId) -> Result<bool, CatalogError> {
        let skill = self
            .skills
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownSkill(id.clone()))?;
        skill.is_active = !skill.is_active;
        Ok(skill.is_active)
    }

    /// Change a skill's display name. The id stays put so stored profiles
    /// keep pointing at it.
    pub fn rename(&mut self, id: &SkillId, name: &str) -> Result<(), CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let skill = self
            .skills
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownSkill(id.clone()))?;
        skill.name = name.to_string();
        Ok(())
    }

    /// Reject filters that reference skills a search form could not offer.
    pub fn ensure_selectable(&self, filter: &FilterSpec) -> Result<(), CatalogError> {
        for requested in &filter.skills {
            match self.skills.get(&requested.skill_id) {
                None => return Err(CatalogError::UnknownSkill(requested.skill_id.clone())),
                Some(skill) if !skill.is_active => {
                    return Err(CatalogError::InactiveSkill(requested.skill_id.clone()))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Catalog id for a display name.
pub fn skill_id_for(name: &str) -> SkillId {
    SkillId(slug(name))
}

/// Lowercase slug with every run of non-alphanumeric characters collapsed to `-`.
pub(crate) fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("skill '{0}' is already in the catalog")]
    DuplicateSkill(SkillId),
    #[error("skill '{0}' is not in the catalog")]
    UnknownSkill(SkillId),
    #[error("skill '{0}' is inactive and cannot be searched")]
    InactiveSkill(SkillId),
    #[error("skill name must not be empty")]
    EmptyName,
}
