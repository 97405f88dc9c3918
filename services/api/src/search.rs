use crate::cli::DataArgs;
use crate::infra::{load_directory, parse_date, start_of_day, InMemoryProfileSource};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use skills_directory::config::AppConfig;
use skills_directory::directory::{
    skill_id_for, write_csv, DirectoryImporter, DirectorySearchService, FilterError,
    FilterRequest, Profile, ProfileVerdict, RequestedSkill, SearchOutcome, SearchServiceError,
    Skill, SkillCatalog, SkillCategory, SkillId,
};
use skills_directory::error::AppError;
use skills_directory::telemetry;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Required skill as NAME[:MIN_LEVEL], e.g. "Azure DevOps:4" (repeatable)
    #[arg(long = "skill", value_parser = parse_requested_skill)]
    pub(crate) skills: Vec<RequestedSkill>,
    /// Accept profiles meeting any requested skill instead of all of them
    #[arg(long)]
    pub(crate) any: bool,
    /// Only profiles holding a skill in this category (e.g. "Cloud/Infra")
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Substring of the profile's city or country
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Substring of the profile's business unit
    #[arg(long)]
    pub(crate) business_unit: Option<String>,
    /// Minimum availability percentage
    #[arg(long)]
    pub(crate) min_availability: Option<i32>,
    /// Latest acceptable start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start_by: Option<String>,
    /// Only profiles updated within this many days
    #[arg(long)]
    pub(crate) updated_within: Option<u32>,
    /// Require the open-to-mission flag to equal this value
    #[arg(long)]
    pub(crate) open_to_mission: Option<bool>,
    /// Sort key: match, availability or updated
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Evaluate as of this date instead of now (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Write the ranked results to this CSV file
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Also list disqualified profiles with the constraint they failed
    #[arg(long)]
    pub(crate) explain: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl SearchArgs {
    fn request(&self) -> FilterRequest {
        FilterRequest {
            skills: self.skills.clone(),
            category: self.category.clone(),
            location: self.location.clone(),
            business_unit: self.business_unit.clone(),
            min_availability: self.min_availability,
            earliest_start_by: self.start_by.clone(),
            updated_within_days: self.updated_within,
            open_to_mission: self.open_to_mission,
            relaxed: self.any,
            sort_by: self.sort.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct SkillsArgs {
    /// Restrict the listing to one category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Case-insensitive substring of the skill name
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.data.clone().apply(&mut config.directory);
    telemetry::init(&config.telemetry)?;

    let now = args.as_of.map(start_of_day).unwrap_or_else(Utc::now);
    let (catalog, profiles) = load_directory(&config.directory, now)?;
    let service = DirectorySearchService::new(
        Arc::new(catalog),
        Arc::new(InMemoryProfileSource::new(profiles)),
    );

    let request = args.request();
    let outcome = service.search_at(request.clone(), now)?;
    render_results(&outcome, &request, service.catalog(), now);

    if args.explain {
        let verdicts = service.explain_at(request, now)?;
        render_explanation(&verdicts);
    }

    if let Some(path) = args.export {
        let file = File::create(&path)?;
        write_csv(
            file,
            outcome
                .results
                .iter()
                .map(|hit| (&hit.profile, hit.result)),
        )
        .map_err(SearchServiceError::from)?;
        println!(
            "\nExported {} row(s) to {}",
            outcome.qualified(),
            path.display()
        );
    }

    Ok(())
}

pub(crate) fn run_skills(args: SkillsArgs) -> Result<(), AppError> {
    let SkillsArgs {
        category,
        query,
        data,
    } = args;

    let mut config = AppConfig::load()?;
    data.apply(&mut config.directory);

    let catalog = match &config.directory.catalog_path {
        Some(path) => DirectoryImporter::catalog_from_path(path)?,
        None => SkillCatalog::standard(),
    };

    let category = match category {
        Some(raw) => Some(SkillCategory::from_label(&raw).ok_or_else(|| {
            SearchServiceError::Filter(FilterError::UnknownCategory(raw.clone()))
        })?),
        None => None,
    };

    let skills = match query.as_deref() {
        Some(query) => catalog.search(query),
        None => catalog.active(),
    };

    let mut grouped: BTreeMap<SkillCategory, Vec<&Skill>> = BTreeMap::new();
    for skill in skills {
        if category.map_or(true, |wanted| wanted == skill.category) {
            grouped.entry(skill.category).or_default().push(skill);
        }
    }

    if grouped.is_empty() {
        println!("No active skills match.");
        return Ok(());
    }

    for (category, skills) in grouped {
        println!("{} ({})", category.label(), skills.len());
        for skill in skills {
            println!("  - {} [{}]", skill.name, skill.id);
        }
    }

    Ok(())
}

fn render_results(
    outcome: &SearchOutcome,
    request: &FilterRequest,
    catalog: &SkillCatalog,
    now: DateTime<Utc>,
) {
    println!("Skills directory search");
    println!(
        "Evaluated {} profile(s) as of {}, {} qualified (sorted by {})",
        outcome.evaluated,
        now.date_naive(),
        outcome.qualified(),
        outcome.sort_by.label()
    );

    if outcome.results.is_empty() {
        println!("No profiles match the current filters.");
        return;
    }

    for (rank, hit) in outcome.results.iter().enumerate() {
        let profile = &hit.profile;
        println!(
            "{:>2}. {} ({}) - {} | {} | {}",
            rank + 1,
            profile.full_name,
            hit.result.score,
            profile.job_title.as_deref().unwrap_or("-"),
            profile.business_unit.as_deref().unwrap_or("-"),
            profile.location_label()
        );
        println!(
            "    availability {}% | updated {} | {}",
            profile.availability(),
            profile
                .last_updated
                .map(|updated| updated.date_naive().to_string())
                .unwrap_or_else(|| "never".to_string()),
            if profile.open_to_mission.unwrap_or(false) {
                "open to mission"
            } else {
                "not open to mission"
            }
        );
        println!("    skills: {}", skill_summary(profile, request, catalog));
    }
}

/// Requested skills with the profile's level, or every held skill when the
/// request names none.
fn skill_summary(profile: &Profile, request: &FilterRequest, catalog: &SkillCatalog) -> String {
    let name_of = |skill_id: &SkillId| {
        catalog
            .get(skill_id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| skill_id.to_string())
    };

    let entries: Vec<String> = if request.skills.is_empty() {
        profile
            .skills
            .iter()
            .map(|held| format!("{} L{}", name_of(&held.skill_id), held.proficiency_level))
            .collect()
    } else {
        request
            .skills
            .iter()
            .map(|requested| {
                format!(
                    "{} L{}",
                    name_of(&requested.skill_id),
                    profile.level_of(&requested.skill_id)
                )
            })
            .collect()
    };

    if entries.is_empty() {
        "-".to_string()
    } else {
        entries.join(", ")
    }
}

fn render_explanation(verdicts: &[ProfileVerdict]) {
    let rejected: Vec<_> = verdicts
        .iter()
        .filter_map(|verdict| {
            verdict
                .outcome
                .as_ref()
                .err()
                .map(|reason| (&verdict.profile, reason))
        })
        .collect();

    println!("\nDisqualified profiles ({})", rejected.len());
    for (profile, reason) in rejected {
        println!(
            "  - {}: {} [{}]",
            profile.full_name,
            reason.summary(),
            reason.constraint().label()
        );
    }
}

pub(crate) fn parse_requested_skill(raw: &str) -> Result<RequestedSkill, String> {
    let (name, level) = match raw.rsplit_once(':') {
        Some((name, level)) => {
            let level = level
                .trim()
                .parse::<u8>()
                .map_err(|err| format!("invalid level in '{raw}' ({err})"))?;
            (name, level)
        }
        None => (raw, 1),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing skill name in '{raw}'"));
    }

    Ok(RequestedSkill {
        skill_id: skill_id_for(name),
        min_level: level,
    })
}
