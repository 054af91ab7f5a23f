//! Quadrant - AI project portfolio scoring CLI
//!
//! Thin collaborator around `quadrant-core`: it moves plain JSON records
//! between files and the in-memory repository and prints score results.
//!
//! ## Commands
//!
//! - `rubrics`: List registered rubrics
//! - `score`: Score a criteria-ratings file against a rubric
//! - `assess`: Derive deep-dive ratings from an objective facts file and score them
//! - `list` / `show` / `query`: Inspect a portfolio file
//! - `evaluate`: Run and record an evaluation for a project
//! - `delete` / `clone-template`: Portfolio mutations

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use quadrant_core::{
    derive_ratings, CriteriaRatings, EvaluationService, Evaluator, Priority, Project,
    ProjectFacts, ProjectId, ProjectQuery, ProjectRecord, ProjectRepository, ProjectStatus,
    ScoreSet,
};

#[derive(Parser)]
#[command(name = "quadrant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI project portfolio scoring", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rubrics known to the scoring engine
    Rubrics,

    /// Score a ratings file against a rubric
    Score {
        /// Path to a JSON object of criterion id -> rating
        #[arg(short, long)]
        ratings: PathBuf,

        /// Rubric to score against
        #[arg(long, default_value = "quick_assessment")]
        rubric: String,

        /// Print the full score set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive deep-dive ratings from an objective facts file and score them
    Assess {
        /// Path to a JSON project facts sheet
        #[arg(short, long)]
        facts: PathBuf,

        /// Print the full score set as JSON
        #[arg(long)]
        json: bool,
    },

    /// List projects in a portfolio file
    List {
        /// Path to a portfolio file (JSON array of project records)
        #[arg(short, long)]
        portfolio: PathBuf,

        /// List templates instead of live projects
        #[arg(long)]
        templates: bool,
    },

    /// Show one project as a full record
    Show {
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Project id
        id: String,
    },

    /// Query live projects with conjunctive filters
    Query {
        #[arg(short, long)]
        portfolio: PathBuf,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Priority quadrant (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        priority: Option<u8>,

        #[arg(long)]
        min_score: Option<f64>,

        #[arg(long)]
        max_score: Option<f64>,
    },

    /// Create, complete and record an evaluation for a project
    Evaluate {
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Project id
        id: String,

        /// Path to a JSON object of criterion id -> rating
        #[arg(short, long)]
        ratings: PathBuf,

        #[arg(long, default_value = "quick_assessment")]
        rubric: String,

        /// Evaluator name
        #[arg(long, default_value = "cli")]
        evaluator: String,

        /// Recommendation to attach (repeatable)
        #[arg(long = "recommend")]
        recommendations: Vec<String>,
    },

    /// Delete a project from the portfolio
    Delete {
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Project id
        id: String,
    },

    /// Clone a template into a fresh draft project
    CloneTemplate {
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Template id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    quadrant_core::init_tracing(cli.json_logs, level);

    let service = EvaluationService::with_default_rubrics();

    match cli.command {
        Commands::Rubrics => {
            for id in service.registry().ids() {
                println!("{id}");
            }
        }

        Commands::Score { ratings, rubric, json } => {
            let ratings = load_ratings(&ratings)?;
            let scores = service.calculate_scores(&rubric, &ratings)?;
            print_scores(&scores, json)?;
        }

        Commands::Assess { facts, json } => {
            let facts = load_facts(&facts)?;
            let ratings = derive_ratings(&facts);
            for (criterion, rating) in &ratings {
                println!("{criterion}: {rating}");
            }
            let scores = service.calculate_scores("deep_dive", &ratings)?;
            print_scores(&scores, json)?;
        }

        Commands::List { portfolio, templates } => {
            let repo = load_portfolio(&portfolio)?;
            let projects = if templates {
                repo.find_templates()
            } else {
                repo.find_all()
            };
            for project in projects {
                let score = project
                    .current_scores()
                    .map(|s| format!("{:+.2} P{}", s.overall.final_score, s.overall.priority))
                    .unwrap_or_else(|| "unscored".to_string());
                println!("{}  [{}]  {}  ({score})", project.id, project.status, project.name);
            }
        }

        Commands::Show { portfolio, id } => {
            let repo = load_portfolio(&portfolio)?;
            let project = repo
                .find_by_id(&ProjectId::from(id.as_str()))
                .with_context(|| format!("project not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&project.to_record())?);
        }

        Commands::Query {
            portfolio,
            status,
            department,
            category,
            priority,
            min_score,
            max_score,
        } => {
            let repo = load_portfolio(&portfolio)?;
            let mut query = ProjectQuery::new();
            if let Some(status) = status {
                let status: ProjectStatus = status.parse().map_err(anyhow::Error::msg)?;
                query = query.with_status(status);
            }
            if let Some(department) = department {
                query = query.with_department(department);
            }
            if let Some(category) = category {
                query = query.with_category(category);
            }
            if let Some(priority) = priority {
                query = query.with_priority(Priority(priority));
            }
            if let Some(min) = min_score {
                query = query.with_min_score(min);
            }
            if let Some(max) = max_score {
                query = query.with_max_score(max);
            }

            for project in repo.query(&query) {
                println!("{}  {}", project.id, project.name);
            }
        }

        Commands::Evaluate {
            portfolio,
            id,
            ratings,
            rubric,
            evaluator,
            recommendations,
        } => {
            let mut repo = load_portfolio(&portfolio)?;
            let now = Utc::now();
            let project_id = ProjectId::from(id.as_str());

            let project = repo
                .find_by_id_mut(&project_id)
                .with_context(|| format!("project not found: {id}"))?;
            if let Some(reason) = project.can_edit().denial_reason() {
                bail!("{reason}");
            }

            let ratings = load_ratings(&ratings)?;
            let scores = service.calculate_scores(&rubric, &ratings)?;
            let mut evaluation =
                service.create_evaluation(&rubric, Evaluator::human(evaluator), now)?;
            evaluation.complete(scores.clone(), recommendations, now)?;
            info!(project = %project_id, evaluation = %evaluation.id, "recording evaluation");
            project.add_evaluation(evaluation, now)?;

            write_portfolio(&repo, &portfolio)?;
            print_scores(&scores, false)?;
        }

        Commands::Delete { portfolio, id } => {
            let mut repo = load_portfolio(&portfolio)?;
            repo.delete(&ProjectId::from(id.as_str()))?;
            write_portfolio(&repo, &portfolio)?;
            println!("deleted {id}");
        }

        Commands::CloneTemplate { portfolio, id } => {
            let mut repo = load_portfolio(&portfolio)?;
            let clone_id = repo.clone_from_template(&ProjectId::from(id.as_str()), Utc::now())?;
            write_portfolio(&repo, &portfolio)?;
            println!("created {clone_id}");
        }
    }

    Ok(())
}

fn load_ratings(path: &Path) -> Result<CriteriaRatings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading ratings file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing ratings file {}", path.display()))
}

fn load_facts(path: &Path) -> Result<ProjectFacts> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading facts file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing facts file {}", path.display()))
}

/// Load a portfolio file into a fresh repository.
///
/// Each record keeps its own `updatedAt`: the save-time refresh is a no-op on
/// load so that re-serializing an untouched portfolio is byte-stable.
fn load_portfolio(path: &Path) -> Result<ProjectRepository> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading portfolio file {}", path.display()))?;
    let records: Vec<ProjectRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing portfolio file {}", path.display()))?;

    let mut repo = ProjectRepository::new();
    for record in records {
        let project = Project::from_record(record, Utc::now())?;
        let loaded_at = project.updated_at;
        repo.save(project, loaded_at);
    }
    Ok(repo)
}

fn write_portfolio(repo: &ProjectRepository, path: &Path) -> Result<()> {
    let records: Vec<ProjectRecord> = repo
        .find_all()
        .into_iter()
        .chain(repo.find_templates())
        .map(Project::to_record)
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).with_context(|| format!("writing portfolio file {}", path.display()))?;
    Ok(())
}

fn print_scores(scores: &ScoreSet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(scores)?);
        return Ok(());
    }

    if let Some(value) = scores.dimensions.get("value") {
        println!("Value score:  {:.2}", value.score);
    }
    if let Some(risk) = scores.dimensions.get("risk") {
        println!("Risk score:   {:.2}", risk.score);
    }
    println!("Final score:  {:.2}", scores.overall.final_score);
    println!(
        "Priority:     {} ({})",
        scores.overall.priority,
        scores.priority_label()
    );
    println!("Confidence:   {:.2}", scores.overall.confidence);
    Ok(())
}
