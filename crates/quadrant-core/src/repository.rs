//! In-memory project repository with lookup, conjunctive filtering, deletion
//! guards and template cloning.
//!
//! Live projects and templates are separate partitions chosen by
//! `is_template` at save time; a project never moves between them. The store
//! is synchronous and single-owner — a server embedding it must serialize
//! mutations per project itself.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::error::{QuadrantError, Result};
use crate::domain::project::{Permission, Project, ProjectId, ProjectStatus};
use crate::score::Priority;

/// Conjunctive filter over the live-project partition.
///
/// Score and priority filters only ever match projects that have a current
/// score snapshot; projects without one are excluded, never matched by
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub status: Option<ProjectStatus>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

impl ProjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_score_range(mut self, min: f64, max: f64) -> Self {
        self.min_score = Some(min);
        self.max_score = Some(max);
        self
    }

    pub fn with_min_score(mut self, min: f64) -> Self {
        self.min_score = Some(min);
        self
    }

    pub fn with_max_score(mut self, max: f64) -> Self {
        self.max_score = Some(max);
        self
    }

    fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if project.business.department.as_deref() != Some(department.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if project.classification.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            match project.current_scores() {
                Some(scores) if scores.overall.priority == priority => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_score {
            match project.current_scores() {
                Some(scores) if scores.overall.final_score >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_score {
            match project.current_scores() {
                Some(scores) if scores.overall.final_score <= max => {}
                _ => return false,
            }
        }
        true
    }
}

/// In-memory collection of projects keyed by id.
#[derive(Debug, Default)]
pub struct ProjectRepository {
    projects: HashMap<ProjectId, Project>,
    templates: HashMap<ProjectId, Project>,
}

impl ProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a project into the partition selected by `is_template`,
    /// refreshing `updated_at`.
    pub fn save(&mut self, mut project: Project, now: DateTime<Utc>) -> ProjectId {
        project.updated_at = now;
        let id = project.id.clone();
        debug!(project = %id, template = project.is_template, "saving project");
        if project.is_template {
            self.templates.insert(id.clone(), project);
        } else {
            self.projects.insert(id.clone(), project);
        }
        id
    }

    /// Look up a project or template by id.
    pub fn find_by_id(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id).or_else(|| self.templates.get(id))
    }

    /// Mutable lookup across both partitions.
    pub fn find_by_id_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        if self.projects.contains_key(id) {
            self.projects.get_mut(id)
        } else {
            self.templates.get_mut(id)
        }
    }

    /// Resolve a portfolio key across both partitions.
    ///
    /// Keys are expected to be unique by the assigning layer; on a collision
    /// an arbitrary match is returned.
    pub fn find_by_key(&self, key: &str) -> Option<&Project> {
        self.projects
            .values()
            .chain(self.templates.values())
            .find(|p| p.key.as_deref() == Some(key))
    }

    /// All live projects, sorted by id.
    pub fn find_all(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        projects
    }

    /// All templates, sorted by id.
    pub fn find_templates(&self) -> Vec<&Project> {
        let mut templates: Vec<&Project> = self.templates.values().collect();
        templates.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        templates
    }

    pub fn find_by_category(&self, category: &str) -> Vec<&Project> {
        self.query(&ProjectQuery::new().with_category(category))
    }

    pub fn find_by_department(&self, department: &str) -> Vec<&Project> {
        self.query(&ProjectQuery::new().with_department(department))
    }

    pub fn find_by_priority(&self, priority: Priority) -> Vec<&Project> {
        self.query(&ProjectQuery::new().with_priority(priority))
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `Forbidden` when the project's
    /// own deletion guard denies it (templates always; in-progress or
    /// approved projects always).
    pub fn delete(&mut self, id: &ProjectId) -> Result<()> {
        let project = self
            .find_by_id(id)
            .ok_or_else(|| QuadrantError::NotFound(id.clone()))?;

        if let Permission::Denied { reason } = project.can_delete() {
            return Err(QuadrantError::Forbidden { reason });
        }

        self.projects.remove(id).or_else(|| self.templates.remove(id));
        debug!(project = %id, "deleted project");
        Ok(())
    }

    /// Conjunctive query over live projects, sorted by id.
    pub fn query(&self, query: &ProjectQuery) -> Vec<&Project> {
        let mut results: Vec<&Project> = self
            .projects
            .values()
            .filter(|p| query.matches(p))
            .collect();
        results.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        results
    }

    /// Clone a template into a fresh live project and save it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `NotATemplate` when the source
    /// is a regular project.
    pub fn clone_from_template(
        &mut self,
        template_id: &ProjectId,
        now: DateTime<Utc>,
    ) -> Result<ProjectId> {
        let template = self
            .find_by_id(template_id)
            .ok_or_else(|| QuadrantError::NotFound(template_id.clone()))?;
        let clone = template.create_from_template(now)?;
        info!(template = %template_id, clone = %clone.id, "cloned project from template");
        Ok(self.save(clone, now))
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}
