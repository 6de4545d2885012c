// ── Careers: job postings ──
//
// Postings are held locally (no backend endpoint yet). List-valued fields
// are edited as one entry per line through `lines` / `set_lines`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use realty_api::Resource;

use super::{Draft, EntityId, LocalResource, blank_fields};
use crate::lines;

/// Employment types offered in the posting form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr)]
pub enum JobType {
    #[default]
    #[strum(serialize = "Full-time")]
    FullTime,
    #[strum(serialize = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

/// A list-valued field of [`Job`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum JobListField {
    Requirements,
    Responsibilities,
    Benefits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    /// Free-text salary line, e.g. "Competitive".
    pub salary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub benefits: Vec<String>,
    pub posted_date: NaiveDate,
    pub apply_url: String,
    pub contact_email: String,
    pub experience: String,
    pub remote: bool,
}

impl Default for Job {
    /// A blank posting: full-time, dated today.
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            department: String::new(),
            location: String::new(),
            job_type: JobType::default().to_string(),
            salary: String::new(),
            salary_min: None,
            salary_max: None,
            description: String::new(),
            requirements: Vec::new(),
            responsibilities: Vec::new(),
            benefits: Vec::new(),
            posted_date: Local::now().date_naive(),
            apply_url: String::new(),
            contact_email: String::new(),
            experience: String::new(),
            remote: false,
        }
    }
}

impl Job {
    fn list(&self, field: JobListField) -> &Vec<String> {
        match field {
            JobListField::Requirements => &self.requirements,
            JobListField::Responsibilities => &self.responsibilities,
            JobListField::Benefits => &self.benefits,
        }
    }

    /// Newline-joined text of a list field.
    pub fn lines(&self, field: JobListField) -> String {
        lines::join(self.list(field))
    }

    /// Replace a list field from newline-separated text.
    pub fn set_lines(&mut self, field: JobListField, text: &str) {
        let parsed = lines::parse(text);
        match field {
            JobListField::Requirements => self.requirements = parsed,
            JobListField::Responsibilities => self.responsibilities = parsed,
            JobListField::Benefits => self.benefits = parsed,
        }
    }
}

impl Resource for Job {
    const NAME: &'static str = "job";
    const PATH: &'static str = "careers";
    const COLLECTION_KEY: &'static str = "jobs";
    /// Local postings are replaced whole.
    type Patch = Job;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn apply_patch(&mut self, patch: &Job) {
        let id = self.id.take();
        self.clone_from(patch);
        self.id = id;
    }

    fn to_patch(&self) -> Job {
        self.clone()
    }
}

impl LocalResource for Job {
    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id.to_string());
    }
}

impl Draft for Job {
    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("title", &self.title), ("description", &self.description)])
    }
}
