//! Static role → ordered questions reference data.
//!
//! Loaded once at startup (built-in default, or TOML via `QUESTION_BANK_PATH`)
//! and never mutated afterwards. Role order and question order are presentation order.
//!
//! ```toml
//! [[roles]]
//! name = "Software Engineer"
//! questions = ["...", "..."]
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub name: String,
    pub questions: Vec<String>,
}

impl JobRole {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    roles: Vec<JobRole>,
}

impl QuestionBank {
    /// Builds a bank, rejecting empty banks, roles without questions, blank
    /// questions and duplicate role names.
    pub fn new(roles: Vec<JobRole>) -> Result<Self> {
        if roles.is_empty() {
            bail!("Question bank must define at least one role");
        }

        let mut seen = HashSet::new();
        for role in &roles {
            if role.name.trim().is_empty() {
                bail!("Question bank contains a role with a blank name");
            }
            if !seen.insert(role.name.as_str()) {
                bail!("Duplicate role '{}' in question bank", role.name);
            }
            if role.questions.is_empty() {
                bail!("Role '{}' has no questions", role.name);
            }
            if role.questions.iter().any(|q| q.trim().is_empty()) {
                bail!("Role '{}' contains a blank question", role.name);
            }
        }

        Ok(Self { roles })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawBank {
            roles: Vec<JobRole>,
        }

        let raw: RawBank = toml::from_str(raw).context("Invalid question bank")?;
        Self::new(raw.roles)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank '{}'", path.display()))?;
        Self::from_toml_str(&raw)
    }

    pub fn roles(&self) -> &[JobRole] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&JobRole> {
        self.roles.iter().find(|r| r.name == name)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        let role = |name: &str, questions: [&str; 3]| JobRole {
            name: name.to_string(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
        };

        Self {
            roles: vec![
                role(
                    "Software Engineer",
                    [
                        "Explain the difference between inheritance and composition in object-oriented programming.",
                        "How would you optimize a slow-performing SQL query?",
                        "Describe a challenging technical problem you've solved and how you approached it.",
                    ],
                ),
                role(
                    "Data Scientist",
                    [
                        "Explain the difference between supervised and unsupervised learning.",
                        "How would you handle missing data in a dataset?",
                        "Describe a project where you applied machine learning to solve a real-world problem.",
                    ],
                ),
                role(
                    "Product Manager",
                    [
                        "How do you prioritize features in a product roadmap?",
                        "Describe how you would validate a new product idea.",
                        "How do you collaborate with engineering teams to ensure successful product delivery?",
                    ],
                ),
            ],
        }
    }
}
