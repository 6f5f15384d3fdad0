//! Starter site files written by `folio init`

use crate::content_model::{
    ABOUT_FILE, EDUCATION_FILE, PUBLICATIONS_FILE, SERVICE_FILE, TA_FILE, TEACHING_BLURB_FILE,
    TEACHING_FILE,
};
use crate::site_config::{SiteConfig, SiteConfigError, CONFIG_FILE_NAME};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a new site
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Target directory {path} is not empty. Use --force to overwrite existing files", path = .0.display())]
    NotEmpty(std::path::PathBuf),

    #[error("IO error writing {path}: {source}", path = .0.display(), source = .1)]
    IoError(std::path::PathBuf, #[source] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] SiteConfigError),
}

const STARTER_ABOUT: &str = r#"[
  {
    "Title": "PhD Student",
    "Place": "Department of Computer Science",
    "Email": "you@example.edu",
    "About": "I study computing education with the [[Example Lab]]. Before that I worked at [[Acme]].",
    "Links": ["https://lab.example.edu", "https://acme.example.com"]
  }
]
"#;

const STARTER_EDUCATION: &str = r#"[
  {
    "School": "Example University",
    "Place": "Springfield",
    "Year": 2020,
    "Notes": "B.S. in Computer Science"
  }
]
"#;

const STARTER_TEACHING_BLURB: &str = r#"[
  {
    "Blurb": "A few sentences about how you teach."
  }
]
"#;

const STARTER_TEACHING: &str = r#"[
  {
    "Class": "CS 101: Introduction to Programming",
    "Link": "https://cs101.example.edu",
    "Description": "What the course covers and what you did.",
    "Year": [
      {
        "Semester": "Fall",
        "Year": 2023,
        "Coteachers": [{ "Name": "A. Colleague", "Link": "https://colleague.example.edu" }]
      },
      { "Semester": "Spring", "Year": 2024 }
    ]
  }
]
"#;

const STARTER_TA: &str = r#"[
  {
    "Class": "Algorithms",
    "Year": [
      { "Semester": "Fall", "Year": 2021 },
      { "Semester": "Spring", "Year": 2022 }
    ]
  }
]
"#;

const STARTER_SERVICE: &str = r#"[
  {
    "Conference": "Example Conference",
    "Role": [{ "Role": "Reviewer", "Year": [2023, 2024] }]
  }
]
"#;

const STARTER_PUBLICATIONS: &str = r#"[
  {
    "Year": "2024",
    "Conference": "Example Conference",
    "Publications": [
      {
        "Name": "A Paper Title",
        "Link": "https://doi.org/10.0000/example",
        "Description": "One paragraph abstract."
      }
    ]
  }
]
"#;

/// Write folio.toml and starter data files into `target`
///
/// Returns the number of files written.
pub fn create_site(target: &Path, owner_name: &str, force: bool) -> Result<usize, ScaffoldError> {
    std::fs::create_dir_all(target)
        .map_err(|e| ScaffoldError::IoError(target.to_path_buf(), e))?;

    if !force {
        check_directory_empty(target)?;
    }

    let config = SiteConfig::new(owner_name);
    config.save(target.join(CONFIG_FILE_NAME))?;
    let mut files_created = 1;

    let data_dir = target.join(&config.data_dir);
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| ScaffoldError::IoError(data_dir.clone(), e))?;

    for (name, content) in [
        (ABOUT_FILE, STARTER_ABOUT),
        (EDUCATION_FILE, STARTER_EDUCATION),
        (TEACHING_BLURB_FILE, STARTER_TEACHING_BLURB),
        (TEACHING_FILE, STARTER_TEACHING),
        (TA_FILE, STARTER_TA),
        (SERVICE_FILE, STARTER_SERVICE),
        (PUBLICATIONS_FILE, STARTER_PUBLICATIONS),
    ] {
        let path = data_dir.join(name);
        std::fs::write(&path, content).map_err(|e| ScaffoldError::IoError(path.clone(), e))?;
        log::info!("Wrote {}", path.display());
        files_created += 1;
    }

    Ok(files_created)
}

fn check_directory_empty(path: &Path) -> Result<(), ScaffoldError> {
    if let Ok(mut entries) = std::fs::read_dir(path) {
        if entries.next().is_some() {
            return Err(ScaffoldError::NotEmpty(path.to_path_buf()));
        }
    }
    Ok(())
}
