//! Browser targets.
//!
//! A browser is what a rule's `target` points at. Discovery (registry,
//! desktop files) happens elsewhere; this type only carries what is needed
//! to build a launch command.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An installed browser, or one profile of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browser {
    pub id: String,
    pub name: String,
    pub exe_path: PathBuf,
    pub icon_path: Option<PathBuf>,
    /// Extra argument selecting a profile, e.g. `--profile-directory=Profile 1`.
    pub profile_arg: Option<String>,
    /// Argument opening a private window.
    pub incognito_arg: Option<String>,
    pub is_profile: bool,
    /// Id of the browser this profile belongs to.
    pub parent_browser_id: Option<String>,
    pub enabled: bool,
}

impl Browser {
    /// Create an enabled browser, deriving the private-window flag from its name.
    pub fn new(id: impl Into<String>, name: impl Into<String>, exe_path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let incognito_arg = Some(detect_incognito_arg(&name).to_string());
        Self {
            id: id.into(),
            name,
            exe_path: exe_path.into(),
            icon_path: None,
            profile_arg: None,
            incognito_arg,
            is_profile: false,
            parent_browser_id: None,
            enabled: true,
        }
    }

    /// Derive an entry for one profile of this browser.
    pub fn with_profile(
        &self,
        profile_id: impl Into<String>,
        profile_name: impl Into<String>,
        profile_arg: impl Into<String>,
    ) -> Self {
        Self {
            id: profile_id.into(),
            name: profile_name.into(),
            exe_path: self.exe_path.clone(),
            icon_path: self.icon_path.clone(),
            profile_arg: Some(profile_arg.into()),
            incognito_arg: self.incognito_arg.clone(),
            is_profile: true,
            parent_browser_id: Some(self.id.clone()),
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Name as shown in a chooser; profiles are indented under their browser.
    pub fn display_name(&self) -> String {
        if self.is_profile {
            format!("  {}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Build the command that opens `url` in this browser.
    ///
    /// The incognito flag is only added when requested and known.
    pub fn launch_plan(&self, url: &str, incognito: bool) -> LaunchPlan {
        let mut args = Vec::with_capacity(3);

        if let Some(profile) = self.profile_arg.as_deref().filter(|p| !p.trim().is_empty()) {
            args.push(profile.to_string());
        }
        if incognito {
            if let Some(flag) = &self.incognito_arg {
                args.push(flag.clone());
            }
        }
        args.push(url.to_string());

        LaunchPlan {
            program: self.exe_path.clone(),
            args,
        }
    }
}

/// Private-window flag for a browser, guessed from its display name.
pub fn detect_incognito_arg(browser_name: &str) -> &'static str {
    let lower = browser_name.to_lowercase();
    if lower.contains("firefox") {
        "-private-window"
    } else if lower.contains("opera") {
        "--private"
    } else {
        "--incognito"
    }
}

/// A program and its arguments, ready to be spawned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
