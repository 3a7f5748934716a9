use super::sandbox::{Cmd, Sandbox};
use super::DependencyInstaller;
use crate::directory::Directory;
use crate::error::Result;
use arkive::DB;
use tracing::info;

/// Lockfiles that make `npm ci` usable.
const LOCKFILES: [&str; 2] = ["package-lock.json", "npm-shrinkwrap.json"];

/// Installs Node dependencies with npm.
pub struct Npm<'a> {
    db: &'a DB,
    program: String,
}

impl<'a> Npm<'a> {
    pub fn new(db: &'a DB) -> Self {
        Self::with_program(db, "npm")
    }

    /// Use a different npm-compatible executable.
    pub fn with_program(db: &'a DB, program: impl Into<String>) -> Self {
        Self {
            db,
            program: program.into(),
        }
    }
}

/// Arguments for npm, preferring a clean install when the project is locked.
pub fn npm_args(project: &Directory) -> Vec<&'static str> {
    let locked = LOCKFILES.iter().any(|lock| project.contains(*lock));
    let verb = if locked { "ci" } else { "install" };
    vec![verb, "--no-audit", "--no-fund"]
}

impl<'a> DependencyInstaller for Npm<'a> {
    fn install(&self, project: &Directory) -> Result<Directory> {
        let sandbox = Sandbox::new(self.db, project)?;
        sandbox.run(&Cmd::new(&self.program).args(npm_args(project)))?;
        let deps = sandbox.collect("node_modules")?;
        info!(entries = deps.ark().len(), "Installed node_modules");
        Ok(deps)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use arkive::{Ark, Contents};

    fn project(db: &DB, files: &[&'static str]) -> Result<Directory> {
        Directory::store(
            db,
            &Ark::from_entries(files.iter().map(|f| (*f, Contents::File("{}")))),
        )
    }

    #[test]
    fn args() -> Result<()> {
        let db = DB::new_temp()?;
        assert_eq!(
            npm_args(&project(&db, &["package.json"])?),
            vec!["install", "--no-audit", "--no-fund"]
        );
        assert_eq!(
            npm_args(&project(&db, &["package.json", "package-lock.json"])?),
            vec!["ci", "--no-audit", "--no-fund"]
        );
        assert_eq!(
            npm_args(&project(&db, &["package.json", "npm-shrinkwrap.json"])?),
            vec!["ci", "--no-audit", "--no-fund"]
        );
        Ok(())
    }

    #[test]
    fn stand_in_npm() -> Result<()> {
        // Any program that fills node_modules will do.
        let db = DB::new_temp()?;
        let bin = tempfile::tempdir()?;
        let script = bin.path().join("fake-npm");
        std::fs::write(
            &script,
            "#!/bin/sh\nmkdir -p node_modules/left-pad && echo \"$1\" > node_modules/left-pad/index.js\n",
        )?;
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
        }

        let npm = Npm::with_program(&db, script.to_string_lossy());
        let deps = npm.install(&project(&db, &["package.json"])?)?;
        assert!(deps.contains("node_modules/left-pad/index.js"));
        assert!(!deps.contains("package.json"));
        assert_eq!(
            deps.read_file(&db, "node_modules/left-pad/index.js")?,
            Some(b"install\n".to_vec())
        );
        Ok(())
    }

    #[test]
    fn missing_manifest_is_npm_error() -> Result<()> {
        let db = DB::new_temp()?;
        let npm = Npm::with_program(&db, "false");
        let err = npm.install(&project(&db, &["README.md"])?).expect_err("fails");
        assert!(matches!(err, Error::ToolFailed { .. }), "{:?}", err);
        Ok(())
    }

    #[test]
    #[ignore = "needs a real npm"]
    fn real_npm() -> Result<()> {
        let db = DB::new_temp()?;
        let project = Directory::store(
            &db,
            &Ark::from_entries([(
                "package.json",
                Contents::File(r#"{"name":"site","version":"1.0.0","dependencies":{}}"#),
            )]),
        )?;
        Npm::new(&db).install(&project)?;
        Ok(())
    }
}
